//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the HTTP status code for this error
    ///
    /// - Not-found codes map to 404
    /// - Transition conflicts (invalid/terminal) map to 409
    /// - Validation failures map to 400
    /// - System errors map to 500
    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::Success => StatusCode::OK,

            ErrorCode::ValidationFailed
            | ErrorCode::InvalidRequest
            | ErrorCode::RequiredField
            | ErrorCode::OrderEmpty
            | ErrorCode::InvalidQuantity
            | ErrorCode::ProductInvalidPrice => StatusCode::BAD_REQUEST,

            ErrorCode::NotFound
            | ErrorCode::TenantNotFound
            | ErrorCode::OrderNotFound
            | ErrorCode::ProductNotFound => StatusCode::NOT_FOUND,

            ErrorCode::AlreadyExists
            | ErrorCode::InvalidTransition
            | ErrorCode::OrderAlreadyDelivered => StatusCode::CONFLICT,

            ErrorCode::TenantInactive => StatusCode::FORBIDDEN,

            ErrorCode::Unknown | ErrorCode::InternalError | ErrorCode::DatabaseError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_mapping() {
        assert_eq!(
            ErrorCode::OrderNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::TenantNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::ProductNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_conflict_mapping() {
        assert_eq!(
            ErrorCode::InvalidTransition.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::OrderAlreadyDelivered.http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_validation_mapping() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::OrderEmpty.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_system_mapping() {
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
