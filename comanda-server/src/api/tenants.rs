//! Tenant registry endpoint

use super::ApiResult;
use crate::state::AppState;
use axum::{Json, Router, extract::State, routing::get};
use shared::models::Tenant;

pub fn router() -> Router<AppState> {
    Router::new().route("/tenants", get(list_tenants))
}

/// GET /tenants
pub async fn list_tenants(State(state): State<AppState>) -> ApiResult<Vec<Tenant>> {
    Ok(Json(state.manager.list_tenants()?))
}
