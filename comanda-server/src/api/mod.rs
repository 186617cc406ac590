//! HTTP API for the order tracker
//!
//! All business routes are tenant-scoped under `/tenants/{tenant_id}/...`.
//! Handlers return `ApiResult<T>`: plain JSON on success, an
//! [`shared::error::ApiResponse`] error envelope (with the matching HTTP
//! status) on failure.

pub mod dashboard;
pub mod health;
pub mod menu;
pub mod orders;
pub mod reports;
pub mod tenants;

use crate::state::AppState;
use axum::Router;
use shared::error::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(tenants::router())
        .merge(menu::router())
        .merge(orders::router())
        .merge(dashboard::router())
        .merge(reports::router())
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: AppState) -> Router {
    build_router()
        // CORS - the dashboard and tracking pages are served elsewhere
        .layer(CorsLayer::permissive())
        // Request tracing
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
