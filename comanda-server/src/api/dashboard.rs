//! Staff dashboard endpoint

use super::ApiResult;
use crate::orders::dashboard::{self, DashboardSummary};
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/tenants/{tenant_id}/dashboard", get(get_dashboard))
}

/// GET /tenants/{tenant_id}/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
) -> ApiResult<DashboardSummary> {
    let orders = state.manager.list_orders(&tenant_id, None)?;
    Ok(Json(dashboard::summarize(
        &orders,
        state.config.recent_orders_limit,
    )))
}
