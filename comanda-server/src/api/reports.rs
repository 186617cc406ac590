//! Daily report export endpoint

use super::ApiResult;
use crate::services::reports::{self, DailyReport};
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::post,
};
use shared::util::now_millis;

pub fn router() -> Router<AppState> {
    Router::new().route("/tenants/{tenant_id}/reports/daily", post(export_daily))
}

/// POST /tenants/{tenant_id}/reports/daily
pub async fn export_daily(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
) -> ApiResult<DailyReport> {
    let orders = state.manager.list_orders(&tenant_id, None)?;
    Ok(Json(reports::export_daily(
        &orders,
        &state.config.data_dir,
        &tenant_id,
        now_millis(),
    )?))
}
