//! Menu endpoints: list and upsert menu items

use super::ApiResult;
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use shared::models::{MenuItem, MenuItemUpsert};

pub fn router() -> Router<AppState> {
    Router::new().route("/tenants/{tenant_id}/menu", get(get_menu).put(put_menu_item))
}

/// GET /tenants/{tenant_id}/menu
pub async fn get_menu(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
) -> ApiResult<Vec<MenuItem>> {
    Ok(Json(state.manager.list_menu(&tenant_id)?))
}

/// PUT /tenants/{tenant_id}/menu
///
/// Upserts one menu item; registers the tenant on its first write.
pub async fn put_menu_item(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
    Json(upsert): Json<MenuItemUpsert>,
) -> ApiResult<MenuItem> {
    Ok(Json(state.manager.upsert_menu_item(&tenant_id, upsert)?))
}
