//! Order endpoints: create, list, detail, metrics, phase transitions

use super::ApiResult;
use crate::orders::metrics::{self, OrderMetrics, PhaseAverages};
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use shared::error::AppError;
use shared::models::{Order, OrderDraft};
use shared::phase::OrderPhase;
use shared::util::now_millis;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/tenants/{tenant_id}/orders",
            post(create_order).get(list_orders),
        )
        .route("/tenants/{tenant_id}/orders/{order_id}", get(get_order))
        .route(
            "/tenants/{tenant_id}/orders/{order_id}/metrics",
            get(get_order_metrics),
        )
        .route(
            "/tenants/{tenant_id}/orders/{order_id}/step",
            post(update_order_step),
        )
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub order_id: String,
    pub status: OrderPhase,
}

/// POST /tenants/{tenant_id}/orders
pub async fn create_order(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
    Json(draft): Json<OrderDraft>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), AppError> {
    let order = state.manager.create_order(&tenant_id, draft)?;
    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            order_id: order.order_id,
            status: order.status,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
}

/// GET /tenants/{tenant_id}/orders
pub async fn list_orders(
    State(state): State<AppState>,
    Path(tenant_id): Path<String>,
    Query(query): Query<OrdersQuery>,
) -> ApiResult<Vec<Order>> {
    let status = query
        .status
        .as_deref()
        .map(|s| {
            s.parse::<OrderPhase>()
                .map_err(|e| AppError::validation(e.to_string()))
        })
        .transpose()?;
    Ok(Json(state.manager.list_orders(&tenant_id, status)?))
}

/// GET /tenants/{tenant_id}/orders/{order_id}
pub async fn get_order(
    State(state): State<AppState>,
    Path((tenant_id, order_id)): Path<(String, String)>,
) -> ApiResult<Order> {
    Ok(Json(state.manager.get_order(&tenant_id, &order_id)?))
}

/// GET /tenants/{tenant_id}/orders/{order_id}/metrics
pub async fn get_order_metrics(
    State(state): State<AppState>,
    Path((tenant_id, order_id)): Path<(String, String)>,
) -> ApiResult<OrderMetrics> {
    let order = state.manager.get_order(&tenant_id, &order_id)?;
    let history = state.manager.list_orders(&tenant_id, None)?;
    let averages = PhaseAverages::from_orders(&history);

    Ok(Json(metrics::compute(
        &order,
        &averages,
        state.config.min_metric_samples,
        now_millis(),
    )))
}

/// Transition request; accepts both client dialects for attribution fields
/// (`attended_by`/`by` and `role`/`by_role`).
#[derive(Debug, Deserialize)]
pub struct StepRequest {
    pub status: String,
    #[serde(default, alias = "by")]
    pub attended_by: String,
    #[serde(default, alias = "by_role")]
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct StepResponse {
    #[serde(flatten)]
    pub order: Order,
    pub previous_status: OrderPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// POST /tenants/{tenant_id}/orders/{order_id}/step
pub async fn update_order_step(
    State(state): State<AppState>,
    Path((tenant_id, order_id)): Path<(String, String)>,
    Json(request): Json<StepRequest>,
) -> ApiResult<StepResponse> {
    let target = request
        .status
        .parse::<OrderPhase>()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let outcome = state.manager.transition(
        &tenant_id,
        &order_id,
        target,
        &request.attended_by,
        &request.role,
    )?;

    Ok(Json(StepResponse {
        order: outcome.order,
        previous_status: outcome.previous_status,
        warning: outcome.warning,
    }))
}
