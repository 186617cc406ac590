//! Health check endpoint

use crate::state::AppState;
use axum::{Json, Router, routing::get};

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "comanda-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
