//! Liveness endpoint.

use axum::Json;
use serde_json::{json, Value};

/// `GET /`: fixed status payload, no side effects.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "AI Doctor API is running" }))
}
