//! Liveness check.

use axum::Json;
use serde_json::{Value, json};

/// `GET /health`. Does not require authentication.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
