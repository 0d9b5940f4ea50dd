use axum::Json;
use serde_json::{json, Value};

/// Liveness probe; never touches the feed caches
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
