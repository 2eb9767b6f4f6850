use axum::Json;
use serde_json::{Value, json};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hueseum API is running" }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
