use axum::{response::Result, Json};
use serde_json::{json, Value};

/// Root greeting, also doubles as a liveness probe for the frontend
pub async fn greeting() -> Result<Json<Value>> {
    Ok(Json(json!({
        "message": "Hello from the backend!",
        "service": "tarefas-server",
        "version": env!("CARGO_PKG_VERSION")
    })))
}
