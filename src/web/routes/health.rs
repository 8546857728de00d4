use axum::{extract::Query, Json};
use serde::Deserialize;
use serde_json::{json, Value};

pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
pub struct HelloQuery {
    name: Option<String>,
}

pub async fn hello_handler(Query(query): Query<HelloQuery>) -> Json<Value> {
    let name = query.name.as_deref().unwrap_or("world");
    Json(json!({ "message": format!("Hello, {}!", name) }))
}
