use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::services::user_service::{self, MyEventsView};

#[derive(Debug, Deserialize)]
pub struct MyEventsQuery {
    user_id: Option<String>,
}

pub async fn my_events_handler(
    State(pool): State<SqlitePool>,
    Query(query): Query<MyEventsQuery>,
) -> Result<Json<MyEventsView>, AppError> {
    user_service::my_events(&pool, query.user_id.as_deref())
        .await
        .map(Json)
}
