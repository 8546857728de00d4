use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::services::discovery_service::{self, NearbyEventView, NearbyQuery};
use crate::services::event_service::{self, CreateEventRequest, EventView};
use crate::services::membership_service::{
    self, JoinEventRequest, JoinOutcome, LeaveEventRequest, LeaveOutcome, ParticipantsView,
};

pub async fn create_event_handler(
    State(pool): State<SqlitePool>,
    Json(body): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let event = event_service::create_event(&pool, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Event created successfully", "event": event })),
    ))
}

pub async fn list_events_handler(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<EventView>>, AppError> {
    event_service::list_events(&pool).await.map(Json)
}

pub async fn nearby_events_handler(
    State(pool): State<SqlitePool>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<Vec<NearbyEventView>>, AppError> {
    discovery_service::nearby_events(&pool, &query).await.map(Json)
}

pub async fn get_event_handler(
    State(pool): State<SqlitePool>,
    Path(event_id): Path<String>,
) -> Result<Json<EventView>, AppError> {
    event_service::get_event(&pool, &event_id).await.map(Json)
}

/// 201 on a fresh membership, 200 when the user was already in.
pub async fn join_event_handler(
    State(pool): State<SqlitePool>,
    Path(event_id): Path<String>,
    Json(body): Json<JoinEventRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    match membership_service::join_event(&pool, &event_id, body).await? {
        JoinOutcome::Joined(event) => Ok((
            StatusCode::CREATED,
            Json(json!({ "message": "Successfully joined event", "event": event })),
        )),
        JoinOutcome::AlreadyJoined(event) => Ok((
            StatusCode::OK,
            Json(json!({ "message": "Already joined", "event": event })),
        )),
    }
}

pub async fn leave_event_handler(
    State(pool): State<SqlitePool>,
    Path(event_id): Path<String>,
    Json(body): Json<LeaveEventRequest>,
) -> Result<Json<Value>, AppError> {
    let message = match membership_service::leave_event(&pool, &event_id, body).await? {
        LeaveOutcome::Left => "Left event",
        LeaveOutcome::NotParticipant => "Not a participant",
    };
    Ok(Json(json!({ "message": message })))
}

pub async fn list_participants_handler(
    State(pool): State<SqlitePool>,
    Path(event_id): Path<String>,
) -> Result<Json<ParticipantsView>, AppError> {
    membership_service::list_participants(&pool, &event_id)
        .await
        .map(Json)
}
