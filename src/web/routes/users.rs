use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::services::follow_service::{self, FollowOutcome, FollowRequest, UnfollowOutcome};
use crate::services::user_service::{self, CreateUserRequest, NearbyUserView, UserView};

pub async fn create_user_handler(
    State(pool): State<SqlitePool>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let user = user_service::create_user(&pool, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully", "user": user })),
    ))
}

pub async fn get_user_handler(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<String>,
) -> Result<Json<UserView>, AppError> {
    user_service::get_user(&pool, &user_id).await.map(Json)
}

pub async fn nearby_users_handler(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<NearbyUserView>>, AppError> {
    user_service::nearby_users(&pool).await.map(Json)
}

pub async fn follow_user_handler(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<String>,
    Json(body): Json<FollowRequest>,
) -> Result<Json<Value>, AppError> {
    let message = match follow_service::follow_user(&pool, &user_id, body).await? {
        FollowOutcome::Followed => "Followed",
        FollowOutcome::AlreadyFollowing => "Already following",
    };
    Ok(Json(json!({ "message": message })))
}

#[derive(Debug, Deserialize)]
pub struct UnfollowQuery {
    follower_id: Option<String>,
}

pub async fn unfollow_user_handler(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<String>,
    Query(query): Query<UnfollowQuery>,
) -> Result<Json<Value>, AppError> {
    let message =
        match follow_service::unfollow_user(&pool, &user_id, query.follower_id.as_deref()).await? {
            UnfollowOutcome::Unfollowed => "Unfollowed",
            UnfollowOutcome::NotFollowing => "Not following",
        };
    Ok(Json(json!({ "message": message })))
}
