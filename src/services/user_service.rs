use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{event_repo, user_repo};
use crate::error::{is_unique_violation, AppError};
use crate::models::{NearbyUserRow, UserRow};
use crate::services::event_service::{event_view, EventView};

#[derive(Debug, Deserialize, Default)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub bio: Option<String>,
    pub gender: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: String,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub gender: Option<String>,
    pub created_at: String,
    pub rating: Option<f64>,
    pub location: Option<String>,
    pub sports: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct NearbyUserView {
    #[serde(flatten)]
    pub user: UserView,
    pub events_count: i64,
}

#[derive(Debug, Serialize)]
pub struct MyEventsView {
    pub joined: Vec<EventView>,
    pub hosted: Vec<EventView>,
}

fn user_view(row: UserRow) -> UserView {
    UserView {
        id: row.id,
        username: row.username,
        email: row.email,
        bio: row.bio,
        gender: row.gender,
        created_at: row.created_at,
        rating: row.rating,
        location: row.location,
        sports: row.sports.as_deref().map(split_sports),
    }
}

fn nearby_user_view(row: NearbyUserRow) -> NearbyUserView {
    NearbyUserView {
        user: UserView {
            id: row.id,
            username: row.username,
            email: row.email,
            bio: row.bio,
            gender: row.gender,
            created_at: row.created_at,
            rating: row.rating,
            location: row.location,
            sports: row.sports.as_deref().map(split_sports),
        },
        events_count: row.events_count,
    }
}

// Stored as a comma-separated list; rendered as an array.
fn split_sports(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn create_user(pool: &SqlitePool, req: CreateUserRequest) -> Result<UserView, AppError> {
    let username = req
        .username
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let email = req.email.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let (Some(username), Some(email)) = (username, email) else {
        return Err(AppError::Validation(
            "Missing required fields: username, email".into(),
        ));
    };

    let id = Uuid::new_v4().to_string();
    user_repo::insert_user(
        pool,
        user_repo::NewUser {
            id: &id,
            username,
            email,
            bio: req.bio.as_deref(),
            gender: req.gender.as_deref(),
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("Username or email already exists".into())
        } else {
            AppError::Store(e)
        }
    })?;

    let row = user_repo::get_user(pool, &id)
        .await?
        .ok_or(AppError::Store(sqlx::Error::RowNotFound))?;
    Ok(user_view(row))
}

pub async fn get_user(pool: &SqlitePool, user_id: &str) -> Result<UserView, AppError> {
    let row = user_repo::get_user(pool, user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;
    Ok(user_view(row))
}

/// All users with their join counts, for the discovery listing.
pub async fn nearby_users(pool: &SqlitePool) -> Result<Vec<NearbyUserView>, AppError> {
    let rows = user_repo::list_with_join_counts(pool).await?;
    Ok(rows.into_iter().map(nearby_user_view).collect())
}

/// Joined and hosted events for one user.
pub async fn my_events(
    pool: &SqlitePool,
    user_id: Option<&str>,
) -> Result<MyEventsView, AppError> {
    let user_id = user_id
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("user_id is required".into()))?;

    let joined = event_repo::list_events_joined_by(pool, user_id).await?;
    let hosted = event_repo::list_events_hosted_by(pool, user_id).await?;
    Ok(MyEventsView {
        joined: joined.into_iter().map(event_view).collect(),
        hosted: hosted.into_iter().map(event_view).collect(),
    })
}
