use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::event_repo;
use crate::error::AppError;
use crate::models::EventRow;

#[derive(Debug, Deserialize, Default)]
pub struct CreateEventRequest {
    pub name: Option<String>,
    pub sport: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub max_players: Option<i64>,
    pub event_date: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub skill_level: Option<String>,
    pub host_user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HostView {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventView {
    pub id: String,
    pub name: String,
    pub sport: String,
    pub location: String,
    pub notes: Option<String>,
    pub max_players: i64,
    pub current_players: i64,
    pub created_at: String,
    pub event_date: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub skill_level: Option<String>,
    pub host_user_id: Option<String>,
    pub host: Option<HostView>,
}

pub(crate) fn event_view(row: EventRow) -> EventView {
    let host = match (&row.host_user_id, row.host_username) {
        (Some(id), Some(username)) => Some(HostView {
            id: id.clone(),
            username,
        }),
        _ => None,
    };
    EventView {
        id: row.id,
        name: row.name,
        sport: row.sport,
        location: row.location,
        notes: row.notes,
        max_players: row.max_players,
        current_players: row.current_players,
        created_at: row.created_at,
        event_date: row.event_date,
        latitude: row.latitude,
        longitude: row.longitude,
        skill_level: row.skill_level,
        host_user_id: row.host_user_id,
        host,
    }
}

pub async fn create_event(
    pool: &SqlitePool,
    req: CreateEventRequest,
) -> Result<EventView, AppError> {
    let name = req.name.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let sport = req.sport.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let location = req
        .location
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let (Some(name), Some(sport), Some(location), Some(max_players)) =
        (name, sport, location, req.max_players)
    else {
        return Err(AppError::Validation(
            "Missing required fields: name, sport, location, max_players".into(),
        ));
    };

    if max_players < 1 {
        return Err(AppError::Validation("max_players must be at least 1".into()));
    }
    // Coordinates are a pair or nothing; a lone value is unrankable.
    if req.latitude.is_some() != req.longitude.is_some() {
        return Err(AppError::Validation(
            "latitude and longitude must be provided together".into(),
        ));
    }

    let id = Uuid::new_v4().to_string();
    event_repo::insert_event(
        pool,
        event_repo::NewEvent {
            id: &id,
            name,
            sport,
            location,
            notes: req.notes.as_deref(),
            max_players,
            event_date: req.event_date.as_deref(),
            latitude: req.latitude,
            longitude: req.longitude,
            skill_level: req.skill_level.as_deref(),
            host_user_id: req.host_user_id.as_deref(),
        },
    )
    .await?;

    let row = event_repo::get_event(pool, &id)
        .await?
        .ok_or(AppError::Store(sqlx::Error::RowNotFound))?;
    Ok(event_view(row))
}

pub async fn list_events(pool: &SqlitePool) -> Result<Vec<EventView>, AppError> {
    let rows = event_repo::list_events(pool).await?;
    Ok(rows.into_iter().map(event_view).collect())
}

pub async fn get_event(pool: &SqlitePool, event_id: &str) -> Result<EventView, AppError> {
    let row = event_repo::get_event(pool, event_id)
        .await?
        .ok_or(AppError::NotFound("Event"))?;
    Ok(event_view(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema;

    fn valid_request() -> CreateEventRequest {
        CreateEventRequest {
            name: Some("Sunday five-a-side".into()),
            sport: Some("football".into()),
            location: Some("Riverside pitch 2".into()),
            max_players: Some(10),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_then_get_roundtrip() {
        let pool = schema::in_memory_pool().await.unwrap();

        let created = create_event(&pool, valid_request()).await.unwrap();
        assert_eq!(created.current_players, 0);
        assert!(!created.created_at.is_empty());

        let fetched = get_event(&pool, &created.id).await.unwrap();
        assert_eq!(fetched.name, "Sunday five-a-side");
        assert_eq!(fetched.max_players, 10);
        assert!(fetched.host.is_none());
    }

    #[tokio::test]
    async fn create_rejects_missing_fields() {
        let pool = schema::in_memory_pool().await.unwrap();
        let err = create_event(&pool, CreateEventRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let pool = schema::in_memory_pool().await.unwrap();
        let req = CreateEventRequest {
            name: Some("   ".into()),
            ..valid_request()
        };
        let err = create_event(&pool, req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_zero_capacity() {
        let pool = schema::in_memory_pool().await.unwrap();
        let req = CreateEventRequest {
            max_players: Some(0),
            ..valid_request()
        };
        let err = create_event(&pool, req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_lone_coordinate() {
        let pool = schema::in_memory_pool().await.unwrap();
        let req = CreateEventRequest {
            latitude: Some(52.37),
            ..valid_request()
        };
        let err = create_event(&pool, req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn get_missing_event_is_not_found() {
        let pool = schema::in_memory_pool().await.unwrap();
        let err = get_event(&pool, "nope").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("Event")));
    }

    #[tokio::test]
    async fn host_is_embedded_when_known() {
        let pool = schema::in_memory_pool().await.unwrap();
        sqlx::query(
            "INSERT INTO users (id, username, email, created_at) VALUES ('u1', 'dana', 'dana@example.com', '2026-01-01T00:00:00Z')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let req = CreateEventRequest {
            host_user_id: Some("u1".into()),
            ..valid_request()
        };
        let created = create_event(&pool, req).await.unwrap();
        let host = created.host.expect("host should be resolved");
        assert_eq!(host.username, "dana");
    }
}
