use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::database::{event_repo, participant_repo};
use crate::error::{is_unique_violation, AppError};
use crate::models::EventParticipantRow;
use crate::services::event_service::{event_view, EventView};

const DEFAULT_TEAM: &str = "team_a";

#[derive(Debug, Deserialize, Default)]
pub struct JoinEventRequest {
    pub player_name: Option<String>,
    pub user_id: Option<String>,
    pub team: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct LeaveEventRequest {
    pub user_id: Option<String>,
}

#[derive(Debug)]
pub enum JoinOutcome {
    Joined(EventView),
    AlreadyJoined(EventView),
}

#[derive(Debug, PartialEq, Eq)]
pub enum LeaveOutcome {
    Left,
    NotParticipant,
}

#[derive(Debug, Serialize)]
pub struct ParticipantsView {
    pub event: EventView,
    pub participants: Vec<EventParticipantRow>,
}

/// Join an event. A user who already holds a membership gets their current
/// state back instead of a second row; everyone else races for a slot in a
/// single guarded insert, so the capacity check cannot go stale between
/// read and write.
pub async fn join_event(
    pool: &SqlitePool,
    event_id: &str,
    req: JoinEventRequest,
) -> Result<JoinOutcome, AppError> {
    let player_name = req
        .player_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("Player name is required".into()))?;

    let event = event_repo::get_event(pool, event_id)
        .await?
        .ok_or(AppError::NotFound("Event"))?;

    if let Some(user_id) = req.user_id.as_deref() {
        if participant_repo::find_by_event_and_user(pool, event_id, user_id)
            .await?
            .is_some()
        {
            return Ok(JoinOutcome::AlreadyJoined(event_view(event)));
        }
    }

    let id = Uuid::new_v4().to_string();
    let inserted = participant_repo::insert_participant_guarded(
        pool,
        participant_repo::NewParticipant {
            id: &id,
            event_id,
            user_id: req.user_id.as_deref(),
            player_name,
            team: req.team.as_deref().unwrap_or(DEFAULT_TEAM),
        },
    )
    .await
    .map_err(|e| {
        // Two requests for the same user can both pass the pre-check; the
        // unique index catches the loser.
        if is_unique_violation(&e) {
            AppError::Conflict("Failed to join event".into())
        } else {
            AppError::Store(e)
        }
    })?;

    if inserted == 0 {
        return Err(AppError::EventFull);
    }

    let row = event_repo::get_event(pool, event_id)
        .await?
        .ok_or(AppError::Store(sqlx::Error::RowNotFound))?;
    Ok(JoinOutcome::Joined(event_view(row)))
}

/// Leaving is idempotent: a user without a membership gets a no-op success.
pub async fn leave_event(
    pool: &SqlitePool,
    event_id: &str,
    req: LeaveEventRequest,
) -> Result<LeaveOutcome, AppError> {
    let user_id = req
        .user_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("user_id is required".into()))?;

    let deleted = participant_repo::delete_by_event_and_user(pool, event_id, user_id).await?;
    if deleted == 0 {
        Ok(LeaveOutcome::NotParticipant)
    } else {
        Ok(LeaveOutcome::Left)
    }
}

pub async fn list_participants(
    pool: &SqlitePool,
    event_id: &str,
) -> Result<ParticipantsView, AppError> {
    let event = event_repo::get_event(pool, event_id)
        .await?
        .ok_or(AppError::NotFound("Event"))?;
    let participants = participant_repo::list_for_event(pool, event_id).await?;
    Ok(ParticipantsView {
        event: event_view(event),
        participants,
    })
}

pub async fn count_participants(pool: &SqlitePool, event_id: &str) -> Result<i64, AppError> {
    Ok(participant_repo::count_for_event(pool, event_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema;
    use crate::services::event_service::{self, CreateEventRequest};

    async fn test_event(pool: &SqlitePool, max_players: i64) -> String {
        let event = event_service::create_event(
            pool,
            CreateEventRequest {
                name: Some("Evening run".into()),
                sport: Some("running".into()),
                location: Some("Vondelpark gate".into()),
                max_players: Some(max_players),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        event.id
    }

    fn join_as(user_id: &str) -> JoinEventRequest {
        JoinEventRequest {
            player_name: Some(format!("player {user_id}")),
            user_id: Some(user_id.to_string()),
            team: None,
        }
    }

    #[tokio::test]
    async fn join_requires_player_name() {
        let pool = schema::in_memory_pool().await.unwrap();
        let event_id = test_event(&pool, 4).await;
        let err = join_event(&pool, &event_id, JoinEventRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn join_missing_event_is_not_found() {
        let pool = schema::in_memory_pool().await.unwrap();
        let err = join_event(&pool, "nope", join_as("5")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("Event")));
    }

    #[tokio::test]
    async fn capacity_rejects_overflow_join() {
        let pool = schema::in_memory_pool().await.unwrap();
        let event_id = test_event(&pool, 2).await;

        for user in ["1", "2"] {
            assert!(matches!(
                join_event(&pool, &event_id, join_as(user)).await.unwrap(),
                JoinOutcome::Joined(_)
            ));
        }

        let err = join_event(&pool, &event_id, join_as("3")).await.unwrap_err();
        assert!(matches!(err, AppError::EventFull));
        assert_eq!(count_participants(&pool, &event_id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn guests_count_against_capacity() {
        let pool = schema::in_memory_pool().await.unwrap();
        let event_id = test_event(&pool, 1).await;

        let guest = JoinEventRequest {
            player_name: Some("walk-in".into()),
            user_id: None,
            team: None,
        };
        assert!(matches!(
            join_event(&pool, &event_id, guest).await.unwrap(),
            JoinOutcome::Joined(_)
        ));

        let err = join_event(&pool, &event_id, join_as("5")).await.unwrap_err();
        assert!(matches!(err, AppError::EventFull));
    }

    #[tokio::test]
    async fn rejoin_is_idempotent() {
        let pool = schema::in_memory_pool().await.unwrap();
        let event_id = test_event(&pool, 4).await;

        assert!(matches!(
            join_event(&pool, &event_id, join_as("5")).await.unwrap(),
            JoinOutcome::Joined(_)
        ));
        let second = join_event(&pool, &event_id, join_as("5")).await.unwrap();
        assert!(matches!(second, JoinOutcome::AlreadyJoined(_)));
        assert_eq!(count_participants(&pool, &event_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn rejoin_succeeds_even_when_event_is_full() {
        let pool = schema::in_memory_pool().await.unwrap();
        let event_id = test_event(&pool, 1).await;

        join_event(&pool, &event_id, join_as("5")).await.unwrap();
        // The membership check runs before the capacity policy.
        let again = join_event(&pool, &event_id, join_as("5")).await.unwrap();
        assert!(matches!(again, JoinOutcome::AlreadyJoined(_)));
    }

    #[tokio::test]
    async fn duplicate_insert_surfaces_conflict() {
        let pool = schema::in_memory_pool().await.unwrap();
        let event_id = test_event(&pool, 4).await;
        join_event(&pool, &event_id, join_as("5")).await.unwrap();

        // Simulate the race where both requests pass the pre-check: drive
        // the guarded insert directly against the unique index.
        let err = participant_repo::insert_participant_guarded(
            &pool,
            participant_repo::NewParticipant {
                id: "dup",
                event_id: &event_id,
                user_id: Some("5"),
                player_name: "player 5",
                team: "team_a",
            },
        )
        .await
        .unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[tokio::test]
    async fn leave_is_idempotent() {
        let pool = schema::in_memory_pool().await.unwrap();
        let event_id = test_event(&pool, 4).await;

        let outcome = leave_event(
            &pool,
            &event_id,
            LeaveEventRequest {
                user_id: Some("5".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(outcome, LeaveOutcome::NotParticipant);
    }

    #[tokio::test]
    async fn leave_requires_user_id() {
        let pool = schema::in_memory_pool().await.unwrap();
        let event_id = test_event(&pool, 4).await;
        let err = leave_event(&pool, &event_id, LeaveEventRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn list_participants_includes_event_state() {
        let pool = schema::in_memory_pool().await.unwrap();
        let event_id = test_event(&pool, 4).await;
        join_event(&pool, &event_id, join_as("5")).await.unwrap();

        let view = list_participants(&pool, &event_id).await.unwrap();
        assert_eq!(view.event.current_players, 1);
        assert_eq!(view.participants.len(), 1);
        assert_eq!(view.participants[0].team, "team_a");
        assert_eq!(view.participants[0].user_id.as_deref(), Some("5"));

        let err = list_participants(&pool, "nope").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("Event")));
    }

    // Full lifecycle: fill a one-slot event, get bounced, re-join
    // idempotently, free the slot, take it.
    #[tokio::test]
    async fn join_leave_lifecycle_on_single_slot_event() {
        let pool = schema::in_memory_pool().await.unwrap();
        let event_id = test_event(&pool, 1).await;

        assert!(matches!(
            join_event(&pool, &event_id, join_as("5")).await.unwrap(),
            JoinOutcome::Joined(_)
        ));
        assert!(matches!(
            join_event(&pool, &event_id, join_as("6")).await.unwrap_err(),
            AppError::EventFull
        ));
        assert!(matches!(
            join_event(&pool, &event_id, join_as("5")).await.unwrap(),
            JoinOutcome::AlreadyJoined(_)
        ));

        let left = leave_event(
            &pool,
            &event_id,
            LeaveEventRequest {
                user_id: Some("5".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(left, LeaveOutcome::Left);

        assert!(matches!(
            join_event(&pool, &event_id, join_as("6")).await.unwrap(),
            JoinOutcome::Joined(_)
        ));
        assert_eq!(count_participants(&pool, &event_id).await.unwrap(), 1);
    }
}
