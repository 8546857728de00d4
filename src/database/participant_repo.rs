use sqlx::SqlitePool;

use crate::models::EventParticipantRow;

pub struct NewParticipant<'a> {
    pub id: &'a str,
    pub event_id: &'a str,
    pub user_id: Option<&'a str>,
    pub player_name: &'a str,
    pub team: &'a str,
}

// Capacity lives in this statement: the insert only lands while the live
// count is below max_players, so two near-simultaneous joins to the last
// slot cannot both succeed. Zero rows affected means the event was full.
const SQL_INSERT_PARTICIPANT_GUARDED: &str = r#"
INSERT INTO event_participants (id, event_id, user_id, player_name, team, joined_at)
SELECT ?1, ?2, ?3, ?4, ?5, strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
WHERE (SELECT COUNT(*) FROM event_participants WHERE event_id = ?2)
    < (SELECT max_players FROM events WHERE id = ?2)
"#;

pub async fn insert_participant_guarded(
    pool: &SqlitePool,
    participant: NewParticipant<'_>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_PARTICIPANT_GUARDED)
        .bind(participant.id)
        .bind(participant.event_id)
        .bind(participant.user_id)
        .bind(participant.player_name)
        .bind(participant.team)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_FIND_BY_EVENT_AND_USER: &str = r#"
SELECT id, event_id, user_id, player_name, team, joined_at
FROM event_participants
WHERE event_id = ? AND user_id = ?
"#;

pub async fn find_by_event_and_user(
    pool: &SqlitePool,
    event_id: &str,
    user_id: &str,
) -> sqlx::Result<Option<EventParticipantRow>> {
    sqlx::query_as::<_, EventParticipantRow>(SQL_FIND_BY_EVENT_AND_USER)
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

const SQL_LIST_FOR_EVENT: &str = r#"
SELECT id, event_id, user_id, player_name, team, joined_at
FROM event_participants
WHERE event_id = ?
ORDER BY datetime(joined_at) ASC
"#;

pub async fn list_for_event(
    pool: &SqlitePool,
    event_id: &str,
) -> sqlx::Result<Vec<EventParticipantRow>> {
    sqlx::query_as::<_, EventParticipantRow>(SQL_LIST_FOR_EVENT)
        .bind(event_id)
        .fetch_all(pool)
        .await
}

const SQL_DELETE_BY_EVENT_AND_USER: &str = r#"
DELETE FROM event_participants
WHERE event_id = ? AND user_id = ?
"#;

pub async fn delete_by_event_and_user(
    pool: &SqlitePool,
    event_id: &str,
    user_id: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_BY_EVENT_AND_USER)
        .bind(event_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_COUNT_FOR_EVENT: &str = r#"
SELECT COUNT(*) FROM event_participants WHERE event_id = ?
"#;

pub async fn count_for_event(pool: &SqlitePool, event_id: &str) -> sqlx::Result<i64> {
    sqlx::query_scalar(SQL_COUNT_FOR_EVENT)
        .bind(event_id)
        .fetch_one(pool)
        .await
}
