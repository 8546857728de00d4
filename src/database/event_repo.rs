use sqlx::SqlitePool;

use crate::models::EventRow;

// Shared projection: stored columns plus the live participant count and
// the host username. Keeping it in one place keeps every event read
// consistent about `current_players`.
const SQL_SELECT_EVENT: &str = r#"
SELECT
  e.id,
  e.name,
  e.sport,
  e.location,
  e.notes,
  e.max_players,
  (SELECT COUNT(*) FROM event_participants p WHERE p.event_id = e.id) AS current_players,
  e.created_at,
  e.event_date,
  e.latitude,
  e.longitude,
  e.skill_level,
  e.host_user_id,
  u.username AS host_username
FROM events e
LEFT JOIN users u ON u.id = e.host_user_id
"#;

pub struct NewEvent<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub sport: &'a str,
    pub location: &'a str,
    pub notes: Option<&'a str>,
    pub max_players: i64,
    pub event_date: Option<&'a str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub skill_level: Option<&'a str>,
    pub host_user_id: Option<&'a str>,
}

const SQL_INSERT_EVENT: &str = r#"
INSERT INTO events (
  id,
  name,
  sport,
  location,
  notes,
  max_players,
  event_date,
  latitude,
  longitude,
  skill_level,
  host_user_id,
  created_at
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
"#;

pub async fn insert_event(pool: &SqlitePool, event: NewEvent<'_>) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_EVENT)
        .bind(event.id)
        .bind(event.name)
        .bind(event.sport)
        .bind(event.location)
        .bind(event.notes)
        .bind(event.max_players)
        .bind(event.event_date)
        .bind(event.latitude)
        .bind(event.longitude)
        .bind(event.skill_level)
        .bind(event.host_user_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn get_event(pool: &SqlitePool, event_id: &str) -> sqlx::Result<Option<EventRow>> {
    let sql = format!("{SQL_SELECT_EVENT} WHERE e.id = ?");
    sqlx::query_as::<_, EventRow>(&sql)
        .bind(event_id)
        .fetch_optional(pool)
        .await
}

/// All events, newest first.
pub async fn list_events(pool: &SqlitePool) -> sqlx::Result<Vec<EventRow>> {
    let sql = format!("{SQL_SELECT_EVENT} ORDER BY datetime(e.created_at) DESC");
    sqlx::query_as::<_, EventRow>(&sql).fetch_all(pool).await
}

/// Events the given user joined, via their participant rows.
pub async fn list_events_joined_by(
    pool: &SqlitePool,
    user_id: &str,
) -> sqlx::Result<Vec<EventRow>> {
    let sql = format!(
        "{SQL_SELECT_EVENT} \
         JOIN event_participants me ON me.event_id = e.id AND me.user_id = ? \
         ORDER BY datetime(me.joined_at) ASC"
    );
    sqlx::query_as::<_, EventRow>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn list_events_hosted_by(
    pool: &SqlitePool,
    user_id: &str,
) -> sqlx::Result<Vec<EventRow>> {
    let sql = format!(
        "{SQL_SELECT_EVENT} WHERE e.host_user_id = ? ORDER BY datetime(e.created_at) DESC"
    );
    sqlx::query_as::<_, EventRow>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await
}
