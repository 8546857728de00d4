use sqlx::SqlitePool;

use crate::models::{NearbyUserRow, UserRow};

pub struct NewUser<'a> {
    pub id: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub bio: Option<&'a str>,
    pub gender: Option<&'a str>,
}

const SQL_INSERT_USER: &str = r#"
INSERT INTO users (id, username, email, bio, gender, created_at)
VALUES (?, ?, ?, ?, ?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
"#;

pub async fn insert_user(pool: &SqlitePool, user: NewUser<'_>) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_USER)
        .bind(user.id)
        .bind(user.username)
        .bind(user.email)
        .bind(user.bio)
        .bind(user.gender)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_GET_USER: &str = r#"
SELECT id, username, email, bio, gender, created_at, rating, location, sports
FROM users
WHERE id = ?
"#;

pub async fn get_user(pool: &SqlitePool, user_id: &str) -> sqlx::Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(SQL_GET_USER)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

const SQL_LIST_WITH_JOIN_COUNTS: &str = r#"
SELECT
  u.id,
  u.username,
  u.email,
  u.bio,
  u.gender,
  u.created_at,
  u.rating,
  u.location,
  u.sports,
  (SELECT COUNT(*) FROM event_participants p WHERE p.user_id = u.id) AS events_count
FROM users u
ORDER BY u.username ASC
"#;

pub async fn list_with_join_counts(pool: &SqlitePool) -> sqlx::Result<Vec<NearbyUserRow>> {
    sqlx::query_as::<_, NearbyUserRow>(SQL_LIST_WITH_JOIN_COUNTS)
        .fetch_all(pool)
        .await
}
