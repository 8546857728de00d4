use sqlx::SqlitePool;

use crate::models::FollowRow;

pub struct NewFollow<'a> {
    pub id: &'a str,
    pub follower_id: &'a str,
    pub followee_id: &'a str,
}

const SQL_INSERT_FOLLOW: &str = r#"
INSERT INTO follows (id, follower_id, followee_id, created_at)
VALUES (?, ?, ?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
"#;

pub async fn insert_follow(pool: &SqlitePool, follow: NewFollow<'_>) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_FOLLOW)
        .bind(follow.id)
        .bind(follow.follower_id)
        .bind(follow.followee_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_FIND_FOLLOW: &str = r#"
SELECT id, follower_id, followee_id, created_at
FROM follows
WHERE follower_id = ? AND followee_id = ?
"#;

pub async fn find_follow(
    pool: &SqlitePool,
    follower_id: &str,
    followee_id: &str,
) -> sqlx::Result<Option<FollowRow>> {
    sqlx::query_as::<_, FollowRow>(SQL_FIND_FOLLOW)
        .bind(follower_id)
        .bind(followee_id)
        .fetch_optional(pool)
        .await
}

const SQL_DELETE_FOLLOW: &str = r#"
DELETE FROM follows
WHERE follower_id = ? AND followee_id = ?
"#;

pub async fn delete_follow(
    pool: &SqlitePool,
    follower_id: &str,
    followee_id: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_FOLLOW)
        .bind(follower_id)
        .bind(followee_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
