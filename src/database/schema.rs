use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Connect and bring the schema up to date. Tables are created on first
/// boot; reruns are no-ops.
pub async fn connect_pool(database_url: &str) -> sqlx::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// In-memory database for tests. Must stay on a single connection: every
/// new connection to `sqlite::memory:` is a fresh empty database.
pub async fn in_memory_pool() -> sqlx::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

async fn run_migrations(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            sport TEXT NOT NULL,
            location TEXT NOT NULL,
            notes TEXT,
            max_players INTEGER NOT NULL,
            event_date TEXT,
            latitude REAL,
            longitude REAL,
            skill_level TEXT,
            host_user_id TEXT,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // The partial unique index is what makes duplicate joins by the same
    // user impossible under concurrent requests; guests (NULL user_id) may
    // appear any number of times.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS event_participants (
            id TEXT PRIMARY KEY,
            event_id TEXT NOT NULL,
            user_id TEXT,
            player_name TEXT NOT NULL,
            team TEXT NOT NULL DEFAULT 'team_a',
            joined_at TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_participants_event_user
            ON event_participants(event_id, user_id)
            WHERE user_id IS NOT NULL;

        CREATE INDEX IF NOT EXISTS idx_participants_event
            ON event_participants(event_id);
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            bio TEXT,
            gender TEXT,
            created_at TEXT NOT NULL,
            rating REAL,
            location TEXT,
            sports TEXT
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS follows (
            id TEXT PRIMARY KEY,
            follower_id TEXT NOT NULL,
            followee_id TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE(follower_id, followee_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = in_memory_pool().await.unwrap();
        run_migrations(&pool).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        for expected in ["event_participants", "events", "follows", "users"] {
            assert!(tables.iter().any(|t| t == expected), "missing {expected}");
        }
    }
}
