#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FollowRow {
    pub id: String,
    pub follower_id: String,
    pub followee_id: String,
    pub created_at: String,
}
