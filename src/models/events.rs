/// Event row as the repos load it: stored columns plus the live
/// participant count and the host username resolved in SQL.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
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
    pub host_username: Option<String>,
}
