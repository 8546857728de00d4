use serde::Serialize;

// Row shape doubles as the API representation, so Serialize lives here.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct EventParticipantRow {
    pub id: String,
    pub event_id: String,
    pub user_id: Option<String>,
    pub player_name: String,
    pub team: String,
    pub joined_at: String,
}
