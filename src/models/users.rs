#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub gender: Option<String>,
    pub created_at: String,
    // Discovery fields, populated out of band.
    pub rating: Option<f64>,
    pub location: Option<String>,
    pub sports: Option<String>,
}

/// User plus the number of events they have joined, for the nearby listing.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct NearbyUserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub gender: Option<String>,
    pub created_at: String,
    pub rating: Option<f64>,
    pub location: Option<String>,
    pub sports: Option<String>,
    pub events_count: i64,
}
