#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ParticipantRow {
    pub participant_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub geotag: Option<String>,
    pub status: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}
