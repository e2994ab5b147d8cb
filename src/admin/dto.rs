use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Read-only aggregate snapshot; counts may interleave with concurrent
/// writes, which is fine at this scale.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_users: i64,
    pub admin_users: i64,
    pub total_games: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub name: String,
    pub duration: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,
}
