use serde::Serialize;
use time::OffsetDateTime;

use crate::games::repo::Game;

// Fixed fallbacks the page script expects when a game has no stored value.
// Field names and defaults mirror the original payload, so they stay as-is.
const DEFAULT_DURATION: &str = "10 минут";
const PLACEHOLDER_PLAYERS: i32 = 1;
const PLACEHOLDER_MAX_PLAYERS: i32 = 8;
const PLACEHOLDER_DESCRIPTION: &str = "Увлекательное приключение в мире фэнтези";
const PLACEHOLDER_PLAYERS_LIST: &[&str] = &["Игрок123"];

#[derive(Debug, Serialize)]
pub struct GameListItem {
    pub id: i64,
    pub name: String,
    pub duration: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Game> for GameListItem {
    fn from(game: Game) -> Self {
        Self {
            id: game.id,
            name: game.name,
            duration: game.duration,
            start_time: game.start_time,
            created_at: game.created_at,
        }
    }
}

/// JSON consumed by the game page script; missing values fall back to the
/// fixed defaults above.
#[derive(Debug, Serialize)]
pub struct GameSummary {
    pub id: i64,
    pub name: String,
    pub duration: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    pub players: i32,
    #[serde(rename = "maxPlayers")]
    pub max_players: i32,
    pub description: String,
    #[serde(rename = "playersList")]
    pub players_list: Vec<String>,
}

impl GameSummary {
    pub fn from_game_at(game: Game, now: OffsetDateTime) -> Self {
        Self {
            id: game.id,
            name: game.name,
            duration: game.duration.unwrap_or_else(|| DEFAULT_DURATION.to_string()),
            start_time: game.start_time.unwrap_or(now),
            players: PLACEHOLDER_PLAYERS,
            max_players: PLACEHOLDER_MAX_PLAYERS,
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            players_list: PLACEHOLDER_PLAYERS_LIST
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
