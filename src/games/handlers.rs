use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;

use crate::auth::extractors::AuthUser;
use crate::error::AppError;
use crate::games::dto::{GameListItem, GameSummary};
use crate::games::repo::Game;
use crate::state::AppState;

pub fn lobby_routes() -> Router<AppState> {
    Router::new().route("/lobby/games", get(list_games))
}

pub fn summary_routes() -> Router<AppState> {
    Router::new().route("/games/:id/summary", get(game_summary))
}

/// Lobby listing; the only gate on this read path is an authenticated caller.
#[instrument(skip_all)]
pub async fn list_games(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> Result<Json<Vec<GameListItem>>, AppError> {
    let games = Game::list(&state.db).await?;
    Ok(Json(games.into_iter().map(GameListItem::from).collect()))
}

/// Public summary for the game page script.
#[instrument(skip(state))]
pub async fn game_summary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<GameSummary>, AppError> {
    let game = Game::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("game"))?;
    Ok(Json(GameSummary::from_game_at(game, OffsetDateTime::now_utc())))
}
