use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;

use crate::admin::dto::{CreateGameRequest, StatsResponse};
use crate::admin::services;
use crate::auth::dto::PublicUser;
use crate::auth::extractors::CurrentIdentity;
use crate::error::AppError;
use crate::games::dto::GameListItem;
use crate::state::AppState;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id/promote", post(promote_user))
        .route("/users/:id/demote", post(demote_user))
        .route("/users/:id", delete(delete_user))
        .route("/stats", get(stats))
        .route("/games", post(create_game))
        .route("/games/:id", delete(delete_game))
}

#[instrument(skip_all)]
pub async fn list_users(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<Vec<PublicUser>>, AppError> {
    let users = services::list_users(&state.db, &identity).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip_all, fields(target_id = id))]
pub async fn promote_user(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    services::promote(&state.db, &identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip_all, fields(target_id = id))]
pub async fn demote_user(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    services::demote(&state.db, &identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip_all, fields(target_id = id))]
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    services::remove_user(&state.db, &identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip_all)]
pub async fn stats(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<StatsResponse>, AppError> {
    Ok(Json(services::stats(&state.db, &identity).await?))
}

#[instrument(skip_all)]
pub async fn create_game(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Json(payload): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameListItem>), AppError> {
    let game = services::create_game(
        &state.db,
        &identity,
        &payload.name,
        payload.duration.as_deref(),
        payload.start_time,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(GameListItem::from(game))))
}

#[instrument(skip_all, fields(game_id = id))]
pub async fn delete_game(
    State(state): State<AppState>,
    CurrentIdentity(identity): CurrentIdentity,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    services::remove_game(&state.db, &identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
