use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::auth::dto::{AuthResponse, LoginRequest, PublicUser, RegisterRequest};
use crate::auth::extractors::{bearer_token, AuthUser};
use crate::auth::services;
use crate::error::AppError;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let (session, user) = services::register(
        &state.db,
        &state.config,
        &payload.username,
        &payload.email,
        &payload.password,
    )
    .await?;
    Ok(Json(AuthResponse {
        token: session.token,
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let (session, user) =
        services::login(&state.db, &state.config, &payload.email, &payload.password).await?;
    Ok(Json(AuthResponse {
        token: session.token,
        user: PublicUser::from(user),
    }))
}

/// Always 204: logging out twice, or with an expired or bogus token, is a
/// no-op rather than an error.
#[instrument(skip(state, headers))]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    if let Some(token) = bearer_token(&headers) {
        services::logout(&state.db, token).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(user))]
pub async fn get_me(AuthUser(user): AuthUser) -> Result<Json<PublicUser>, AppError> {
    Ok(Json(PublicUser::from(user)))
}
