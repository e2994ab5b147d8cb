use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::auth::identity::Identity;
use crate::auth::repo::User;
use crate::auth::services;
use crate::error::AppError;
use crate::state::AppState;

/// Pull `Bearer <uuid>` out of the Authorization header, if any.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<Uuid> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?;
    Uuid::parse_str(token.trim()).ok()
}

/// Resolves the caller without rejecting: no header, a malformed token, an
/// expired session and a deleted user all yield `Identity::Anonymous`.
pub struct CurrentIdentity(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for CurrentIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = match bearer_token(&parts.headers) {
            Some(token) => services::resolve(&state.db, token).await?,
            None => Identity::Anonymous,
        };
        Ok(CurrentIdentity(identity))
    }
}

/// Requires an authenticated caller; anonymous requests are rejected with 401.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentIdentity(identity) = CurrentIdentity::from_request_parts(parts, state).await?;
        match identity {
            Identity::Known(user) => Ok(AuthUser(user)),
            Identity::Anonymous => Err(AppError::Unauthorized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let (parts, _) = Request::builder()
            .uri("/lobby/games")
            .header(header::AUTHORIZATION, value)
            .body(())
            .unwrap()
            .into_parts();
        parts.headers
    }

    #[test]
    fn bearer_token_parses_uuid() {
        let token = Uuid::new_v4();
        let headers = headers_with_auth(&format!("Bearer {token}"));
        assert_eq!(bearer_token(&headers), Some(token));
    }

    #[test]
    fn lowercase_scheme_is_accepted() {
        let token = Uuid::new_v4();
        let headers = headers_with_auth(&format!("bearer {token}"));
        assert_eq!(bearer_token(&headers), Some(token));
    }

    #[test]
    fn missing_header_and_garbage_yield_none() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers_with_auth("Bearer not-a-uuid")), None);
        assert_eq!(bearer_token(&headers_with_auth("Basic dXNlcjpwdw==")), None);
    }
}
