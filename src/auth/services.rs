use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::auth::identity::Identity;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::repo::User;
use crate::auth::sessions::Session;
use crate::config::AppConfig;
use crate::error::AppError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Trimmed, validated registration fields.
pub struct RegistrationFields {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
) -> Result<RegistrationFields, AppError> {
    let username = username.trim();
    let email = email.trim().to_lowercase();

    if username.is_empty() {
        return Err(AppError::Validation("username is required".into()));
    }
    if email.is_empty() {
        return Err(AppError::Validation("email is required".into()));
    }
    if !is_valid_email(&email) {
        return Err(AppError::Validation("email is not valid".into()));
    }
    if password.trim().is_empty() {
        return Err(AppError::Validation("password is required".into()));
    }

    // The password is required to be non-blank, but is hashed exactly as
    // submitted; login verifies the submitted string, so the two sides must
    // agree byte for byte.
    Ok(RegistrationFields {
        username: username.to_string(),
        email,
        password: password.to_string(),
    })
}

/// Create the account and establish a session for it. No session is created
/// when user creation fails.
pub async fn register(
    db: &PgPool,
    config: &AppConfig,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(Session, User), AppError> {
    let fields = validate_registration(username, email, password)?;
    let hash = hash_password(&fields.password)?;
    let user = User::create(db, &fields.username, &fields.email, &hash).await?;
    let session = Session::create(db, user.id, config.session.remember_days).await?;
    info!(user_id = user.id, username = %user.username, is_admin = user.is_admin, "user registered");
    Ok((session, user))
}

/// The same `InvalidCredentials` comes back for an unknown email and for a
/// wrong password, so a caller cannot probe which one failed.
pub async fn login(
    db: &PgPool,
    config: &AppConfig,
    email: &str,
    password: &str,
) -> Result<(Session, User), AppError> {
    let email = email.trim().to_lowercase();

    let user = match User::find_by_email(db, &email).await? {
        Some(user) => user,
        None => {
            warn!(email = %email, "login with unknown email");
            return Err(AppError::InvalidCredentials);
        }
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.id, "login with wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let session = Session::create(db, user.id, config.session.remember_days).await?;
    info!(user_id = user.id, "user logged in");
    Ok((session, user))
}

/// Resolve a token to an identity. Unknown token, expired session and a
/// session whose user has since been deleted all come back `Anonymous`;
/// expired rows are dropped on sight (lazy eviction, no background sweep).
pub async fn resolve(db: &PgPool, token: Uuid) -> Result<Identity, AppError> {
    let session = match Session::find(db, token).await? {
        Some(session) => session,
        None => return Ok(Identity::Anonymous),
    };

    if session.is_expired_at(time::OffsetDateTime::now_utc()) {
        debug!(user_id = session.user_id, "session expired");
        Session::delete(db, token).await?;
        return Ok(Identity::Anonymous);
    }

    match User::find_by_id(db, session.user_id).await? {
        Some(user) => Ok(Identity::Known(user)),
        None => {
            // User deleted out from under the session.
            debug!(user_id = session.user_id, "session references a deleted user");
            Ok(Identity::Anonymous)
        }
    }
}

/// Invalidate a session. Idempotent: a second logout, or logout of an
/// already-expired token, is not an error.
pub async fn logout(db: &PgPool, token: Uuid) -> Result<(), AppError> {
    Session::delete(db, token).await
}
