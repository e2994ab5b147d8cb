use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::info;

use crate::admin::dto::StatsResponse;
use crate::auth::identity::Identity;
use crate::auth::repo::User;
use crate::auth::sessions::Session;
use crate::error::AppError;
use crate::games::repo::Game;

// Every directory operation goes through `require_admin` before touching the
// store; a Forbidden outcome means nothing was mutated.

pub async fn promote(db: &PgPool, identity: &Identity, target_id: i64) -> Result<(), AppError> {
    let actor = identity.require_admin()?;
    User::set_admin(db, target_id, true).await?;
    info!(actor_id = actor.id, target_id, "user promoted to admin");
    Ok(())
}

/// An admin can never strip their own admin flag through this operation.
pub async fn demote(db: &PgPool, identity: &Identity, target_id: i64) -> Result<(), AppError> {
    let actor = identity.require_admin()?;
    if actor.id == target_id {
        return Err(AppError::SelfDemotion);
    }
    User::set_admin(db, target_id, false).await?;
    info!(actor_id = actor.id, target_id, "user demoted");
    Ok(())
}

/// Deletes the account and its sessions; self-deletion through the admin
/// directory is rejected.
pub async fn remove_user(db: &PgPool, identity: &Identity, target_id: i64) -> Result<(), AppError> {
    let actor = identity.require_admin()?;
    if actor.id == target_id {
        return Err(AppError::SelfDeletion);
    }
    User::delete(db, target_id).await?;
    Session::delete_for_user(db, target_id).await?;
    info!(actor_id = actor.id, target_id, "user deleted");
    Ok(())
}

pub async fn list_users(db: &PgPool, identity: &Identity) -> Result<Vec<User>, AppError> {
    identity.require_admin()?;
    User::list(db).await
}

pub async fn stats(db: &PgPool, identity: &Identity) -> Result<StatsResponse, AppError> {
    identity.require_admin()?;
    Ok(StatsResponse {
        total_users: User::count(db).await?,
        admin_users: User::count_admins(db).await?,
        total_games: Game::count(db).await?,
    })
}

pub async fn create_game(
    db: &PgPool,
    identity: &Identity,
    name: &str,
    duration: Option<&str>,
    start_time: Option<OffsetDateTime>,
) -> Result<Game, AppError> {
    let actor = identity.require_admin()?;
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("game name is required".into()));
    }
    let game = Game::create(db, name, duration, start_time).await?;
    info!(actor_id = actor.id, game_id = game.id, "game created");
    Ok(game)
}

pub async fn remove_game(db: &PgPool, identity: &Identity, game_id: i64) -> Result<(), AppError> {
    let actor = identity.require_admin()?;
    Game::delete(db, game_id).await?;
    info!(actor_id = actor.id, game_id, "game deleted");
    Ok(())
}
