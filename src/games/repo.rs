use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::error::AppError;

/// Scheduled game shown in the lobby. Nothing about it is unique except the
/// surrogate key; duration is free text the way the original admin form
/// captured it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Game {
    pub id: i64,
    pub name: String,
    pub duration: Option<String>,
    pub start_time: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}

impl Game {
    /// Lobby ordering: latest-scheduled first, unscheduled games last,
    /// newest id first within a tie.
    pub async fn list(db: &PgPool) -> Result<Vec<Game>, AppError> {
        let games = sqlx::query_as::<_, Game>(
            r#"
            SELECT id, name, duration, start_time, created_at
            FROM games
            ORDER BY start_time DESC NULLS LAST, id DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(games)
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Option<Game>, AppError> {
        let game = sqlx::query_as::<_, Game>(
            "SELECT id, name, duration, start_time, created_at FROM games WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(game)
    }

    pub async fn create(
        db: &PgPool,
        name: &str,
        duration: Option<&str>,
        start_time: Option<OffsetDateTime>,
    ) -> Result<Game, AppError> {
        let game = sqlx::query_as::<_, Game>(
            r#"
            INSERT INTO games (name, duration, start_time)
            VALUES ($1, $2, $3)
            RETURNING id, name, duration, start_time, created_at
            "#,
        )
        .bind(name)
        .bind(duration)
        .bind(start_time)
        .fetch_one(db)
        .await?;
        Ok(game)
    }

    pub async fn delete(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("game"));
        }
        Ok(())
    }

    pub async fn count(db: &PgPool) -> Result<i64, AppError> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM games")
            .fetch_one(db)
            .await?;
        Ok(n)
    }
}
