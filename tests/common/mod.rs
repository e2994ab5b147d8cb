use gamelobby::auth::repo::User;
use gamelobby::auth::services;
use gamelobby::auth::sessions::Session;
use gamelobby::config::{AppConfig, SessionConfig};
use sqlx::PgPool;

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: String::new(),
        session: SessionConfig { remember_days: 7 },
    }
}

pub async fn register(pool: &PgPool, username: &str, email: &str, pw: &str) -> (Session, User) {
    services::register(pool, &test_config(), username, email, pw)
        .await
        .expect("registration should succeed")
}
