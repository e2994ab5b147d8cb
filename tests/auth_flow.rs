mod common;

use common::{register, test_config};
use gamelobby::auth::identity::Identity;
use gamelobby::auth::repo::User;
use gamelobby::auth::services;
use gamelobby::auth::sessions::Session;
use gamelobby::error::AppError;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn register_then_resolve_yields_the_new_identity(pool: PgPool) {
    let (session, user) = register(&pool, "alice", "a@x.com", "pw1").await;

    match services::resolve(&pool, session.token).await.unwrap() {
        Identity::Known(resolved) => {
            assert_eq!(resolved.id, user.id);
            assert_eq!(resolved.username, "alice");
            assert_eq!(resolved.email, "a@x.com");
        }
        Identity::Anonymous => panic!("fresh session should resolve to the new user"),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn first_user_is_admin_second_is_not(pool: PgPool) {
    let (_, alice) = register(&pool, "alice", "a@x.com", "pw1").await;
    let (_, bob) = register(&pool, "bob", "b@x.com", "pw2").await;

    assert!(alice.is_admin, "bootstrap user must be admin");
    assert!(!bob.is_admin, "every later user starts as non-admin");
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_username_or_email_is_rejected_without_mutation(pool: PgPool) {
    register(&pool, "alice", "a@x.com", "pw1").await;
    let before = User::count(&pool).await.unwrap();

    let same_username =
        services::register(&pool, &test_config(), "alice", "other@x.com", "pw").await;
    assert!(matches!(same_username, Err(AppError::DuplicateIdentity)));

    let same_email = services::register(&pool, &test_config(), "other", "a@x.com", "pw").await;
    assert!(matches!(same_email, Err(AppError::DuplicateIdentity)));

    assert_eq!(User::count(&pool).await.unwrap(), before);
}

#[sqlx::test(migrations = "./migrations")]
async fn failed_registration_creates_no_session(pool: PgPool) {
    let err = services::register(&pool, &test_config(), "alice", "a@x.com", "  ")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(User::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn wrong_email_and_wrong_password_are_indistinguishable(pool: PgPool) {
    register(&pool, "alice", "a@x.com", "pw1").await;

    let wrong_password = services::login(&pool, &test_config(), "a@x.com", "nope")
        .await
        .unwrap_err();
    let wrong_email = services::login(&pool, &test_config(), "nobody@x.com", "pw1")
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AppError::InvalidCredentials));
    assert!(matches!(wrong_email, AppError::InvalidCredentials));
}

#[sqlx::test(migrations = "./migrations")]
async fn login_issues_a_fresh_working_session(pool: PgPool) {
    let (_, user) = register(&pool, "alice", "a@x.com", "pw1").await;

    let (session, logged_in) = services::login(&pool, &test_config(), "a@x.com", "pw1")
        .await
        .unwrap();
    assert_eq!(logged_in.id, user.id);

    let identity = services::resolve(&pool, session.token).await.unwrap();
    assert_eq!(identity.user().map(|u| u.id), Some(user.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn password_with_surrounding_whitespace_round_trips(pool: PgPool) {
    let (_, user) = register(&pool, "alice", "a@x.com", " pw1 ").await;

    // login must accept the exact string the account was registered with
    let (_, logged_in) = services::login(&pool, &test_config(), "a@x.com", " pw1 ")
        .await
        .expect("registered password should log in unchanged");
    assert_eq!(logged_in.id, user.id);

    // and the trimmed variant is a different credential
    assert!(matches!(
        services::login(&pool, &test_config(), "a@x.com", "pw1").await,
        Err(AppError::InvalidCredentials)
    ));
}

#[sqlx::test(migrations = "./migrations")]
async fn logout_invalidates_and_is_idempotent(pool: PgPool) {
    let (session, _) = register(&pool, "alice", "a@x.com", "pw1").await;

    services::logout(&pool, session.token).await.unwrap();
    assert!(matches!(
        services::resolve(&pool, session.token).await.unwrap(),
        Identity::Anonymous
    ));

    // Second logout of the same token is a no-op, not an error.
    services::logout(&pool, session.token).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
async fn unknown_token_resolves_anonymous(pool: PgPool) {
    let identity = services::resolve(&pool, Uuid::new_v4()).await.unwrap();
    assert!(matches!(identity, Identity::Anonymous));
}

#[sqlx::test(migrations = "./migrations")]
async fn expired_session_resolves_anonymous_and_is_evicted(pool: PgPool) {
    let (_, user) = register(&pool, "alice", "a@x.com", "pw1").await;

    // remember window of zero days puts the expiry at creation time
    let session = Session::create(&pool, user.id, 0).await.unwrap();
    assert!(matches!(
        services::resolve(&pool, session.token).await.unwrap(),
        Identity::Anonymous
    ));

    // lazy eviction dropped the row
    assert!(Session::find(&pool, session.token).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn session_of_a_deleted_user_resolves_anonymous(pool: PgPool) {
    register(&pool, "alice", "a@x.com", "pw1").await;
    let (session, bob) = register(&pool, "bob", "b@x.com", "pw2").await;

    User::delete(&pool, bob.id).await.unwrap();

    assert!(matches!(
        services::resolve(&pool, session.token).await.unwrap(),
        Identity::Anonymous
    ));
}
