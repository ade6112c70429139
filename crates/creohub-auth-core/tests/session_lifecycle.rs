//! Session lifecycle tests against in-memory repositories

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use common::{MockSessionRepository, MockUserRepository};
use creohub_auth_core::{
    generate_session_token, hash_password, hash_token, AuthError, AuthService, SessionConfig,
    SessionManager,
};
use creohub_types::UserId;

type Manager = SessionManager<MockSessionRepository, MockUserRepository>;

fn setup() -> (Manager, Arc<MockSessionRepository>, Arc<MockUserRepository>) {
    let sessions = Arc::new(MockSessionRepository::new());
    let users = Arc::new(MockUserRepository::new());
    let manager = SessionManager::new(SessionConfig::default(), Arc::clone(&sessions), Arc::clone(&users))
        .expect("default config is valid");
    (manager, sessions, users)
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_unknown_token_is_invalid() {
    let (manager, _, _) = setup();
    let token = generate_session_token();

    let result = manager.validate_session(token.as_str()).await;
    assert!(matches!(result, Err(AuthError::InvalidToken)));
}

#[tokio::test]
async fn test_malformed_token_is_invalid() {
    let (manager, _, _) = setup();
    let uppercase = "Z".repeat(64);

    for token in ["", "abc", "not a token", uppercase.as_str()] {
        let result = manager.validate_session(token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)), "token {token:?}");
    }
}

#[tokio::test]
async fn test_fresh_session_validates_and_slides() {
    let (manager, sessions, _) = setup();
    let token = manager
        .create_session(UserId(7), Some("10.0.0.1".to_string()), Some("test-agent".to_string()))
        .await
        .unwrap();

    let stored = sessions.get(&hash_token(token.as_str())).unwrap();
    assert_eq!(stored.user_id, 7);
    assert_eq!(stored.ip_address.as_deref(), Some("10.0.0.1"));
    assert!(stored.is_active);

    let before = Utc::now();
    let validated = manager.validate_session(token.as_str()).await.unwrap();
    assert_eq!(validated.user_id, UserId(7));

    let expected = before + chrono::Duration::minutes(30);
    let drift = (validated.expires_at - expected).num_seconds().abs();
    assert!(drift <= 2, "expiry should slide to about now + 30m, drift {drift}s");

    let stored = sessions.get(&hash_token(token.as_str())).unwrap();
    assert_eq!(stored.expires_at, validated.expires_at);
    assert!(stored.last_used_at >= before);
}

#[tokio::test]
async fn test_plaintext_token_never_stored() {
    let (manager, sessions, _) = setup();
    let token = manager.create_session(UserId(1), None, None).await.unwrap();

    assert!(sessions.get(token.as_str()).is_none());
    assert!(sessions.get(&hash_token(token.as_str())).is_some());
}

#[tokio::test]
async fn test_inactive_session_is_invalid() {
    let (manager, sessions, _) = setup();
    let token = generate_session_token();
    sessions.insert_raw(
        &hash_token(token.as_str()),
        3,
        false,
        Utc::now() + chrono::Duration::minutes(10),
    );

    let result = manager.validate_session(token.as_str()).await;
    assert!(matches!(result, Err(AuthError::InvalidToken)));
}

#[tokio::test]
async fn test_expired_session_is_invalid_and_not_extended() {
    let (manager, sessions, _) = setup();
    let token = generate_session_token();
    let hash = hash_token(token.as_str());
    let expired_at = Utc::now() - chrono::Duration::seconds(1);
    sessions.insert_raw(&hash, 3, true, expired_at);

    let result = manager.validate_session(token.as_str()).await;
    assert!(matches!(result, Err(AuthError::InvalidToken)));
    assert_eq!(sessions.get(&hash).unwrap().expires_at, expired_at);
}

#[tokio::test]
async fn test_validation_touches_user_activity() {
    let (manager, _, users) = setup();
    let user_id = users.insert_user("maker@example.com", "unused");
    assert!(users.last_active(user_id).is_none());

    let token = manager.create_session(UserId(user_id), None, None).await.unwrap();
    manager.validate_session(token.as_str()).await.unwrap();

    assert!(users.last_active(user_id).is_some());
}

// =============================================================================
// Revocation
// =============================================================================

#[tokio::test]
async fn test_invalidate_is_idempotent() {
    let (manager, _, _) = setup();
    let token = manager.create_session(UserId(1), None, None).await.unwrap();

    manager.invalidate_session(token.as_str()).await.unwrap();
    manager.invalidate_session(token.as_str()).await.unwrap();

    let result = manager.validate_session(token.as_str()).await;
    assert!(matches!(result, Err(AuthError::InvalidToken)));
}

#[tokio::test]
async fn test_invalidate_unknown_token_is_ok() {
    let (manager, _, _) = setup();
    let token = generate_session_token();

    assert!(manager.invalidate_session(token.as_str()).await.is_ok());
    assert!(manager.invalidate_session("garbage").await.is_ok());
}

#[tokio::test]
async fn test_revoked_rows_are_kept() {
    let (manager, sessions, _) = setup();
    let token = manager.create_session(UserId(1), None, None).await.unwrap();

    manager.invalidate_session(token.as_str()).await.unwrap();

    let row = sessions.get(&hash_token(token.as_str())).unwrap();
    assert!(!row.is_active);
    assert_eq!(sessions.len(), 1);
}

#[tokio::test]
async fn test_invalidate_all_sessions() {
    let (manager, _, _) = setup();
    let a = manager.create_session(UserId(5), None, None).await.unwrap();
    let b = manager.create_session(UserId(5), None, None).await.unwrap();
    let other = manager.create_session(UserId(6), None, None).await.unwrap();

    let changed = manager.invalidate_all_sessions(UserId(5)).await.unwrap();
    assert_eq!(changed, 2);

    assert!(manager.validate_session(a.as_str()).await.is_err());
    assert!(manager.validate_session(b.as_str()).await.is_err());
    assert!(manager.validate_session(other.as_str()).await.is_ok());

    // Nothing left to revoke
    assert_eq!(manager.invalidate_all_sessions(UserId(5)).await.unwrap(), 0);
}

#[tokio::test]
async fn test_concurrent_revoke_and_validate() {
    for _ in 0..50 {
        let (manager, _, _) = setup();
        let token = manager.create_session(UserId(9), None, None).await.unwrap();

        let validator = manager.clone();
        let validate_token = token.clone();
        let validate = tokio::spawn(async move { validator.validate_session(validate_token.as_str()).await });

        let revoker = manager.clone();
        let revoke_token = token.clone();
        let revoke = tokio::spawn(async move { revoker.invalidate_session(revoke_token.as_str()).await });

        let _ = validate.await.unwrap();
        revoke.await.unwrap().unwrap();

        let after = manager.validate_session(token.as_str()).await;
        assert!(matches!(after, Err(AuthError::InvalidToken)));
    }
}

// =============================================================================
// Cleanup and listing
// =============================================================================

#[tokio::test]
async fn test_cleanup_only_touches_expired_active_rows() {
    let (manager, sessions, _) = setup();
    let now = Utc::now();

    sessions.insert_raw("expired-active", 1, true, now - chrono::Duration::minutes(1));
    sessions.insert_raw("expired-inactive", 1, false, now - chrono::Duration::minutes(1));
    sessions.insert_raw("live", 1, true, now + chrono::Duration::minutes(10));

    let changed = manager.cleanup_expired().await.unwrap();
    assert_eq!(changed, 1);

    assert!(!sessions.get("expired-active").unwrap().is_active);
    assert!(!sessions.get("expired-inactive").unwrap().is_active);
    assert!(sessions.get("live").unwrap().is_active);

    assert_eq!(manager.cleanup_expired().await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_sessions_for_user() {
    let (manager, _, _) = setup();
    manager.create_session(UserId(2), Some("1.1.1.1".to_string()), None).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    manager.create_session(UserId(2), Some("2.2.2.2".to_string()), None).await.unwrap();
    manager.create_session(UserId(3), None, None).await.unwrap();

    let listed = manager.list_sessions(UserId(2)).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|s| s.user_id == UserId(2)));
    assert_eq!(listed[0].ip_address.as_deref(), Some("2.2.2.2"));
}

// =============================================================================
// Storage failures
// =============================================================================

#[tokio::test]
async fn test_storage_failure_propagates() {
    let (manager, sessions, _) = setup();
    let token = manager.create_session(UserId(1), None, None).await.unwrap();

    sessions.set_unavailable(true);

    assert!(matches!(
        manager.validate_session(token.as_str()).await,
        Err(AuthError::StorageUnavailable(_))
    ));
    assert!(matches!(
        manager.create_session(UserId(1), None, None).await,
        Err(AuthError::StorageUnavailable(_))
    ));
    assert!(matches!(
        manager.invalidate_session(token.as_str()).await,
        Err(AuthError::StorageUnavailable(_))
    ));
    assert!(matches!(manager.cleanup_expired().await, Err(AuthError::StorageUnavailable(_))));

    sessions.set_unavailable(false);
    assert!(manager.validate_session(token.as_str()).await.is_ok());
}

// =============================================================================
// Login
// =============================================================================

fn auth_service() -> (AuthService<MockUserRepository, MockSessionRepository>, Arc<MockUserRepository>) {
    let sessions = Arc::new(MockSessionRepository::new());
    let users = Arc::new(MockUserRepository::new());
    let service = AuthService::new(SessionConfig::default(), Arc::clone(&users), sessions).unwrap();
    (service, users)
}

#[tokio::test]
async fn test_login_success_creates_session() {
    let (service, users) = auth_service();
    let hash = hash_password("correct horse").unwrap();
    let user_id = users.insert_user("maker@example.com", &hash);

    let outcome = service
        .login("maker@example.com", "correct horse", None, None)
        .await
        .unwrap();
    assert_eq!(outcome.user_id, UserId(user_id));

    let validated = service.authenticate(outcome.token.as_str()).await.unwrap();
    assert_eq!(validated.user_id, UserId(user_id));

    service.logout(outcome.token.as_str()).await.unwrap();
    assert!(service.authenticate(outcome.token.as_str()).await.is_err());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (service, users) = auth_service();
    let hash = hash_password("correct horse").unwrap();
    users.insert_user("maker@example.com", &hash);

    let wrong_password = service.login("maker@example.com", "battery staple", None, None).await;
    let unknown_email = service.login("nobody@example.com", "correct horse", None, None).await;

    assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));
    assert!(matches!(unknown_email, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_unknown_email_costs_a_password_check() {
    let (service, users) = auth_service();
    let hash = hash_password("correct horse").unwrap();
    users.insert_user("maker@example.com", &hash);

    // Warm up both paths, including the lazily built dummy hash
    let _ = service.login("nobody@example.com", "x", None, None).await;
    let _ = service.login("maker@example.com", "x", None, None).await;

    let started = Instant::now();
    let _ = service.login("maker@example.com", "battery staple", None, None).await;
    let wrong_password = started.elapsed();

    let started = Instant::now();
    let _ = service.login("nobody@example.com", "battery staple", None, None).await;
    let unknown_email = started.elapsed();

    assert!(
        unknown_email * 4 >= wrong_password,
        "unknown email took {unknown_email:?}, wrong password took {wrong_password:?}"
    );
}

#[tokio::test]
async fn test_login_reports_stored_expiry() {
    let sessions = Arc::new(MockSessionRepository::new());
    let users = Arc::new(MockUserRepository::new());
    let service = AuthService::new(SessionConfig::default(), Arc::clone(&users), Arc::clone(&sessions)).unwrap();
    users.insert_user("maker@example.com", &hash_password("correct horse").unwrap());

    let outcome = service
        .login("maker@example.com", "correct horse", None, None)
        .await
        .unwrap();

    let stored = sessions.get(&hash_token(outcome.token.as_str())).unwrap();
    assert_eq!(outcome.expires_at, stored.expires_at);
}

#[tokio::test]
async fn test_login_with_corrupt_hash_is_internal() {
    let (service, users) = auth_service();
    users.insert_user("maker@example.com", "not-a-phc-string");

    let result = service.login("maker@example.com", "anything", None, None).await;
    assert!(matches!(result, Err(AuthError::Internal(_))));
}
