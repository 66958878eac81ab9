//! Authentication integration tests.
//!
//! Tests for critical authentication flows including:
//! - Password hashing
//! - User registration and its validation failures
//! - Login with valid/invalid credentials
//! - Session cookie lifecycle and logout idempotency
//!
//! Run with: `cargo test --test auth_test`

mod helpers;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use helpers::{register_user, TestApp, TEST_PASSWORD};
use uw_server::auth::{hash_password, verify_password};

// ============================================================================
// Password Hashing Tests (Unit tests - no database required)
// ============================================================================

#[test]
fn test_password_hash_and_verify_success() {
    let password = "secure_password_123!";
    let hash = hash_password(password).expect("Hashing should succeed");

    // Hash should be different from password
    assert_ne!(hash, password);

    // Verification should succeed
    let verified = verify_password(password, &hash).expect("Verification should succeed");
    assert!(verified, "Correct password should verify");
}

#[test]
fn test_password_verify_wrong_password() {
    let hash = hash_password("correct_password").expect("Hashing should succeed");

    let verified = verify_password("wrong_password", &hash).expect("Verification should succeed");
    assert!(!verified, "Wrong password should not verify");
}

#[test]
fn test_password_hash_produces_unique_hashes() {
    let password = "same_password";

    let hash1 = hash_password(password).expect("Hashing should succeed");
    let hash2 = hash_password(password).expect("Hashing should succeed");

    // Same password should produce different hashes (due to salt)
    assert_ne!(
        hash1, hash2,
        "Argon2 should produce unique hashes with different salts"
    );

    assert!(verify_password(password, &hash1).unwrap());
    assert!(verify_password(password, &hash2).unwrap());
}

// ============================================================================
// Registration
// ============================================================================

#[sqlx::test]
async fn test_register_creates_user_with_session(pool: PgPool) {
    let app = TestApp::new(pool);

    let response = app
        .post(
            "/api/register",
            None,
            json!({
                "username": "newuser",
                "email": "newuser@example.com",
                "password": TEST_PASSWORD,
                "confirmPassword": TEST_PASSWORD,
                "displayName": "New User",
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["username"], "newuser");
    assert_eq!(response.body["role"], "user");
    assert_eq!(response.body["displayName"], "New User");
    // The credential hash never appears on the wire
    assert!(response.body.get("passwordHash").is_none());
    assert!(response.body.get("password_hash").is_none());

    let cookie = response.session_cookie().expect("Session cookie expected");
    let me = app.get("/api/user", Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["username"], "newuser");
}

#[sqlx::test]
async fn test_register_password_mismatch_names_confirmation_field(pool: PgPool) {
    let app = TestApp::new(pool);

    let response = app
        .post(
            "/api/register",
            None,
            json!({
                "username": "mismatch",
                "email": "mismatch@example.com",
                "password": TEST_PASSWORD,
                "confirmPassword": "different_password",
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    let message = response.body["message"].as_str().unwrap_or_default();
    assert!(
        message.contains("confirmPassword"),
        "message should reference the confirmation field: {message}"
    );
}

#[sqlx::test]
async fn test_register_duplicate_username_is_a_conflict(pool: PgPool) {
    let app = TestApp::new(pool);
    register_user(&app, "taken").await;

    let response = app
        .post(
            "/api/register",
            None,
            json!({
                "username": "taken",
                "email": "other@example.com",
                "password": TEST_PASSWORD,
                "confirmPassword": TEST_PASSWORD,
            }),
        )
        .await;

    // Distinct from a generic internal error
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "USER_EXISTS");
}

#[sqlx::test]
async fn test_register_rejects_bad_usernames(pool: PgPool) {
    let app = TestApp::new(pool);

    for username in ["ab", "Has Spaces", "UPPER"] {
        let response = app
            .post(
                "/api/register",
                None,
                json!({
                    "username": username,
                    "email": "bad@example.com",
                    "password": TEST_PASSWORD,
                    "confirmPassword": TEST_PASSWORD,
                }),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::BAD_REQUEST,
            "{username} should be rejected"
        );
    }
}

// ============================================================================
// Login / Logout
// ============================================================================

#[sqlx::test]
async fn test_login_with_valid_credentials(pool: PgPool) {
    let app = TestApp::new(pool);
    register_user(&app, "loginuser").await;

    let response = app
        .post(
            "/api/login",
            None,
            json!({ "username": "loginuser", "password": TEST_PASSWORD }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["username"], "loginuser");
    assert!(response.session_cookie().is_some());
}

#[sqlx::test]
async fn test_login_failures_are_indistinguishable(pool: PgPool) {
    let app = TestApp::new(pool);
    register_user(&app, "present").await;

    let wrong_password = app
        .post(
            "/api/login",
            None,
            json!({ "username": "present", "password": "not_the_password" }),
        )
        .await;
    let unknown_user = app
        .post(
            "/api/login",
            None,
            json!({ "username": "absent", "password": TEST_PASSWORD }),
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body["error"], unknown_user.body["error"]);
}

#[sqlx::test]
async fn test_current_user_requires_session(pool: PgPool) {
    let app = TestApp::new(pool);

    let response = app.get("/api/user", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let garbage = app.get("/api/user", Some("uw_session=bogus")).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test]
async fn test_logout_invalidates_session_and_is_idempotent(pool: PgPool) {
    let app = TestApp::new(pool);
    let cookie = register_user(&app, "leaver").await;

    let response = app.post_empty("/api/logout", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    // The old cookie no longer resolves
    let me = app.get("/api/user", Some(&cookie)).await;
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);

    // Logging out again, or without any session, still succeeds
    let again = app.post_empty("/api/logout", Some(&cookie)).await;
    assert_eq!(again.status, StatusCode::NO_CONTENT);
    let anonymous = app.post_empty("/api/logout", None).await;
    assert_eq!(anonymous.status, StatusCode::NO_CONTENT);
}

// ============================================================================
// Profile
// ============================================================================

#[sqlx::test]
async fn test_update_profile_sets_and_clears_fields(pool: PgPool) {
    let app = TestApp::new(pool);
    let cookie = register_user(&app, "profiled").await;

    let response = app
        .patch(
            "/api/user",
            Some(&cookie),
            json!({ "displayName": "Shiny Name", "avatarUrl": "https://cdn.example.com/a.png" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["displayName"], "Shiny Name");

    // Empty string clears the field; the other is untouched
    let response = app
        .patch("/api/user", Some(&cookie), json!({ "displayName": "" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["displayName"].is_null());
    assert_eq!(response.body["avatarUrl"], "https://cdn.example.com/a.png");
}
