//! Authentication HTTP Handlers

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use chrono::{Duration, Utc};
use serde::Deserialize;
use validator::Validate;

use super::error::{AuthError, AuthResult};
use super::middleware::AuthUser;
use super::password::{hash_password, verify_password};
use super::session::{
    clear_session_cookie, generate_session_token, hash_token, session_cookie, SESSION_COOKIE,
};
use crate::api::AppState;
use crate::db::{
    self, create_session, delete_session, email_exists, find_user_by_id, find_user_by_username,
    username_exists, User,
};

// ============================================================================
// Request Types
// ============================================================================

/// Registration request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Username (3-32 lowercase alphanumeric + underscore).
    #[validate(length(min = 3, max = 32, message = "username must be 3-32 characters"))]
    pub username: String,
    /// Email address.
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    /// Password (8-128 characters).
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,
    /// Password confirmation; must match `password`.
    pub confirm_password: String,
    /// Display name (optional).
    #[validate(length(max = 64, message = "display name must be at most 64 characters"))]
    pub display_name: Option<String>,
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Update own profile request. Empty strings clear the field.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New display name.
    #[validate(length(max = 64, message = "display name must be at most 64 characters"))]
    pub display_name: Option<String>,
    /// New avatar URL.
    #[validate(length(max = 512, message = "avatar url must be at most 512 characters"))]
    pub avatar_url: Option<String>,
}

// ============================================================================
// Helpers
// ============================================================================

/// Username validation regex (matches DB expectations).
static USERNAME_REGEX: std::sync::LazyLock<regex::Regex> =
    std::sync::LazyLock::new(|| regex::Regex::new(r"^[a-z0-9_]{3,32}$").unwrap());

/// Extract User-Agent from headers (sanitized and truncated for DB storage).
fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .map(|s| {
            s.chars()
                .filter(|c| !c.is_control() || c.is_whitespace())
                .take(512)
                .collect()
        })
}

/// Client IP as reported by the reverse proxy, if any.
fn extract_client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

/// Create a session row for `user` and return the cookie carrying its token.
async fn establish_session(
    state: &AppState,
    user: &User,
    headers: &HeaderMap,
) -> AuthResult<axum_extra::extract::cookie::Cookie<'static>> {
    let token = generate_session_token();
    let expires_at = Utc::now() + Duration::seconds(state.config.session_expiry);

    create_session(
        &state.db,
        user.id,
        &hash_token(&token),
        expires_at,
        extract_client_ip(headers).as_deref(),
        extract_user_agent(headers).as_deref(),
    )
    .await?;

    Ok(session_cookie(
        token,
        state.config.session_expiry,
        state.config.secure_cookies,
    ))
}

// ============================================================================
// Handlers
// ============================================================================

/// Register a new user.
///
/// POST /api/register
#[tracing::instrument(skip(state, jar, headers, body), fields(username = %body.username))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(body): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, CookieJar, Json<User>)> {
    body.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    if !USERNAME_REGEX.is_match(&body.username) {
        return Err(AuthError::Validation(
            "username: only lowercase letters, digits, and underscores are allowed".to_string(),
        ));
    }

    if body.password != body.confirm_password {
        return Err(AuthError::Validation(
            "confirmPassword: passwords do not match".to_string(),
        ));
    }

    // Uniqueness prechecks; the UNIQUE constraints catch races.
    if username_exists(&state.db, &body.username).await? {
        return Err(AuthError::UserAlreadyExists);
    }
    if email_exists(&state.db, &body.email).await? {
        return Err(AuthError::UserAlreadyExists);
    }

    let password_hash = hash_password(&body.password).map_err(|_| AuthError::PasswordHash)?;

    let user = db::create_user(
        &state.db,
        &body.username,
        &body.email,
        body.display_name.as_deref(),
        &password_hash,
    )
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AuthError::UserAlreadyExists
        }
        _ => AuthError::Database(e),
    })?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    let cookie = establish_session(&state, &user, &headers).await?;
    Ok((StatusCode::CREATED, jar.add(cookie), Json(user)))
}

/// Login with username/password.
///
/// POST /api/login
#[tracing::instrument(skip(state, jar, headers, body), fields(username = %body.username))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(body): Json<LoginRequest>,
) -> AuthResult<(CookieJar, Json<User>)> {
    // Unknown username and wrong password are indistinguishable to the caller.
    let user = find_user_by_username(&state.db, &body.username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let valid = verify_password(&body.password, &user.password_hash)
        .map_err(|_| AuthError::PasswordHash)?;
    if !valid {
        return Err(AuthError::InvalidCredentials);
    }

    let cookie = establish_session(&state, &user, &headers).await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok((jar.add(cookie), Json(user)))
}

/// Invalidate the current session.
///
/// Idempotent: succeeds even when the request carries no valid session.
///
/// POST /api/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AuthResult<(CookieJar, StatusCode)> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        delete_session(&state.db, &hash_token(cookie.value())).await?;
    }

    Ok((jar.add(clear_session_cookie()), StatusCode::NO_CONTENT))
}

/// Get the current user.
///
/// GET /api/user
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AuthResult<Json<User>> {
    let user = find_user_by_id(&state.db, auth.id)
        .await?
        .ok_or(AuthError::Unauthenticated)?;

    Ok(Json(user))
}

/// Update the current user's profile fields.
///
/// Role is deliberately not updatable here; escalation is never self-service.
///
/// PATCH /api/user
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<UpdateProfileRequest>,
) -> AuthResult<Json<User>> {
    body.validate()
        .map_err(|e| AuthError::Validation(e.to_string()))?;

    let clear_display_name = body.display_name.as_deref() == Some("");
    let clear_avatar_url = body.avatar_url.as_deref() == Some("");

    let user = db::update_user_profile(
        &state.db,
        auth.id,
        body.display_name.as_deref().filter(|s| !s.is_empty()),
        clear_display_name,
        body.avatar_url.as_deref().filter(|s| !s.is_empty()),
        clear_avatar_url,
    )
    .await?
    .ok_or(AuthError::Unauthenticated)?;

    Ok(Json(user))
}
