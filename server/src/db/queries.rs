//! Database Queries
//!
//! Runtime queries (no compile-time `DATABASE_URL` required).
//!
//! User and session queries live here; submission and content queries sit
//! next to their handlers. All query functions include error context logging
//! to aid debugging.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

use super::models::{Session, User};

/// Log and return a database error with context.
macro_rules! db_error {
    ($query:expr) => {
        |e| {
            error!(query = $query, error = %e, "Database query failed");
            e
        }
    };
    ($query:expr, $($field:tt)+) => {
        |e| {
            error!(query = $query, $($field)+, error = %e, "Database query failed");
            e
        }
    };
}

// ============================================================================
// User Queries
// ============================================================================

/// Find user by ID.
pub async fn find_user_by_id(pool: &PgPool, id: Uuid) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(db_error!("find_user_by_id", user_id = %id))
}

/// Find user by username.
pub async fn find_user_by_username(pool: &PgPool, username: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
        .map_err(db_error!("find_user_by_username", username = %username))
}

/// Check if username exists.
pub async fn username_exists(pool: &PgPool, username: &str) -> sqlx::Result<bool> {
    let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
        .bind(username)
        .fetch_one(pool)
        .await?;

    Ok(result.0)
}

/// Check if email exists.
pub async fn email_exists(pool: &PgPool, email: &str) -> sqlx::Result<bool> {
    let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(pool)
        .await?;

    Ok(result.0)
}

/// Create a new user with the default `user` role.
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    display_name: Option<&str>,
    password_hash: &str,
) -> sqlx::Result<User> {
    sqlx::query_as::<_, User>(
        r"
        INSERT INTO users (username, email, display_name, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        ",
    )
    .bind(username)
    .bind(email)
    .bind(display_name)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(db_error!("create_user", username = %username))
}

/// Update a user's own profile fields.
///
/// `None` leaves a field untouched; the `clear_*` flags set it to NULL
/// (callers map an empty string to a clear).
pub async fn update_user_profile(
    pool: &PgPool,
    user_id: Uuid,
    display_name: Option<&str>,
    clear_display_name: bool,
    avatar_url: Option<&str>,
    clear_avatar_url: bool,
) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        r"
        UPDATE users SET
            display_name = CASE WHEN $2 THEN NULL ELSE COALESCE($3, display_name) END,
            avatar_url   = CASE WHEN $4 THEN NULL ELSE COALESCE($5, avatar_url) END,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        ",
    )
    .bind(user_id)
    .bind(clear_display_name)
    .bind(display_name)
    .bind(clear_avatar_url)
    .bind(avatar_url)
    .fetch_optional(pool)
    .await
    .map_err(db_error!("update_user_profile", user_id = %user_id))
}

// ============================================================================
// Session Queries
// ============================================================================

/// Create a session row for a user.
pub async fn create_session(
    pool: &PgPool,
    user_id: Uuid,
    token_hash: &str,
    expires_at: DateTime<Utc>,
    ip_address: Option<&str>,
    user_agent: Option<&str>,
) -> sqlx::Result<Session> {
    sqlx::query_as::<_, Session>(
        r"
        INSERT INTO sessions (user_id, token_hash, expires_at, ip_address, user_agent)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        ",
    )
    .bind(user_id)
    .bind(token_hash)
    .bind(expires_at)
    .bind(ip_address)
    .bind(user_agent)
    .fetch_one(pool)
    .await
    .map_err(db_error!("create_session", user_id = %user_id))
}

/// Resolve a live session token hash to its user.
///
/// Expired sessions resolve to `None`; they are purged separately.
pub async fn find_session_user(pool: &PgPool, token_hash: &str) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        r"
        SELECT u.* FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token_hash = $1 AND s.expires_at > NOW()
        ",
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await
    .map_err(db_error!("find_session_user"))
}

/// Delete a session by its token hash. Returns whether a row was removed.
pub async fn delete_session(pool: &PgPool, token_hash: &str) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
        .bind(token_hash)
        .execute(pool)
        .await
        .map_err(db_error!("delete_session"))?;

    Ok(result.rows_affected() > 0)
}

/// Remove all expired sessions. Returns the number removed.
pub async fn purge_expired_sessions(pool: &PgPool) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= NOW()")
        .execute(pool)
        .await
        .map_err(db_error!("purge_expired_sessions"))?;

    Ok(result.rows_affected())
}
