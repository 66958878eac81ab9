//! Authentication Service
//!
//! Handles local authentication and cookie-based session management.

mod error;
mod handlers;
mod middleware;
mod password;
mod session;

use axum::{
    routing::{get, post},
    Router,
};

use crate::api::AppState;

pub use error::{AuthError, AuthResult};
pub use middleware::{resolve_principal, AuthUser, MaybePrincipal};
pub use password::{hash_password, verify_password};
pub use session::{generate_session_token, hash_token, SESSION_COOKIE};

/// Create authentication router.
///
/// - POST /api/register - Register a new user (opens a session)
/// - POST /api/login - Login with username/password
/// - POST /api/logout - Invalidate the session (idempotent)
/// - GET /api/user - Current user profile (requires session)
/// - PATCH /api/user - Update own profile (requires session)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/register", post(handlers::register))
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .route(
            "/api/user",
            get(handlers::current_user).patch(handlers::update_profile),
        )
}
