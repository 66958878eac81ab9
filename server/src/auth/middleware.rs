//! Authentication Middleware
//!
//! [`resolve_principal`] runs on every request: it resolves the session
//! cookie to a live user and stashes an [`AuthUser`] in request extensions.
//! It never rejects; the extractors below decide what a missing principal
//! means for each route.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::convert::Infallible;
use uuid::Uuid;

use crate::api::AppState;
use crate::db::{find_session_user, User};
use crate::permissions::Role;

use super::error::AuthError;
use super::session::{hash_token, SESSION_COOKIE};

/// Authenticated user injected into request extensions.
///
/// This is a minimal struct containing only safe-to-expose user data.
/// Use this in handlers to access the current user.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User ID.
    pub id: Uuid,
    /// Username.
    pub username: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Email.
    pub email: String,
    /// Site role.
    pub role: Role,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            email: user.email,
            role: user.role,
        }
    }
}

/// Middleware resolving the session cookie to a principal.
///
/// Looks up the presented token's digest in the session store and loads the
/// owning user. Requests without a cookie, or with a stale one, continue
/// anonymously.
pub async fn resolve_principal(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = CookieJar::from_headers(request.headers())
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_owned());

    if let Some(token) = token {
        match find_session_user(&state.db, &hash_token(&token)).await {
            Ok(Some(user)) => {
                request.extensions_mut().insert(AuthUser::from(user));
            }
            Ok(None) => {}
            Err(e) => {
                // Treat a lookup failure as an anonymous request rather than
                // failing the whole pipeline; protected routes will 401.
                tracing::error!(error = %e, "Session lookup failed");
            }
        }
    }

    next.run(request).await
}

/// Extractor for the authenticated user in handlers.
///
/// Rejects with 401 when the request carries no valid session.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or(AuthError::Unauthenticated)
    }
}

/// Extractor for routes open to both anonymous and authenticated callers.
///
/// Gated content listings use this to widen visibility for admins without
/// requiring a session.
#[derive(Debug, Clone)]
pub struct MaybePrincipal(pub Option<AuthUser>);

impl MaybePrincipal {
    /// Whether the caller satisfies the admin requirement.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        crate::permissions::satisfies(self.0.as_ref().map(|u| u.role), Role::Admin)
    }

    /// The caller's user id, if authenticated.
    #[must_use]
    pub fn user_id(&self) -> Option<Uuid> {
        self.0.as_ref().map(|u| u.id)
    }
}

impl<S> FromRequestParts<S> for MaybePrincipal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<AuthUser>().cloned()))
    }
}
