//! Authorization guard.
//!
//! Per-route enforcement of the role hierarchy. Routes opt in by taking the
//! [`AdminUser`] extractor; anonymous and any-authenticated routes simply
//! don't.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use super::Role;
use crate::auth::AuthUser;

/// Authorization failure.
#[derive(Debug, Error)]
pub enum GuardError {
    /// No principal resolved from the request.
    #[error("Authentication required")]
    Unauthenticated,

    /// Principal resolved but its role does not satisfy the requirement.
    #[error("Admin access required")]
    Forbidden,
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Self::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            Self::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        };

        (
            status,
            Json(serde_json::json!({ "error": code, "message": self.to_string() })),
        )
            .into_response()
    }
}

/// Extractor requiring a principal whose role satisfies [`Role::Admin`].
///
/// Rejects with 401 when no session resolved, 403 when the principal's role
/// is insufficient. The guard runs before the handler body, so a rejected
/// request causes no state change.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = GuardError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(GuardError::Unauthenticated)?;

        if !user.role.satisfies(Role::Admin) {
            return Err(GuardError::Forbidden);
        }

        Ok(Self(user))
    }
}
