//! Contact Message Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A message sent through the contact form.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub discord_id: Option<String>,
    pub steam_id: Option<String>,
    pub subject: String,
    pub message: String,
    pub is_resolved: bool,
    pub admin_response: Option<String>,
    pub responded_by: Option<Uuid>,
    pub responded_at: Option<DateTime<Utc>>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Public contact form payload.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitContactRequest {
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub discord_id: Option<String>,
    pub steam_id: Option<String>,
    #[validate(length(min = 1, message = "subject is required"))]
    pub subject: String,
    #[validate(length(min = 10, max = 1000, message = "message must be 10-1000 characters"))]
    pub message: String,
}

/// Admin status update payload.
///
/// With `response` set, the message is answered and forced resolved;
/// otherwise `isResolved` flips the flag on its own.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactStatusRequest {
    pub is_resolved: Option<bool>,
    pub response: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Contact message not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            Self::Database(err) => {
                tracing::error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Database error".to_string(),
                )
            }
            Self::NotFound => (StatusCode::NOT_FOUND, "CONTACT_NOT_FOUND", self.to_string()),
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        };

        (
            status,
            Json(serde_json::json!({ "error": code, "message": message })),
        )
            .into_response()
    }
}
