//! Skin Request Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// Database Enums
// ============================================================================

/// Review status of a skin request. `Pending` is initial; the other two are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "skin_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SkinStatus {
    Pending,
    Approved,
    Rejected,
}

// ============================================================================
// Models
// ============================================================================

/// A community skin submission.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SkinRequest {
    pub id: Uuid,
    pub steam_id: String,
    pub skin_name: String,
    pub skin_url: String,
    pub item_type: String,
    pub reason: String,
    pub status: SkinStatus,
    pub admin_notes: Option<String>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Request Types
// ============================================================================

/// Public submission payload.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSkinRequest {
    #[validate(length(min = 1, message = "steamId is required"))]
    pub steam_id: String,
    #[validate(length(min = 3, message = "skinName must be at least 3 characters"))]
    pub skin_name: String,
    #[validate(length(min = 1, message = "skinUrl is required"))]
    pub skin_url: String,
    #[validate(length(min = 1, message = "itemType is required"))]
    pub item_type: String,
    #[validate(length(min = 10, max = 500, message = "reason must be 10-500 characters"))]
    pub reason: String,
}

/// Admin review payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSkinRequest {
    /// Target status; `approved` or `rejected`.
    pub status: SkinStatus,
    /// Optional note shown alongside the decision.
    pub admin_notes: Option<String>,
}

// ============================================================================
// URL allow-list
// ============================================================================

/// Domains a skin URL may point at.
pub const ALLOWED_SKIN_HOSTS: &[&str] = &["steamcommunity.com", "rustlabs.com"];

/// Whether a skin URL's hostname is on the allow-list (exact match or
/// subdomain).
#[must_use]
pub fn skin_url_allowed(raw: &str) -> bool {
    let Ok(parsed) = Url::parse(raw) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };

    ALLOWED_SKIN_HOSTS
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SkinError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Skin request not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),
}

impl IntoResponse for SkinError {
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
            Self::NotFound => (StatusCode::NOT_FOUND, "SKIN_NOT_FOUND", self.to_string()),
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        };

        (
            status,
            Json(serde_json::json!({ "error": code, "message": message })),
        )
            .into_response()
    }
}
