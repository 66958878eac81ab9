//! Auxiliary Content Types
//!
//! Records backing the marketing pages. Each type carries a boolean gate
//! that controls visibility to non-privileged callers and a display-order
//! or timestamp that fixes its sort.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Discord community invite shown on the discord page.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DiscordLink {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub invite_code: String,
    pub invite_url: String,
    pub server_name: String,
    pub server_icon: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Game server listed on the join page.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GameServer {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub ip_address: String,
    pub port: i32,
    pub connect_link: String,
    pub server_type: String,
    pub map_name: String,
    pub map_size: Option<i32>,
    pub max_players: i32,
    pub player_count: i32,
    pub wipe_schedule: Option<String>,
    pub features: Vec<String>,
    pub banner_image: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Gallery category.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GalleryCategory {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Gallery image. Publicly visible only when approved and public.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub image_url: String,
    pub thumbnail_url: String,
    pub file_size: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub is_public: bool,
    pub is_approved: bool,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changelog entry. Publicly visible only when published.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChangelogEntry {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub version: Option<String>,
    pub tags: Vec<String>,
    pub user_id: Option<Uuid>,
    pub publish_date: DateTime<Utc>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Content API error.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Record not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    /// The constructed storage backend does not provide this capability.
    /// Distinct from an empty result set so callers can tell "no items"
    /// from "capability absent".
    #[error("Not implemented by this storage backend")]
    NotImplemented,
}

impl IntoResponse for ContentError {
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
            Self::NotFound => (StatusCode::NOT_FOUND, "CONTENT_NOT_FOUND", self.to_string()),
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            Self::NotImplemented => (
                StatusCode::NOT_IMPLEMENTED,
                "NOT_IMPLEMENTED",
                self.to_string(),
            ),
        };

        (
            status,
            Json(serde_json::json!({ "error": code, "message": message })),
        )
            .into_response()
    }
}
