//! Changelog entry handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::types::{ChangelogEntry, ContentError};
use crate::api::AppState;
use crate::auth::MaybePrincipal;
use crate::permissions::AdminUser;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChangelogEntryRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "summary is required"))]
    pub summary: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    pub version: Option<String>,
    pub tags: Option<Vec<String>>,
    pub publish_date: Option<DateTime<Utc>>,
    pub is_published: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChangelogEntryRequest {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub version: Option<String>,
    pub tags: Option<Vec<String>>,
    pub publish_date: Option<DateTime<Utc>>,
}

/// GET /api/changelog
/// Published entries, newest publish date first; admins also see drafts.
pub async fn list_changelog(
    State(state): State<AppState>,
    principal: MaybePrincipal,
) -> Result<Json<Vec<ChangelogEntry>>, ContentError> {
    let entries = sqlx::query_as::<_, ChangelogEntry>(
        "SELECT * FROM changelog_entries WHERE $1 OR is_published ORDER BY publish_date DESC",
    )
    .bind(principal.is_admin())
    .fetch_all(&state.db)
    .await?;

    Ok(Json(entries))
}

/// POST /api/changelog
/// Entries start as drafts unless explicitly published.
pub async fn create_changelog_entry(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(body): Json<CreateChangelogEntryRequest>,
) -> Result<(StatusCode, Json<ChangelogEntry>), ContentError> {
    body.validate()
        .map_err(|e| ContentError::Validation(e.to_string()))?;

    let entry = sqlx::query_as::<_, ChangelogEntry>(
        r"
        INSERT INTO changelog_entries
            (title, summary, content, version, tags, user_id, publish_date, is_published)
        VALUES ($1, $2, $3, $4, COALESCE($5, '{}'), $6, COALESCE($7, NOW()),
                COALESCE($8, FALSE))
        RETURNING *
        ",
    )
    .bind(&body.title)
    .bind(&body.summary)
    .bind(&body.content)
    .bind(&body.version)
    .bind(&body.tags)
    .bind(admin.id)
    .bind(body.publish_date)
    .bind(body.is_published)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// PATCH /api/changelog/{id}
pub async fn update_changelog_entry(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateChangelogEntryRequest>,
) -> Result<Json<ChangelogEntry>, ContentError> {
    let entry = sqlx::query_as::<_, ChangelogEntry>(
        r"
        UPDATE changelog_entries SET
            title = COALESCE($2, title),
            summary = COALESCE($3, summary),
            content = COALESCE($4, content),
            version = COALESCE($5, version),
            tags = COALESCE($6, tags),
            publish_date = COALESCE($7, publish_date),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        ",
    )
    .bind(id)
    .bind(&body.title)
    .bind(&body.summary)
    .bind(&body.content)
    .bind(&body.version)
    .bind(&body.tags)
    .bind(body.publish_date)
    .fetch_optional(&state.db)
    .await?
    .ok_or(ContentError::NotFound)?;

    Ok(Json(entry))
}

/// POST /api/changelog/{id}/publish
pub async fn publish_changelog_entry(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ChangelogEntry>, ContentError> {
    set_published(&state, id, true).await
}

/// POST /api/changelog/{id}/unpublish
pub async fn unpublish_changelog_entry(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ChangelogEntry>, ContentError> {
    set_published(&state, id, false).await
}

async fn set_published(
    state: &AppState,
    id: Uuid,
    is_published: bool,
) -> Result<Json<ChangelogEntry>, ContentError> {
    let entry = sqlx::query_as::<_, ChangelogEntry>(
        r"
        UPDATE changelog_entries
        SET is_published = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        ",
    )
    .bind(id)
    .bind(is_published)
    .fetch_optional(&state.db)
    .await?
    .ok_or(ContentError::NotFound)?;

    Ok(Json(entry))
}

/// DELETE /api/changelog/{id}
pub async fn delete_changelog_entry(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ContentError> {
    let result = sqlx::query("DELETE FROM changelog_entries WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ContentError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
