//! Discord link handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::types::{ContentError, DiscordLink};
use crate::api::AppState;
use crate::auth::MaybePrincipal;
use crate::permissions::AdminUser;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiscordLinkRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "inviteCode is required"))]
    pub invite_code: String,
    #[validate(length(min = 1, message = "inviteUrl is required"))]
    pub invite_url: String,
    #[validate(length(min = 1, message = "serverName is required"))]
    pub server_name: String,
    pub server_icon: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDiscordLinkRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub invite_code: Option<String>,
    pub invite_url: Option<String>,
    pub server_name: Option<String>,
    pub server_icon: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// GET /api/discord-links
/// Active links in display order; admins see inactive ones too.
pub async fn list_discord_links(
    State(state): State<AppState>,
    principal: MaybePrincipal,
) -> Result<Json<Vec<DiscordLink>>, ContentError> {
    let links = sqlx::query_as::<_, DiscordLink>(
        "SELECT * FROM discord_links WHERE $1 OR is_active ORDER BY display_order ASC",
    )
    .bind(principal.is_admin())
    .fetch_all(&state.db)
    .await?;

    Ok(Json(links))
}

/// POST /api/discord-links
pub async fn create_discord_link(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(body): Json<CreateDiscordLinkRequest>,
) -> Result<(StatusCode, Json<DiscordLink>), ContentError> {
    body.validate()
        .map_err(|e| ContentError::Validation(e.to_string()))?;

    let link = sqlx::query_as::<_, DiscordLink>(
        r"
        INSERT INTO discord_links
            (title, description, invite_code, invite_url, server_name, server_icon,
             display_order, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0), COALESCE($8, TRUE))
        RETURNING *
        ",
    )
    .bind(&body.title)
    .bind(&body.description)
    .bind(&body.invite_code)
    .bind(&body.invite_url)
    .bind(&body.server_name)
    .bind(&body.server_icon)
    .bind(body.display_order)
    .bind(body.is_active)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(link)))
}

/// PATCH /api/discord-links/{id}
pub async fn update_discord_link(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateDiscordLinkRequest>,
) -> Result<Json<DiscordLink>, ContentError> {
    let link = sqlx::query_as::<_, DiscordLink>(
        r"
        UPDATE discord_links SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            invite_code = COALESCE($4, invite_code),
            invite_url = COALESCE($5, invite_url),
            server_name = COALESCE($6, server_name),
            server_icon = COALESCE($7, server_icon),
            display_order = COALESCE($8, display_order),
            is_active = COALESCE($9, is_active),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        ",
    )
    .bind(id)
    .bind(&body.title)
    .bind(&body.description)
    .bind(&body.invite_code)
    .bind(&body.invite_url)
    .bind(&body.server_name)
    .bind(&body.server_icon)
    .bind(body.display_order)
    .bind(body.is_active)
    .fetch_optional(&state.db)
    .await?
    .ok_or(ContentError::NotFound)?;

    Ok(Json(link))
}

/// DELETE /api/discord-links/{id}
pub async fn delete_discord_link(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ContentError> {
    let result = sqlx::query("DELETE FROM discord_links WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ContentError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
