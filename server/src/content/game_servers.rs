//! Game server listing handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::types::{ContentError, GameServer};
use crate::api::AppState;
use crate::auth::MaybePrincipal;
use crate::permissions::AdminUser;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameServerRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "ipAddress is required"))]
    pub ip_address: String,
    pub port: i32,
    #[validate(length(min = 1, message = "connectLink is required"))]
    pub connect_link: String,
    #[validate(length(min = 1, message = "serverType is required"))]
    pub server_type: String,
    #[validate(length(min = 1, message = "mapName is required"))]
    pub map_name: String,
    pub map_size: Option<i32>,
    pub max_players: Option<i32>,
    pub wipe_schedule: Option<String>,
    pub features: Option<Vec<String>>,
    pub banner_image: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGameServerRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub ip_address: Option<String>,
    pub port: Option<i32>,
    pub connect_link: Option<String>,
    pub server_type: Option<String>,
    pub map_name: Option<String>,
    pub map_size: Option<i32>,
    pub max_players: Option<i32>,
    pub player_count: Option<i32>,
    pub wipe_schedule: Option<String>,
    pub features: Option<Vec<String>>,
    pub banner_image: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

fn validate_port(port: i32) -> Result<(), ContentError> {
    if (1..=65535).contains(&port) {
        Ok(())
    } else {
        Err(ContentError::Validation(
            "port: must be between 1 and 65535".to_string(),
        ))
    }
}

/// GET /api/game-servers
/// Active servers in display order; admins see inactive ones too.
pub async fn list_game_servers(
    State(state): State<AppState>,
    principal: MaybePrincipal,
) -> Result<Json<Vec<GameServer>>, ContentError> {
    let servers = sqlx::query_as::<_, GameServer>(
        "SELECT * FROM game_servers WHERE $1 OR is_active ORDER BY display_order ASC",
    )
    .bind(principal.is_admin())
    .fetch_all(&state.db)
    .await?;

    Ok(Json(servers))
}

/// POST /api/game-servers
pub async fn create_game_server(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(body): Json<CreateGameServerRequest>,
) -> Result<(StatusCode, Json<GameServer>), ContentError> {
    body.validate()
        .map_err(|e| ContentError::Validation(e.to_string()))?;
    validate_port(body.port)?;

    let server = sqlx::query_as::<_, GameServer>(
        r"
        INSERT INTO game_servers
            (name, description, ip_address, port, connect_link, server_type, map_name,
             map_size, max_players, wipe_schedule, features, banner_image,
             display_order, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, 0), $10,
                COALESCE($11, '{}'), $12, COALESCE($13, 0), COALESCE($14, TRUE))
        RETURNING *
        ",
    )
    .bind(&body.name)
    .bind(&body.description)
    .bind(&body.ip_address)
    .bind(body.port)
    .bind(&body.connect_link)
    .bind(&body.server_type)
    .bind(&body.map_name)
    .bind(body.map_size)
    .bind(body.max_players)
    .bind(&body.wipe_schedule)
    .bind(&body.features)
    .bind(&body.banner_image)
    .bind(body.display_order)
    .bind(body.is_active)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(server)))
}

/// PATCH /api/game-servers/{id}
pub async fn update_game_server(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateGameServerRequest>,
) -> Result<Json<GameServer>, ContentError> {
    if let Some(port) = body.port {
        validate_port(port)?;
    }

    let server = sqlx::query_as::<_, GameServer>(
        r"
        UPDATE game_servers SET
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            ip_address = COALESCE($4, ip_address),
            port = COALESCE($5, port),
            connect_link = COALESCE($6, connect_link),
            server_type = COALESCE($7, server_type),
            map_name = COALESCE($8, map_name),
            map_size = COALESCE($9, map_size),
            max_players = COALESCE($10, max_players),
            player_count = COALESCE($11, player_count),
            wipe_schedule = COALESCE($12, wipe_schedule),
            features = COALESCE($13, features),
            banner_image = COALESCE($14, banner_image),
            display_order = COALESCE($15, display_order),
            is_active = COALESCE($16, is_active),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        ",
    )
    .bind(id)
    .bind(&body.name)
    .bind(&body.description)
    .bind(&body.ip_address)
    .bind(body.port)
    .bind(&body.connect_link)
    .bind(&body.server_type)
    .bind(&body.map_name)
    .bind(body.map_size)
    .bind(body.max_players)
    .bind(body.player_count)
    .bind(&body.wipe_schedule)
    .bind(&body.features)
    .bind(&body.banner_image)
    .bind(body.display_order)
    .bind(body.is_active)
    .fetch_optional(&state.db)
    .await?
    .ok_or(ContentError::NotFound)?;

    Ok(Json(server))
}

/// DELETE /api/game-servers/{id}
pub async fn delete_game_server(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ContentError> {
    let result = sqlx::query("DELETE FROM game_servers WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ContentError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
