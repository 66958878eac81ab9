//! Public skin submission handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use super::types::{skin_url_allowed, SkinError, SkinRequest, SubmitSkinRequest};
use crate::api::AppState;
use crate::auth::MaybePrincipal;

/// POST /api/submit-skin
/// Submit a skin for review. Open to anonymous callers; an authenticated
/// caller is recorded as the owning user.
pub async fn submit_skin(
    State(state): State<AppState>,
    principal: MaybePrincipal,
    Json(body): Json<SubmitSkinRequest>,
) -> Result<(StatusCode, Json<SkinRequest>), SkinError> {
    body.validate()
        .map_err(|e| SkinError::Validation(e.to_string()))?;

    if !skin_url_allowed(&body.skin_url) {
        return Err(SkinError::Validation(
            "skinUrl: must point at steamcommunity.com or rustlabs.com".to_string(),
        ));
    }

    let skin = sqlx::query_as::<_, SkinRequest>(
        r"
        INSERT INTO skin_requests (steam_id, skin_name, skin_url, item_type, reason, user_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        ",
    )
    .bind(&body.steam_id)
    .bind(&body.skin_name)
    .bind(&body.skin_url)
    .bind(&body.item_type)
    .bind(&body.reason)
    .bind(principal.user_id())
    .fetch_one(&state.db)
    .await?;

    tracing::info!(skin_id = %skin.id, "Skin request submitted");

    Ok((StatusCode::CREATED, Json(skin)))
}

/// GET /api/skins
/// List all skin requests, newest first.
pub async fn list_skins(
    State(state): State<AppState>,
) -> Result<Json<Vec<SkinRequest>>, SkinError> {
    let skins =
        sqlx::query_as::<_, SkinRequest>("SELECT * FROM skin_requests ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(skins))
}

/// GET /api/skins/{id}
/// Fetch a single skin request.
pub async fn get_skin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SkinRequest>, SkinError> {
    let skin = sqlx::query_as::<_, SkinRequest>("SELECT * FROM skin_requests WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(SkinError::NotFound)?;

    Ok(Json(skin))
}
