//! Admin review handlers for skin requests.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use super::types::{ReviewSkinRequest, SkinError, SkinRequest, SkinStatus};
use crate::api::AppState;
use crate::permissions::AdminUser;

/// PATCH /api/skins/{id}/status
/// Review a pending skin request. Approved/rejected are terminal, so the
/// update only matches rows still pending; anything else is reported as
/// not found.
pub async fn review_skin(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(body): Json<ReviewSkinRequest>,
) -> Result<Json<SkinRequest>, SkinError> {
    if body.status == SkinStatus::Pending {
        return Err(SkinError::Validation(
            "status: must be approved or rejected".to_string(),
        ));
    }

    let skin = sqlx::query_as::<_, SkinRequest>(
        r"
        UPDATE skin_requests
        SET status = $2, admin_notes = $3, reviewed_by = $4, reviewed_at = NOW()
        WHERE id = $1 AND status = 'pending'
        RETURNING *
        ",
    )
    .bind(id)
    .bind(body.status)
    .bind(&body.admin_notes)
    .bind(admin.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(SkinError::NotFound)?;

    tracing::info!(skin_id = %skin.id, status = ?skin.status, reviewer = %admin.id, "Skin request reviewed");

    Ok(Json(skin))
}

/// DELETE /api/skins/{id}
/// Remove a skin request outright.
pub async fn delete_skin(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, SkinError> {
    let result = sqlx::query("DELETE FROM skin_requests WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(SkinError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
