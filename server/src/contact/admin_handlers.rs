//! Admin handlers for contact messages.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use super::types::{ContactError, ContactMessage, UpdateContactStatusRequest};
use crate::api::AppState;
use crate::permissions::AdminUser;

/// GET /api/contacts
/// List all contact messages, newest first.
pub async fn list_contacts(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Vec<ContactMessage>>, ContactError> {
    let contacts = sqlx::query_as::<_, ContactMessage>(
        "SELECT * FROM contact_messages ORDER BY created_at DESC",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(contacts))
}

/// GET /api/contacts/{id}
/// Fetch a single contact message.
pub async fn get_contact(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ContactMessage>, ContactError> {
    let contact = sqlx::query_as::<_, ContactMessage>("SELECT * FROM contact_messages WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or(ContactError::NotFound)?;

    Ok(Json(contact))
}

/// PATCH /api/contacts/{id}/status
/// Resolve or respond to a contact message.
///
/// Recording a response sets the responder reference and timestamp together
/// and forces the resolved flag; without a response the flag just flips.
pub async fn update_contact_status(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateContactStatusRequest>,
) -> Result<Json<ContactMessage>, ContactError> {
    let response = body.response.as_deref().filter(|s| !s.trim().is_empty());

    let contact = if let Some(response) = response {
        sqlx::query_as::<_, ContactMessage>(
            r"
            UPDATE contact_messages
            SET admin_response = $2, responded_by = $3, responded_at = NOW(), is_resolved = TRUE
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(id)
        .bind(response)
        .bind(admin.id)
        .fetch_optional(&state.db)
        .await?
    } else if let Some(is_resolved) = body.is_resolved {
        sqlx::query_as::<_, ContactMessage>(
            "UPDATE contact_messages SET is_resolved = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(is_resolved)
        .fetch_optional(&state.db)
        .await?
    } else {
        return Err(ContactError::Validation(
            "isResolved or response is required".to_string(),
        ));
    };

    let contact = contact.ok_or(ContactError::NotFound)?;

    tracing::info!(contact_id = %contact.id, is_resolved = contact.is_resolved, "Contact message updated");

    Ok(Json(contact))
}

/// DELETE /api/contacts/{id}
/// Remove a contact message outright.
pub async fn delete_contact(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ContactError> {
    let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ContactError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
