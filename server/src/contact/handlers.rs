//! Public contact form handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use super::types::{ContactError, ContactMessage, SubmitContactRequest};
use crate::api::AppState;
use crate::auth::MaybePrincipal;

/// POST /api/contact
/// Submit a contact message. Anonymous allowed; an authenticated caller is
/// recorded as the owning user.
pub async fn submit_contact(
    State(state): State<AppState>,
    principal: MaybePrincipal,
    Json(body): Json<SubmitContactRequest>,
) -> Result<(StatusCode, Json<ContactMessage>), ContactError> {
    body.validate()
        .map_err(|e| ContactError::Validation(e.to_string()))?;

    let contact = sqlx::query_as::<_, ContactMessage>(
        r"
        INSERT INTO contact_messages (name, email, discord_id, steam_id, subject, message, user_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        ",
    )
    .bind(&body.name)
    .bind(&body.email)
    .bind(&body.discord_id)
    .bind(&body.steam_id)
    .bind(&body.subject)
    .bind(&body.message)
    .bind(principal.user_id())
    .fetch_one(&state.db)
    .await?;

    tracing::info!(contact_id = %contact.id, "Contact message submitted");

    Ok((StatusCode::CREATED, Json(contact)))
}
