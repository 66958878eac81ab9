//! Contact Messages
//!
//! Public contact form intake and the admin resolution workflow.

mod admin_handlers;
mod handlers;
mod types;

use axum::{
    routing::{get, post},
    Router,
};

use crate::api::AppState;

pub use types::{ContactError, ContactMessage};

/// Create contact router.
///
/// - POST /api/contact - Submit a message (anonymous allowed)
/// - GET /api/contacts - List all messages (admin)
/// - GET /api/contacts/{id} - Fetch one message (admin)
/// - PATCH /api/contacts/{id}/status - Resolve or respond (admin)
/// - DELETE /api/contacts/{id} - Remove (admin)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/contact", post(handlers::submit_contact))
        .route("/api/contacts", get(admin_handlers::list_contacts))
        .route(
            "/api/contacts/{id}",
            get(admin_handlers::get_contact).delete(admin_handlers::delete_contact),
        )
        .route(
            "/api/contacts/{id}/status",
            axum::routing::patch(admin_handlers::update_contact_status),
        )
}
