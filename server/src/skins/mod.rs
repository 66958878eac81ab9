//! Skin Submissions
//!
//! Public skin-request intake and the admin review workflow
//! (`pending` -> `approved` | `rejected`).

mod admin_handlers;
mod handlers;
mod types;

use axum::{
    routing::{get, post},
    Router,
};

use crate::api::AppState;

pub use types::{skin_url_allowed, SkinError, SkinRequest, SkinStatus, ALLOWED_SKIN_HOSTS};

/// Create skin submission router.
///
/// - POST /api/submit-skin - Submit a skin request (anonymous allowed)
/// - GET /api/skins - List all skin requests
/// - GET /api/skins/{id} - Fetch one skin request
/// - PATCH /api/skins/{id}/status - Review (admin)
/// - DELETE /api/skins/{id} - Remove (admin)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/submit-skin", post(handlers::submit_skin))
        .route("/api/skins", get(handlers::list_skins))
        .route(
            "/api/skins/{id}",
            get(handlers::get_skin).delete(admin_handlers::delete_skin),
        )
        .route("/api/skins/{id}/status", axum::routing::patch(admin_handlers::review_skin))
}
