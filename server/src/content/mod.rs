//! Auxiliary Content API
//!
//! Discord links, game servers, gallery, and changelog. Reads are public
//! with per-type visibility gates; writes require admin.

mod changelog;
mod discord_links;
mod gallery;
mod game_servers;
mod types;

use axum::{
    routing::{get, post},
    Router,
};

use crate::api::AppState;

pub use types::{
    ChangelogEntry, ContentError, DiscordLink, GalleryCategory, GalleryImage, GameServer,
};

/// Create content router.
///
/// Public reads (gated for unprivileged callers):
/// - GET /api/discord-links
/// - GET /api/game-servers
/// - GET /api/gallery-categories
/// - GET /api/gallery-images?categoryId=
/// - GET /api/changelog
///
/// Admin writes:
/// - POST + PATCH/DELETE /{id} on each collection
/// - POST /api/gallery-images/{id}/approve
/// - POST /api/changelog/{id}/publish, /unpublish
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/discord-links",
            get(discord_links::list_discord_links).post(discord_links::create_discord_link),
        )
        .route(
            "/api/discord-links/{id}",
            axum::routing::patch(discord_links::update_discord_link)
                .delete(discord_links::delete_discord_link),
        )
        .route(
            "/api/game-servers",
            get(game_servers::list_game_servers).post(game_servers::create_game_server),
        )
        .route(
            "/api/game-servers/{id}",
            axum::routing::patch(game_servers::update_game_server)
                .delete(game_servers::delete_game_server),
        )
        .route(
            "/api/gallery-categories",
            get(gallery::list_gallery_categories).post(gallery::create_gallery_category),
        )
        .route(
            "/api/gallery-categories/{id}",
            axum::routing::patch(gallery::update_gallery_category)
                .delete(gallery::delete_gallery_category),
        )
        .route(
            "/api/gallery-images",
            get(gallery::list_gallery_images).post(gallery::create_gallery_image),
        )
        .route(
            "/api/gallery-images/{id}",
            axum::routing::patch(gallery::update_gallery_image)
                .delete(gallery::delete_gallery_image),
        )
        .route(
            "/api/gallery-images/{id}/approve",
            post(gallery::approve_gallery_image),
        )
        .route(
            "/api/changelog",
            get(changelog::list_changelog).post(changelog::create_changelog_entry),
        )
        .route(
            "/api/changelog/{id}",
            axum::routing::patch(changelog::update_changelog_entry)
                .delete(changelog::delete_changelog_entry),
        )
        .route(
            "/api/changelog/{id}/publish",
            post(changelog::publish_changelog_entry),
        )
        .route(
            "/api/changelog/{id}/unpublish",
            post(changelog::unpublish_changelog_entry),
        )
}
