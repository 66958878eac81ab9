//! Auxiliary content API integration tests.
//!
//! Exercises visibility gating (public vs admin views over the same rows),
//! admin-only mutation, partial updates, and the approve/publish actions.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use helpers::{register_admin, register_user, TestApp};

// ============================================================================
// Discord links
// ============================================================================

#[sqlx::test]
async fn test_discord_links_gating(pool: PgPool) {
    let app = TestApp::new(pool);
    let admin_cookie = register_admin(&app, "admin").await;

    app.post(
        "/api/discord-links",
        Some(&admin_cookie),
        json!({
            "title": "Main server",
            "inviteCode": "uwrust",
            "inviteUrl": "https://discord.gg/uwrust",
            "serverName": "Underworld Rust",
            "displayOrder": 1,
        }),
    )
    .await;
    app.post(
        "/api/discord-links",
        Some(&admin_cookie),
        json!({
            "title": "Staff server",
            "inviteCode": "uwstaff",
            "inviteUrl": "https://discord.gg/uwstaff",
            "serverName": "UW Staff",
            "isActive": false,
        }),
    )
    .await;

    // Anonymous callers see the gate-true subset
    let public = app.get("/api/discord-links", None).await;
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.body.as_array().map(Vec::len), Some(1));
    assert_eq!(public.body[0]["title"], "Main server");

    // Ordinary users see the same subset
    let user_cookie = register_user(&app, "member").await;
    let member_view = app.get("/api/discord-links", Some(&user_cookie)).await;
    assert_eq!(member_view.body.as_array().map(Vec::len), Some(1));

    // Admins see the full set
    let admin_view = app.get("/api/discord-links", Some(&admin_cookie)).await;
    assert_eq!(admin_view.body.as_array().map(Vec::len), Some(2));
}

#[sqlx::test]
async fn test_discord_link_writes_require_admin(pool: PgPool) {
    let app = TestApp::new(pool);
    let user_cookie = register_user(&app, "member").await;

    let body = json!({
        "title": "Main",
        "inviteCode": "x",
        "inviteUrl": "https://discord.gg/x",
        "serverName": "UW",
    });

    let anonymous = app.post("/api/discord-links", None, body.clone()).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let unprivileged = app
        .post("/api/discord-links", Some(&user_cookie), body)
        .await;
    assert_eq!(unprivileged.status, StatusCode::FORBIDDEN);

    // Nothing was created
    let listing = app.get("/api/discord-links", None).await;
    assert_eq!(listing.body.as_array().map(Vec::len), Some(0));
}

#[sqlx::test]
async fn test_discord_link_partial_update(pool: PgPool) {
    let app = TestApp::new(pool);
    let admin_cookie = register_admin(&app, "admin").await;

    let created = app
        .post(
            "/api/discord-links",
            Some(&admin_cookie),
            json!({
                "title": "Original title",
                "inviteCode": "orig",
                "inviteUrl": "https://discord.gg/orig",
                "serverName": "UW",
            }),
        )
        .await;
    let id = created.body["id"].as_str().unwrap().to_owned();

    let updated = app
        .patch(
            &format!("/api/discord-links/{id}"),
            Some(&admin_cookie),
            json!({ "title": "New title" }),
        )
        .await;

    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["title"], "New title");
    // Untouched fields survive the merge
    assert_eq!(updated.body["inviteCode"], "orig");
    assert_ne!(updated.body["updatedAt"], created.body["updatedAt"]);
}

#[sqlx::test]
async fn test_discord_link_delete_reports_outcome(pool: PgPool) {
    let app = TestApp::new(pool);
    let admin_cookie = register_admin(&app, "admin").await;

    let created = app
        .post(
            "/api/discord-links",
            Some(&admin_cookie),
            json!({
                "title": "Doomed",
                "inviteCode": "x",
                "inviteUrl": "https://discord.gg/x",
                "serverName": "UW",
            }),
        )
        .await;
    let id = created.body["id"].as_str().unwrap().to_owned();

    let deleted = app
        .delete(&format!("/api/discord-links/{id}"), Some(&admin_cookie))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let missing = app
        .delete(&format!("/api/discord-links/{id}"), Some(&admin_cookie))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Game servers
// ============================================================================

#[sqlx::test]
async fn test_game_server_create_and_port_validation(pool: PgPool) {
    let app = TestApp::new(pool);
    let admin_cookie = register_admin(&app, "admin").await;

    let created = app
        .post(
            "/api/game-servers",
            Some(&admin_cookie),
            json!({
                "name": "UW Main 2x",
                "description": "Main 2x vanilla-ish server",
                "ipAddress": "203.0.113.10",
                "port": 28015,
                "connectLink": "steam://connect/203.0.113.10:28015",
                "serverType": "2x",
                "mapName": "Procedural",
                "features": ["2x gather", "weekly wipes"],
            }),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["maxPlayers"], 0);
    assert_eq!(created.body["isActive"], true);

    let bad_port = app
        .post(
            "/api/game-servers",
            Some(&admin_cookie),
            json!({
                "name": "Broken",
                "description": "Bad port",
                "ipAddress": "203.0.113.10",
                "port": 70000,
                "connectLink": "steam://connect/x",
                "serverType": "2x",
                "mapName": "Procedural",
            }),
        )
        .await;
    assert_eq!(bad_port.status, StatusCode::BAD_REQUEST);
}

#[sqlx::test]
async fn test_game_servers_gating(pool: PgPool) {
    let app = TestApp::new(pool);
    let admin_cookie = register_admin(&app, "admin").await;

    for (name, active) in [("Visible", true), ("Hidden", false)] {
        app.post(
            "/api/game-servers",
            Some(&admin_cookie),
            json!({
                "name": name,
                "description": "desc",
                "ipAddress": "203.0.113.10",
                "port": 28015,
                "connectLink": "steam://connect/x",
                "serverType": "2x",
                "mapName": "Procedural",
                "isActive": active,
            }),
        )
        .await;
    }

    let public = app.get("/api/game-servers", None).await;
    assert_eq!(public.body.as_array().map(Vec::len), Some(1));
    let admin_view = app.get("/api/game-servers", Some(&admin_cookie)).await;
    assert_eq!(admin_view.body.as_array().map(Vec::len), Some(2));
}

// ============================================================================
// Gallery
// ============================================================================

#[sqlx::test]
async fn test_gallery_image_approval_flow(pool: PgPool) {
    let app = TestApp::new(pool);
    let admin_cookie = register_admin(&app, "curator").await;

    let category = app
        .post(
            "/api/gallery-categories",
            Some(&admin_cookie),
            json!({ "name": "Base tours" }),
        )
        .await;
    assert_eq!(category.status, StatusCode::CREATED);
    let category_id = category.body["id"].as_str().unwrap().to_owned();

    let image = app
        .post(
            "/api/gallery-images",
            Some(&admin_cookie),
            json!({
                "title": "Clan fortress",
                "categoryId": category_id,
                "imageUrl": "https://cdn.example.com/fortress.png",
                "thumbnailUrl": "https://cdn.example.com/fortress_t.png",
            }),
        )
        .await;
    assert_eq!(image.status, StatusCode::CREATED);
    assert_eq!(image.body["isApproved"], false);
    let image_id = image.body["id"].as_str().unwrap().to_owned();

    // Unapproved images are invisible to the public, visible to admins
    let public = app.get("/api/gallery-images", None).await;
    assert_eq!(public.body.as_array().map(Vec::len), Some(0));
    let admin_view = app.get("/api/gallery-images", Some(&admin_cookie)).await;
    assert_eq!(admin_view.body.as_array().map(Vec::len), Some(1));

    // Approval records the approver and flips visibility
    let approved = app
        .post_empty(
            &format!("/api/gallery-images/{image_id}/approve"),
            Some(&admin_cookie),
        )
        .await;
    assert_eq!(approved.status, StatusCode::OK);
    assert_eq!(approved.body["isApproved"], true);
    assert!(!approved.body["approvedBy"].is_null());
    assert!(!approved.body["approvedAt"].is_null());

    let public = app.get("/api/gallery-images", None).await;
    assert_eq!(public.body.as_array().map(Vec::len), Some(1));

    // Category filter applies
    let filtered = app
        .get(&format!("/api/gallery-images?categoryId={category_id}"), None)
        .await;
    assert_eq!(filtered.body.as_array().map(Vec::len), Some(1));
    let other = app
        .get(
            "/api/gallery-images?categoryId=00000000-0000-0000-0000-000000000000",
            None,
        )
        .await;
    assert_eq!(other.body.as_array().map(Vec::len), Some(0));
}

// ============================================================================
// Changelog
// ============================================================================

#[sqlx::test]
async fn test_changelog_publish_flow(pool: PgPool) {
    let app = TestApp::new(pool);
    let admin_cookie = register_admin(&app, "dev").await;

    let entry = app
        .post(
            "/api/changelog",
            Some(&admin_cookie),
            json!({
                "title": "June wipe",
                "summary": "Map wipe and new monuments",
                "content": "Full notes here.",
                "version": "1.4.0",
                "tags": ["wipe", "map"],
            }),
        )
        .await;
    assert_eq!(entry.status, StatusCode::CREATED);
    assert_eq!(entry.body["isPublished"], false);
    let id = entry.body["id"].as_str().unwrap().to_owned();

    // Drafts are hidden from the public
    let public = app.get("/api/changelog", None).await;
    assert_eq!(public.body.as_array().map(Vec::len), Some(0));

    let published = app
        .post_empty(&format!("/api/changelog/{id}/publish"), Some(&admin_cookie))
        .await;
    assert_eq!(published.status, StatusCode::OK);
    assert_eq!(published.body["isPublished"], true);

    let public = app.get("/api/changelog", None).await;
    assert_eq!(public.body.as_array().map(Vec::len), Some(1));

    let unpublished = app
        .post_empty(
            &format!("/api/changelog/{id}/unpublish"),
            Some(&admin_cookie),
        )
        .await;
    assert_eq!(unpublished.body["isPublished"], false);

    let public = app.get("/api/changelog", None).await;
    assert_eq!(public.body.as_array().map(Vec::len), Some(0));
}

#[sqlx::test]
async fn test_moderator_does_not_satisfy_admin_surface(pool: PgPool) {
    let app = TestApp::new(pool);
    let cookie = register_user(&app, "halfway").await;
    helpers::set_role(&app.pool, "halfway", "moderator").await;

    let response = app
        .post(
            "/api/changelog",
            Some(&cookie),
            json!({ "title": "x", "summary": "y", "content": "z" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[sqlx::test]
async fn test_root_satisfies_admin_surface(pool: PgPool) {
    let app = TestApp::new(pool);
    let cookie = register_user(&app, "owner").await;
    helpers::set_role(&app.pool, "owner", "root").await;

    let response = app
        .post(
            "/api/changelog",
            Some(&cookie),
            json!({ "title": "x", "summary": "y", "content": "z" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
}
