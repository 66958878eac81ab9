//! Gallery category and image handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::types::{ContentError, GalleryCategory, GalleryImage};
use crate::api::AppState;
use crate::auth::MaybePrincipal;
use crate::permissions::AdminUser;

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryCategoryRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGalleryCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub display_order: Option<i32>,
}

/// GET /api/gallery-categories
/// Categories in display order. Always public.
pub async fn list_gallery_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<GalleryCategory>>, ContentError> {
    let categories = sqlx::query_as::<_, GalleryCategory>(
        "SELECT * FROM gallery_categories ORDER BY display_order ASC",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(categories))
}

/// POST /api/gallery-categories
pub async fn create_gallery_category(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Json(body): Json<CreateGalleryCategoryRequest>,
) -> Result<(StatusCode, Json<GalleryCategory>), ContentError> {
    body.validate()
        .map_err(|e| ContentError::Validation(e.to_string()))?;

    let category = sqlx::query_as::<_, GalleryCategory>(
        r"
        INSERT INTO gallery_categories (name, description, display_order)
        VALUES ($1, $2, COALESCE($3, 0))
        RETURNING *
        ",
    )
    .bind(&body.name)
    .bind(&body.description)
    .bind(body.display_order)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// PATCH /api/gallery-categories/{id}
pub async fn update_gallery_category(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateGalleryCategoryRequest>,
) -> Result<Json<GalleryCategory>, ContentError> {
    let category = sqlx::query_as::<_, GalleryCategory>(
        r"
        UPDATE gallery_categories SET
            name = COALESCE($2, name),
            description = COALESCE($3, description),
            display_order = COALESCE($4, display_order),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        ",
    )
    .bind(id)
    .bind(&body.name)
    .bind(&body.description)
    .bind(body.display_order)
    .fetch_optional(&state.db)
    .await?
    .ok_or(ContentError::NotFound)?;

    Ok(Json(category))
}

/// DELETE /api/gallery-categories/{id}
/// Images in the category survive with their category reference cleared.
pub async fn delete_gallery_category(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ContentError> {
    let result = sqlx::query("DELETE FROM gallery_categories WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ContentError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Images
// ============================================================================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryImageRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    #[validate(length(min = 1, message = "imageUrl is required"))]
    pub image_url: String,
    #[validate(length(min = 1, message = "thumbnailUrl is required"))]
    pub thumbnail_url: String,
    pub file_size: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub is_public: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGalleryImageRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub is_public: Option<bool>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImagesQuery {
    pub category_id: Option<Uuid>,
}

/// GET /api/gallery-images?categoryId=
/// Newest first. Unprivileged callers see only approved, public images.
pub async fn list_gallery_images(
    State(state): State<AppState>,
    principal: MaybePrincipal,
    Query(query): Query<GalleryImagesQuery>,
) -> Result<Json<Vec<GalleryImage>>, ContentError> {
    let images = sqlx::query_as::<_, GalleryImage>(
        r"
        SELECT * FROM gallery_images
        WHERE ($1::uuid IS NULL OR category_id = $1)
          AND ($2 OR (is_approved AND is_public))
        ORDER BY created_at DESC
        ",
    )
    .bind(query.category_id)
    .bind(principal.is_admin())
    .fetch_all(&state.db)
    .await?;

    Ok(Json(images))
}

/// POST /api/gallery-images
/// New images start unapproved and invisible to the public.
pub async fn create_gallery_image(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(body): Json<CreateGalleryImageRequest>,
) -> Result<(StatusCode, Json<GalleryImage>), ContentError> {
    body.validate()
        .map_err(|e| ContentError::Validation(e.to_string()))?;

    let image = sqlx::query_as::<_, GalleryImage>(
        r"
        INSERT INTO gallery_images
            (title, description, category_id, user_id, image_url, thumbnail_url,
             file_size, width, height, is_public)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, TRUE))
        RETURNING *
        ",
    )
    .bind(&body.title)
    .bind(&body.description)
    .bind(body.category_id)
    .bind(admin.id)
    .bind(&body.image_url)
    .bind(&body.thumbnail_url)
    .bind(body.file_size)
    .bind(body.width)
    .bind(body.height)
    .bind(body.is_public)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(image)))
}

/// PATCH /api/gallery-images/{id}
pub async fn update_gallery_image(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateGalleryImageRequest>,
) -> Result<Json<GalleryImage>, ContentError> {
    let image = sqlx::query_as::<_, GalleryImage>(
        r"
        UPDATE gallery_images SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            category_id = COALESCE($4, category_id),
            image_url = COALESCE($5, image_url),
            thumbnail_url = COALESCE($6, thumbnail_url),
            is_public = COALESCE($7, is_public),
            display_order = COALESCE($8, display_order),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        ",
    )
    .bind(id)
    .bind(&body.title)
    .bind(&body.description)
    .bind(body.category_id)
    .bind(&body.image_url)
    .bind(&body.thumbnail_url)
    .bind(body.is_public)
    .bind(body.display_order)
    .fetch_optional(&state.db)
    .await?
    .ok_or(ContentError::NotFound)?;

    Ok(Json(image))
}

/// POST /api/gallery-images/{id}/approve
/// Approve an image for public display, recording the approver.
pub async fn approve_gallery_image(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<GalleryImage>, ContentError> {
    let image = sqlx::query_as::<_, GalleryImage>(
        r"
        UPDATE gallery_images
        SET is_approved = TRUE, approved_by = $2, approved_at = NOW(), updated_at = NOW()
        WHERE id = $1
        RETURNING *
        ",
    )
    .bind(id)
    .bind(admin.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(ContentError::NotFound)?;

    Ok(Json(image))
}

/// DELETE /api/gallery-images/{id}
pub async fn delete_gallery_image(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ContentError> {
    let result = sqlx::query("DELETE FROM gallery_images WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ContentError::NotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
