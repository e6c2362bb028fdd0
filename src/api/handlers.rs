use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::RequestId;
use crate::models::{Category, ClothingItem, Outfit, OutfitCreate, RecommendationResult, User, UserCreate};
use crate::services::wardrobe::{self, ImageUpload, PhotoUploadResponse};

use super::AppState;

/// Multipart field carrying the uploaded image
const FILE_FIELD: &str = "file";

// Request types

#[derive(Debug, Deserialize)]
pub struct ClothingQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateQuery {
    pub occasion: Option<String>,
    pub season: Option<String>,
}

/// Pulls the `file` field out of a multipart body
async fn read_image_upload(mut multipart: Multipart) -> AppResult<ImageUpload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed upload: {}", e.body_text())))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read upload: {}", e.body_text())))?;

        return Ok(ImageUpload {
            bytes: bytes.to_vec(),
            filename,
        });
    }

    Err(AppError::InvalidInput(format!(
        "Missing multipart field '{}'",
        FILE_FIELD
    )))
}

// Handlers

/// Welcome endpoint
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to AI Outfit Planner API" }))
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Create a new user
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = wardrobe::register_user(state.store.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a single user
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<User>> {
    let user = wardrobe::require_user(state.store.as_ref(), user_id).await?;
    Ok(Json(user))
}

/// Upload the user's full-body photo
pub async fn upload_user_photo(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    multipart: Multipart,
) -> AppResult<Json<PhotoUploadResponse>> {
    let upload = read_image_upload(multipart).await?;
    let response = wardrobe::upload_user_photo(
        state.store.as_ref(),
        &state.images,
        state.vision.as_ref(),
        user_id,
        upload,
    )
    .await?;
    Ok(Json(response))
}

/// Upload a clothing item or accessory
pub async fn add_clothing_item(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<ClothingQuery>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ClothingItem>)> {
    let category_hint = query
        .category
        .as_deref()
        .map(Category::parse)
        .unwrap_or(Category::Other);

    let upload = read_image_upload(multipart).await?;
    let item = wardrobe::add_clothing_item(
        state.store.as_ref(),
        &state.images,
        state.vision.as_ref(),
        user_id,
        upload,
        category_hint,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Get all clothing items for a user
pub async fn get_user_wardrobe(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<ClothingItem>>> {
    let items = wardrobe::get_wardrobe(state.store.as_ref(), user_id).await?;
    Ok(Json(items))
}

/// Generate outfit recommendations from the user's wardrobe
pub async fn generate_outfit(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<i64>,
    Query(query): Query<GenerateQuery>,
) -> AppResult<Json<RecommendationResult>> {
    tracing::info!(
        request_id = %request_id,
        user_id,
        occasion = ?query.occasion,
        season = ?query.season,
        "Processing outfit generation request"
    );

    let result = wardrobe::generate_outfits(
        state.store.as_ref(),
        &state.recommender,
        user_id,
        query.occasion,
        query.season,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        recommendations = result.recommendations.len(),
        "Outfit generation completed"
    );

    Ok(Json(result))
}

/// Save an outfit combination
pub async fn save_outfit(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(request): Json<OutfitCreate>,
) -> AppResult<(StatusCode, Json<Outfit>)> {
    let outfit = wardrobe::save_outfit(state.store.as_ref(), user_id, request).await?;
    Ok((StatusCode::CREATED, Json(outfit)))
}

/// Get all saved outfits for a user
pub async fn get_saved_outfits(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<Outfit>>> {
    let outfits = wardrobe::get_saved_outfits(state.store.as_ref(), user_id).await?;
    Ok(Json(outfits))
}
