use std::collections::HashSet;

use serde::Serialize;

use crate::{
    db::WardrobeStore,
    error::{AppError, AppResult},
    models::{
        BodyAnalysis, Category, ClothingItem, NewOutfit, Outfit, OutfitCreate, ProfileUpdate,
        RecommendationResult, User, UserCreate,
    },
    services::{
        images::ImageStore,
        recommender::{OutfitContext, Recommender},
        vision::{analyze_body_or_default, analyze_clothing_or_default, VisionAnalyzer},
    },
};

/// Raw bytes of an uploaded file plus the name the client gave it
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub filename: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PhotoUploadResponse {
    pub message: String,
    pub photo_url: String,
    pub analysis: BodyAnalysis,
}

/// Registers a new user after validating name and email
pub async fn register_user(store: &dyn WardrobeStore, request: UserCreate) -> AppResult<User> {
    let request = request.validated().map_err(AppError::InvalidInput)?;
    let user = store.create_user(request).await?;

    tracing::info!(user_id = user.id, "Registered user");
    Ok(user)
}

/// Loads a user or fails with `NotFound`
pub async fn require_user(store: &dyn WardrobeStore, user_id: i64) -> AppResult<User> {
    store
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Stores a full-body photo and records the body-type analysis on the user
pub async fn upload_user_photo(
    store: &dyn WardrobeStore,
    images: &ImageStore,
    vision: &dyn VisionAnalyzer,
    user_id: i64,
    upload: ImageUpload,
) -> AppResult<PhotoUploadResponse> {
    require_user(store, user_id).await?;

    let photo_url = images
        .save(
            upload.bytes.clone(),
            upload.filename.as_deref(),
            &format!("users/{}", user_id),
        )
        .await?;

    let analysis = analyze_body_or_default(vision, &upload.bytes).await;

    let style_profile = if analysis.style_suggestions.is_empty() {
        None
    } else {
        Some(analysis.style_suggestions.clone())
    };
    let update = ProfileUpdate {
        photo_url: photo_url.clone(),
        body_type: Some(analysis.body_type.clone()),
        style_profile,
    };

    if let Err(e) = store.update_profile(user_id, update).await {
        images.delete(&photo_url).await;
        return Err(e);
    }

    tracing::info!(
        user_id,
        body_type = %analysis.body_type,
        analyzer = vision.name(),
        "User photo uploaded"
    );

    Ok(PhotoUploadResponse {
        message: "Photo uploaded successfully".to_string(),
        photo_url,
        analysis,
    })
}

/// Stores a clothing photo, tags it and adds it to the user's wardrobe
///
/// `category_hint` is used when the analyzer does not report a category. If
/// the item cannot be persisted, the stored image is removed again.
pub async fn add_clothing_item(
    store: &dyn WardrobeStore,
    images: &ImageStore,
    vision: &dyn VisionAnalyzer,
    user_id: i64,
    upload: ImageUpload,
    category_hint: Category,
) -> AppResult<ClothingItem> {
    require_user(store, user_id).await?;

    let image_url = images
        .save(
            upload.bytes.clone(),
            upload.filename.as_deref(),
            &format!("clothing/{}", user_id),
        )
        .await?;

    let analysis = analyze_clothing_or_default(vision, &upload.bytes).await;
    let new_item = analysis.into_new_item(user_id, image_url.clone(), category_hint);

    let item = match store.add_clothing_item(new_item).await {
        Ok(item) => item,
        Err(e) => {
            images.delete(&image_url).await;
            return Err(e);
        }
    };

    tracing::info!(
        user_id,
        item_id = item.id,
        category = %item.category,
        analyzer = vision.name(),
        "Clothing item added"
    );

    Ok(item)
}

pub async fn get_wardrobe(store: &dyn WardrobeStore, user_id: i64) -> AppResult<Vec<ClothingItem>> {
    require_user(store, user_id).await?;
    store.list_clothing(user_id).await
}

/// Runs the recommender over the user's current wardrobe
pub async fn generate_outfits(
    store: &dyn WardrobeStore,
    recommender: &Recommender,
    user_id: i64,
    occasion: Option<String>,
    season: Option<String>,
) -> AppResult<RecommendationResult> {
    let user = require_user(store, user_id).await?;
    let wardrobe = store.list_clothing(user_id).await?;

    let occasion = occasion
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty());
    let mut context = match occasion {
        Some(occasion) => OutfitContext::new(occasion),
        None => OutfitContext::default(),
    };
    context = context
        .with_season(season.filter(|s| !s.trim().is_empty()))
        .with_body_type(user.body_type);

    let result = recommender.generate(&wardrobe, &context)?;

    tracing::info!(
        user_id,
        occasion = %result.occasion,
        wardrobe_size = wardrobe.len(),
        recommendations = result.recommendations.len(),
        "Generated outfits"
    );

    Ok(result)
}

/// Saves an outfit after checking every item belongs to the user
pub async fn save_outfit(
    store: &dyn WardrobeStore,
    user_id: i64,
    request: OutfitCreate,
) -> AppResult<Outfit> {
    require_user(store, user_id).await?;

    let name = request.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::InvalidInput("Outfit name must not be empty".to_string()));
    }
    if request.item_ids.is_empty() {
        return Err(AppError::InvalidInput("Outfit must contain at least one item".to_string()));
    }
    if let Some(score) = request.ai_score {
        if !(0..=100).contains(&score) {
            return Err(AppError::InvalidInput(format!(
                "Score must be between 0 and 100, got {}",
                score
            )));
        }
    }

    let owned: HashSet<i64> = store
        .list_clothing(user_id)
        .await?
        .into_iter()
        .map(|item| item.id)
        .collect();
    let foreign: Vec<i64> = request
        .item_ids
        .iter()
        .copied()
        .filter(|id| !owned.contains(id))
        .collect();
    if !foreign.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "Items not in wardrobe: {:?}",
            foreign
        )));
    }

    let outfit = store
        .save_outfit(NewOutfit {
            user_id,
            name,
            occasion: request.occasion,
            items: request.item_ids,
            ai_score: request.ai_score,
        })
        .await?;

    tracing::info!(user_id, outfit_id = outfit.id, "Outfit saved");
    Ok(outfit)
}

pub async fn get_saved_outfits(store: &dyn WardrobeStore, user_id: i64) -> AppResult<Vec<Outfit>> {
    require_user(store, user_id).await?;
    store.list_outfits(user_id).await
}
