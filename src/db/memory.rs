use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    db::WardrobeStore,
    error::{AppError, AppResult},
    models::{ClothingItem, NewClothingItem, NewOutfit, Outfit, ProfileUpdate, User, UserCreate},
};

/// In-process store used when no database is configured, and in tests
///
/// IDs are assigned sequentially per table; `BTreeMap` keeps iteration in
/// creation order.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    clothing: BTreeMap<i64, ClothingItem>,
    outfits: BTreeMap<i64, Outfit>,
}

fn next_id<V>(table: &BTreeMap<i64, V>) -> i64 {
    table.keys().next_back().map_or(1, |last| last + 1)
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl WardrobeStore for InMemoryStore {
    async fn create_user(&self, user: UserCreate) -> AppResult<User> {
        let mut inner = self.inner.write().await;

        if inner.users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(format!(
                "Email already registered: {}",
                user.email
            )));
        }

        let created = User {
            id: next_id(&inner.users),
            name: user.name,
            email: user.email,
            photo_url: None,
            body_type: None,
            style_profile: None,
            created_at: Utc::now(),
        };
        inner.users.insert(created.id, created.clone());

        Ok(created)
    }

    async fn get_user(&self, user_id: i64) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&user_id).cloned())
    }

    async fn update_profile(&self, user_id: i64, update: ProfileUpdate) -> AppResult<User> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .get_mut(&user_id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        user.photo_url = Some(update.photo_url);
        user.body_type = update.body_type;
        user.style_profile = update.style_profile;

        Ok(user.clone())
    }

    async fn add_clothing_item(&self, item: NewClothingItem) -> AppResult<ClothingItem> {
        let mut inner = self.inner.write().await;

        if !inner.users.contains_key(&item.user_id) {
            return Err(AppError::NotFound(format!("User {} not found", item.user_id)));
        }

        let created = ClothingItem {
            id: next_id(&inner.clothing),
            user_id: item.user_id,
            image_url: item.image_url,
            category: item.category,
            color: item.color,
            style: item.style,
            season: item.season,
            tags: item.tags,
            created_at: Utc::now(),
        };
        inner.clothing.insert(created.id, created.clone());

        Ok(created)
    }

    async fn list_clothing(&self, user_id: i64) -> AppResult<Vec<ClothingItem>> {
        let inner = self.inner.read().await;
        Ok(inner
            .clothing
            .values()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn save_outfit(&self, outfit: NewOutfit) -> AppResult<Outfit> {
        let mut inner = self.inner.write().await;

        let created = Outfit {
            id: next_id(&inner.outfits),
            user_id: outfit.user_id,
            name: outfit.name,
            occasion: outfit.occasion,
            items: outfit.items,
            ai_score: outfit.ai_score,
            created_at: Utc::now(),
        };
        inner.outfits.insert(created.id, created.clone());

        Ok(created)
    }

    async fn list_outfits(&self, user_id: i64) -> AppResult<Vec<Outfit>> {
        let inner = self.inner.read().await;
        Ok(inner
            .outfits
            .values()
            .filter(|outfit| outfit.user_id == user_id)
            .cloned()
            .collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
