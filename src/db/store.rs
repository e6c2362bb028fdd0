use crate::{
    error::AppResult,
    models::{ClothingItem, NewClothingItem, NewOutfit, Outfit, ProfileUpdate, User, UserCreate},
};

/// Persistence for users, their wardrobes and saved outfits
///
/// Implementations must return wardrobe items and outfits in creation order;
/// the recommender relies on that order being stable.
#[async_trait::async_trait]
pub trait WardrobeStore: Send + Sync {
    /// Inserts a user; fails with `Conflict` when the email is taken
    async fn create_user(&self, user: UserCreate) -> AppResult<User>;

    async fn get_user(&self, user_id: i64) -> AppResult<Option<User>>;

    /// Records the analyzed profile photo; fails with `NotFound` for unknown users
    async fn update_profile(&self, user_id: i64, update: ProfileUpdate) -> AppResult<User>;

    async fn add_clothing_item(&self, item: NewClothingItem) -> AppResult<ClothingItem>;

    async fn list_clothing(&self, user_id: i64) -> AppResult<Vec<ClothingItem>>;

    async fn save_outfit(&self, outfit: NewOutfit) -> AppResult<Outfit>;

    async fn list_outfits(&self, user_id: i64) -> AppResult<Vec<Outfit>>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}
