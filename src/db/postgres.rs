use sqlx::{postgres::PgPoolOptions, types::Json, PgPool};

use crate::{
    db::WardrobeStore,
    error::{AppError, AppResult},
    models::{
        ClothingItem, ClothingItemRow, NewClothingItem, NewOutfit, Outfit, OutfitRow,
        ProfileUpdate, User, UserCreate, UserRow,
    },
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the embedded schema migrations
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// PostgreSQL-backed wardrobe store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, name, email, photo_url, body_type, style_profile, created_at";
const CLOTHING_COLUMNS: &str =
    "id, user_id, image_url, category, color, style, season, tags, created_at";
const OUTFIT_COLUMNS: &str = "id, user_id, name, occasion, items, ai_score, created_at";

#[async_trait::async_trait]
impl WardrobeStore for PgStore {
    async fn create_user(&self, user: UserCreate) -> AppResult<User> {
        let query = format!(
            "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING {}",
            USER_COLUMNS
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(&user.name)
            .bind(&user.email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AppError::Conflict(format!("Email already registered: {}", user.email))
                }
                other => AppError::Database(other),
            })?;

        Ok(row.into())
    }

    async fn get_user(&self, user_id: i64) -> AppResult<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(User::from))
    }

    async fn update_profile(&self, user_id: i64, update: ProfileUpdate) -> AppResult<User> {
        let query = format!(
            "UPDATE users SET photo_url = $1, body_type = $2, style_profile = $3 \
             WHERE id = $4 RETURNING {}",
            USER_COLUMNS
        );

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(&update.photo_url)
            .bind(&update.body_type)
            .bind(update.style_profile.map(Json))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        Ok(row.into())
    }

    async fn add_clothing_item(&self, item: NewClothingItem) -> AppResult<ClothingItem> {
        let query = format!(
            "INSERT INTO clothing_items (user_id, image_url, category, color, style, season, tags) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            CLOTHING_COLUMNS
        );

        let row = sqlx::query_as::<_, ClothingItemRow>(&query)
            .bind(item.user_id)
            .bind(&item.image_url)
            .bind(item.category.as_str())
            .bind(&item.color)
            .bind(&item.style)
            .bind(item.season.map(|s| s.as_str()))
            .bind(&item.tags)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    AppError::NotFound(format!("User {} not found", item.user_id))
                }
                other => AppError::Database(other),
            })?;

        Ok(row.into())
    }

    async fn list_clothing(&self, user_id: i64) -> AppResult<Vec<ClothingItem>> {
        let query = format!(
            "SELECT {} FROM clothing_items WHERE user_id = $1 ORDER BY id",
            CLOTHING_COLUMNS
        );

        let rows = sqlx::query_as::<_, ClothingItemRow>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(ClothingItem::from).collect())
    }

    async fn save_outfit(&self, outfit: NewOutfit) -> AppResult<Outfit> {
        let query = format!(
            "INSERT INTO outfits (user_id, name, occasion, items, ai_score) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            OUTFIT_COLUMNS
        );

        let row = sqlx::query_as::<_, OutfitRow>(&query)
            .bind(outfit.user_id)
            .bind(&outfit.name)
            .bind(&outfit.occasion)
            .bind(&outfit.items)
            .bind(outfit.ai_score)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn list_outfits(&self, user_id: i64) -> AppResult<Vec<Outfit>> {
        let query = format!(
            "SELECT {} FROM outfits WHERE user_id = $1 ORDER BY id",
            OUTFIT_COLUMNS
        );

        let rows = sqlx::query_as::<_, OutfitRow>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Outfit::from).collect())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
