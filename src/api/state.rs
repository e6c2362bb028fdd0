use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::db::{self, InMemoryStore, PgStore, WardrobeStore};
use crate::services::{HttpVisionClient, ImageStore, Recommender, StubVision, VisionAnalyzer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WardrobeStore>,
    pub vision: Arc<dyn VisionAnalyzer>,
    pub images: ImageStore,
    pub recommender: Recommender,
}

impl AppState {
    pub fn new(
        store: Arc<dyn WardrobeStore>,
        vision: Arc<dyn VisionAnalyzer>,
        images: ImageStore,
    ) -> Self {
        Self {
            store,
            vision,
            images,
            recommender: Recommender::new(),
        }
    }

    /// State backed by the in-memory store and the stub analyzer
    pub fn in_memory(images: ImageStore) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), Arc::new(StubVision), images)
    }

    /// Replaces the recommender, e.g. to plug in a different ranking strategy
    pub fn with_recommender(mut self, recommender: Recommender) -> Self {
        self.recommender = recommender;
        self
    }

    /// Builds state from configuration, connecting to Postgres if configured
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store: Arc<dyn WardrobeStore> = match &config.database_url {
            Some(url) => {
                let pool = db::create_pool(url).await?;
                db::run_migrations(&pool).await?;
                Arc::new(PgStore::new(pool))
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory store; data will not persist");
                Arc::new(InMemoryStore::new())
            }
        };

        let vision: Arc<dyn VisionAnalyzer> = match &config.vision_api_url {
            Some(url) => Arc::new(HttpVisionClient::new(
                url.clone(),
                config.vision_api_key.clone(),
                Duration::from_secs(config.vision_timeout_secs),
            )?),
            None => Arc::new(StubVision),
        };

        let images = ImageStore::new(&config.upload_dir, config.max_image_dimension);
        tokio::fs::create_dir_all(images.root()).await?;

        tracing::info!(
            store = store.name(),
            vision = vision.name(),
            upload_dir = %config.upload_dir,
            "Application state initialized"
        );

        Ok(Self::new(store, vision, images))
    }
}
