pub mod images;
pub mod recommender;
pub mod vision;
pub mod wardrobe;

pub use images::ImageStore;
pub use recommender::{OutfitContext, RankingStrategy, RecommendError, Recommender, Wardrobe};
pub use vision::{HttpVisionClient, StubVision, VisionAnalyzer};
