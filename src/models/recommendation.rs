use serde::{Deserialize, Serialize};

/// One proposed outfit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutfitCandidate {
    /// Clothing item IDs, in wearing order (main piece first)
    pub items: Vec<i64>,
    /// Compatibility score, 0-100
    pub score: u8,
    pub reasoning: String,
    pub styling_tips: Vec<String>,
}

/// Response for an outfit generation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendationResult {
    pub occasion: String,
    pub season: Option<String>,
    pub user_body_type: Option<String>,
    pub recommendations: Vec<OutfitCandidate>,
    pub shopping_suggestions: Vec<String>,
}
