use serde::{Deserialize, Serialize};

pub mod clothing;
pub mod outfit;
pub mod recommendation;
pub mod user;

pub use clothing::{Category, ClothingItem, ClothingItemRow, NewClothingItem, Season};
pub use outfit::{NewOutfit, Outfit, OutfitCreate, OutfitRow};
pub use recommendation::{OutfitCandidate, RecommendationResult};
pub use user::{ProfileUpdate, StyleProfile, User, UserCreate, UserRow};

// ============================================================================
// Vision Analysis API Types
// ============================================================================

/// Result of analyzing a full-body user photo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyAnalysis {
    pub body_type: String,
    #[serde(default)]
    pub style_suggestions: StyleProfile,
}

impl BodyAnalysis {
    /// Deterministic fallback used when analysis is unavailable
    pub fn unknown() -> Self {
        Self {
            body_type: "unknown".to_string(),
            style_suggestions: StyleProfile::default(),
        }
    }
}

/// Result of analyzing a clothing photo
///
/// Every field is optional on the wire; a missing category means the caller's
/// hint wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClothingAnalysis {
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub season: Option<Season>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ClothingAnalysis {
    /// Builds the item to insert, falling back to `category_hint` when the
    /// analyzer did not name a category
    pub fn into_new_item(self, user_id: i64, image_url: String, category_hint: Category) -> NewClothingItem {
        NewClothingItem {
            user_id,
            image_url,
            category: self.category.unwrap_or(category_hint),
            color: self.color,
            style: self.style,
            season: self.season,
            tags: self.tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clothing_analysis_deserializes_sparse_response() {
        let analysis: ClothingAnalysis = serde_json::from_str(r#"{"color":"navy"}"#).unwrap();
        assert_eq!(analysis.category, None);
        assert_eq!(analysis.color, Some("navy".to_string()));
        assert!(analysis.tags.is_empty());
    }

    #[test]
    fn test_clothing_analysis_unknown_category_becomes_other() {
        let analysis: ClothingAnalysis =
            serde_json::from_str(r#"{"category":"cape","season":"autumn"}"#).unwrap();
        assert_eq!(analysis.category, Some(Category::Other));
        assert_eq!(analysis.season, Some(Season::Fall));
    }

    #[test]
    fn test_into_new_item_uses_hint_when_category_missing() {
        let item = ClothingAnalysis::default().into_new_item(
            3,
            "/uploads/clothing/3/x.png".to_string(),
            Category::Shoes,
        );
        assert_eq!(item.user_id, 3);
        assert_eq!(item.category, Category::Shoes);
        assert_eq!(item.color, None);
    }

    #[test]
    fn test_into_new_item_prefers_analyzed_category() {
        let analysis = ClothingAnalysis {
            category: Some(Category::Dress),
            ..Default::default()
        };
        let item = analysis.into_new_item(1, "/uploads/a.png".to_string(), Category::Other);
        assert_eq!(item.category, Category::Dress);
    }

    #[test]
    fn test_body_analysis_unknown() {
        let analysis = BodyAnalysis::unknown();
        assert_eq!(analysis.body_type, "unknown");
        assert!(analysis.style_suggestions.is_empty());
    }
}
