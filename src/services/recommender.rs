use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::models::{Category, ClothingItem, OutfitCandidate, RecommendationResult};

pub const DEFAULT_OCCASION: &str = "casual";

/// How many recommendations a single request returns at most
pub const MAX_RECOMMENDATIONS: usize = 5;

const MAX_TOPS: usize = 3;
const MAX_BOTTOMS: usize = 2;
const MAX_DRESSES: usize = 2;

const SEPARATES_SCORE: u8 = 85;
const DRESS_SCORE: u8 = 90;
const MAX_SCORE: u8 = 100;
const MAX_OUTFIT_ITEMS: usize = 3;

const SEPARATES_TIPS: [&str; 2] = [
    "Add a statement accessory to elevate the look",
    "Consider layering for different seasons",
];

const DRESS_TIPS: [&str; 3] = [
    "Simple and chic - less is more",
    "Let the dress be the statement piece",
    "Comfortable yet stylish",
];

const SHOPPING_SUGGESTIONS: [&str; 3] = [
    "Consider adding a blazer for more versatile formal options",
    "A neutral-colored cardigan would complement many outfits",
    "Statement accessories can transform basic outfits",
];

/// Error types for the recommender
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecommendError {
    #[error("No clothing items in wardrobe; add clothing first")]
    EmptyWardrobe,
}

/// Request context for a recommendation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutfitContext {
    pub occasion: String,
    pub season: Option<String>,
    pub body_type: Option<String>,
}

impl Default for OutfitContext {
    fn default() -> Self {
        Self {
            occasion: DEFAULT_OCCASION.to_string(),
            season: None,
            body_type: None,
        }
    }
}

impl OutfitContext {
    pub fn new(occasion: impl Into<String>) -> Self {
        Self {
            occasion: occasion.into(),
            ..Default::default()
        }
    }

    pub fn with_season(mut self, season: Option<String>) -> Self {
        self.season = season;
        self
    }

    pub fn with_body_type(mut self, body_type: Option<String>) -> Self {
        self.body_type = body_type;
        self
    }
}

/// A wardrobe split into fixed category buckets
///
/// Each bucket keeps the order in which items were retrieved. Built once per
/// request and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wardrobe<'a> {
    pub tops: Vec<&'a ClothingItem>,
    pub bottoms: Vec<&'a ClothingItem>,
    pub dresses: Vec<&'a ClothingItem>,
    pub outerwear: Vec<&'a ClothingItem>,
    pub shoes: Vec<&'a ClothingItem>,
    pub accessories: Vec<&'a ClothingItem>,
    pub other: Vec<&'a ClothingItem>,
}

impl<'a> Wardrobe<'a> {
    pub fn partition(items: &'a [ClothingItem]) -> Self {
        let bucket = |category: Category| -> Vec<&'a ClothingItem> {
            items.iter().filter(|item| item.category == category).collect()
        };

        Self {
            tops: bucket(Category::Top),
            bottoms: bucket(Category::Bottom),
            dresses: bucket(Category::Dress),
            outerwear: bucket(Category::Outerwear),
            shoes: bucket(Category::Shoes),
            accessories: bucket(Category::Accessory),
            other: bucket(Category::Other),
        }
    }

    pub fn len(&self) -> usize {
        self.tops.len()
            + self.bottoms.len()
            + self.dresses.len()
            + self.outerwear.len()
            + self.shoes.len()
            + self.accessories.len()
            + self.other.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Hook for re-ranking or augmenting candidates before truncation
///
/// A model-backed ranker can be plugged in here without touching the pairing
/// logic. Implementations must stay deterministic for a given input.
pub trait RankingStrategy: Send + Sync {
    fn rank(
        &self,
        candidates: Vec<OutfitCandidate>,
        wardrobe: &Wardrobe<'_>,
        context: &OutfitContext,
    ) -> Vec<OutfitCandidate>;

    /// Strategy name for logging
    fn name(&self) -> &'static str;
}

/// Default strategy: keeps the built-in order untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl RankingStrategy for PassThrough {
    fn rank(
        &self,
        candidates: Vec<OutfitCandidate>,
        _wardrobe: &Wardrobe<'_>,
        _context: &OutfitContext,
    ) -> Vec<OutfitCandidate> {
        candidates
    }

    fn name(&self) -> &'static str {
        "pass_through"
    }
}

/// Groups wardrobe items into outfit suggestions
#[derive(Clone)]
pub struct Recommender {
    strategy: Arc<dyn RankingStrategy>,
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Recommender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recommender")
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

impl Recommender {
    /// Creates a recommender with the pass-through ranking strategy
    pub fn new() -> Self {
        Self::with_strategy(Arc::new(PassThrough))
    }

    pub fn with_strategy(strategy: Arc<dyn RankingStrategy>) -> Self {
        Self { strategy }
    }

    /// Produces up to five outfit candidates for the given wardrobe
    ///
    /// Separates (top + bottom) come first, dresses after, and the list is cut
    /// to [`MAX_RECOMMENDATIONS`] without re-sorting by score. With enough
    /// tops and bottoms, dress outfits never make it into the result even
    /// though they score higher.
    pub fn generate(
        &self,
        items: &[ClothingItem],
        context: &OutfitContext,
    ) -> Result<RecommendationResult, RecommendError> {
        if items.is_empty() {
            return Err(RecommendError::EmptyWardrobe);
        }

        let wardrobe = Wardrobe::partition(items);

        let mut candidates = separates_candidates(&wardrobe, &context.occasion);
        candidates.extend(dress_candidates(&wardrobe, &context.occasion));

        let ranked = self.strategy.rank(candidates, &wardrobe, context);
        let mut recommendations = sanitize(ranked, items);
        recommendations.truncate(MAX_RECOMMENDATIONS);

        tracing::debug!(
            wardrobe_size = items.len(),
            tops = wardrobe.tops.len(),
            bottoms = wardrobe.bottoms.len(),
            dresses = wardrobe.dresses.len(),
            strategy = self.strategy.name(),
            recommendations = recommendations.len(),
            "Generated outfit recommendations"
        );

        Ok(RecommendationResult {
            occasion: context.occasion.clone(),
            season: context.season.clone(),
            user_body_type: context.body_type.clone(),
            recommendations,
            shopping_suggestions: SHOPPING_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        })
    }
}

fn color_of(item: &ClothingItem) -> &str {
    item.color.as_deref().unwrap_or("neutral")
}

fn style_of(item: &ClothingItem) -> &str {
    item.style.as_deref().unwrap_or("classic")
}

/// Cross product of the first tops and bottoms, top-major
fn separates_candidates(wardrobe: &Wardrobe<'_>, occasion: &str) -> Vec<OutfitCandidate> {
    let shoe = wardrobe.shoes.first();
    let mut candidates = Vec::new();

    for top in wardrobe.tops.iter().take(MAX_TOPS) {
        for bottom in wardrobe.bottoms.iter().take(MAX_BOTTOMS) {
            let mut items = vec![top.id, bottom.id];
            if let Some(shoe) = shoe {
                items.push(shoe.id);
            }

            let mut styling_tips = vec![format!(
                "This combination works great for {} occasions",
                occasion
            )];
            styling_tips.extend(SEPARATES_TIPS.iter().map(|tip| tip.to_string()));

            candidates.push(OutfitCandidate {
                items,
                score: SEPARATES_SCORE,
                reasoning: format!(
                    "Classic {} look with {} {} and {} {}",
                    occasion,
                    color_of(top),
                    top.category,
                    color_of(bottom),
                    bottom.category
                ),
                styling_tips,
            });
        }
    }

    candidates
}

fn dress_candidates(wardrobe: &Wardrobe<'_>, occasion: &str) -> Vec<OutfitCandidate> {
    let shoe = wardrobe.shoes.first();
    let accessory = wardrobe.accessories.first();

    wardrobe
        .dresses
        .iter()
        .take(MAX_DRESSES)
        .map(|dress| {
            let mut items = vec![dress.id];
            items.extend(shoe.map(|s| s.id));
            items.extend(accessory.map(|a| a.id));

            OutfitCandidate {
                items,
                score: DRESS_SCORE,
                reasoning: format!(
                    "Elegant {} {} dress perfect for {}",
                    color_of(dress),
                    style_of(dress),
                    occasion
                ),
                styling_tips: DRESS_TIPS.iter().map(|tip| tip.to_string()).collect(),
            }
        })
        .collect()
}

/// Drops candidates that reference items outside the wardrobe and caps scores
fn sanitize(candidates: Vec<OutfitCandidate>, items: &[ClothingItem]) -> Vec<OutfitCandidate> {
    let known: HashSet<i64> = items.iter().map(|item| item.id).collect();

    candidates
        .into_iter()
        .filter(|candidate| {
            let valid = !candidate.items.is_empty()
                && candidate.items.len() <= MAX_OUTFIT_ITEMS
                && candidate.items.iter().all(|id| known.contains(id));
            if !valid {
                tracing::warn!(
                    items = ?candidate.items,
                    "Dropping candidate with too many items or items outside the wardrobe"
                );
            }
            valid
        })
        .map(|mut candidate| {
            candidate.score = candidate.score.min(MAX_SCORE);
            candidate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn item(id: i64, category: Category, color: &str, style: &str) -> ClothingItem {
        ClothingItem {
            id,
            user_id: 1,
            image_url: format!("/uploads/clothing/1/{}.jpg", id),
            category,
            color: Some(color.to_string()),
            style: Some(style.to_string()),
            season: None,
            tags: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn casual() -> OutfitContext {
        OutfitContext::default()
    }

    #[test]
    fn test_empty_wardrobe_fails() {
        let recommender = Recommender::new();
        let result = recommender.generate(&[], &casual());
        assert_eq!(result, Err(RecommendError::EmptyWardrobe));
    }

    #[test]
    fn test_partition_preserves_order_and_buckets() {
        let items = vec![
            item(1, Category::Top, "blue", "casual"),
            item(2, Category::Shoes, "white", "sporty"),
            item(3, Category::Top, "red", "casual"),
            item(4, Category::Other, "gold", "formal"),
            item(5, Category::Outerwear, "beige", "classic"),
        ];

        let wardrobe = Wardrobe::partition(&items);
        let top_ids: Vec<i64> = wardrobe.tops.iter().map(|i| i.id).collect();

        assert_eq!(top_ids, vec![1, 3]);
        assert_eq!(wardrobe.shoes.len(), 1);
        assert_eq!(wardrobe.other.len(), 1);
        assert_eq!(wardrobe.outerwear.len(), 1);
        assert_eq!(wardrobe.len(), items.len());
        assert!(Wardrobe::partition(&[]).is_empty());
    }

    #[test]
    fn test_tops_and_bottom_with_shoes() {
        let items = vec![
            item(10, Category::Top, "blue", "casual"),
            item(11, Category::Top, "red", "casual"),
            item(20, Category::Bottom, "black", "casual"),
            item(30, Category::Shoes, "white", "sporty"),
        ];

        let result = Recommender::new().generate(&items, &casual()).unwrap();

        assert_eq!(result.recommendations.len(), 2);

        let first = &result.recommendations[0];
        assert_eq!(first.items, vec![10, 20, 30]);
        assert_eq!(first.score, 85);
        assert!(first.reasoning.contains("blue"));
        assert!(first.reasoning.contains("black"));
        assert_eq!(
            first.reasoning,
            "Classic casual look with blue top and black bottom"
        );
        assert_eq!(
            first.styling_tips,
            vec![
                "This combination works great for casual occasions".to_string(),
                "Add a statement accessory to elevate the look".to_string(),
                "Consider layering for different seasons".to_string(),
            ]
        );

        let second = &result.recommendations[1];
        assert_eq!(second.items, vec![11, 20, 30]);
        assert_eq!(second.score, 85);
        assert!(second.reasoning.contains("red"));
        assert!(second.reasoning.contains("black"));
    }

    #[test]
    fn test_dress_with_shoes_and_accessory() {
        let items = vec![
            item(1, Category::Dress, "green", "boho"),
            item(2, Category::Shoes, "tan", "casual"),
            item(3, Category::Accessory, "silver", "minimal"),
        ];

        let context = OutfitContext::new("garden party");
        let result = Recommender::new().generate(&items, &context).unwrap();

        assert_eq!(result.recommendations.len(), 1);
        let outfit = &result.recommendations[0];
        assert_eq!(outfit.items, vec![1, 2, 3]);
        assert_eq!(outfit.score, 90);
        assert_eq!(
            outfit.reasoning,
            "Elegant green boho dress perfect for garden party"
        );
        assert_eq!(outfit.styling_tips.len(), 3);
    }

    #[test]
    fn test_truncation_drops_dresses_after_five_separates() {
        let items = vec![
            item(1, Category::Top, "white", "casual"),
            item(2, Category::Top, "grey", "casual"),
            item(3, Category::Top, "navy", "casual"),
            item(4, Category::Bottom, "black", "casual"),
            item(5, Category::Bottom, "khaki", "casual"),
            item(6, Category::Dress, "red", "formal"),
        ];

        let result = Recommender::new().generate(&items, &casual()).unwrap();

        assert_eq!(result.recommendations.len(), 5);
        assert!(result.recommendations.iter().all(|c| c.score == 85));
        assert!(result.recommendations.iter().all(|c| !c.items.contains(&6)));

        let pairs: Vec<Vec<i64>> = result.recommendations.iter().map(|c| c.items.clone()).collect();
        assert_eq!(
            pairs,
            vec![vec![1, 4], vec![1, 5], vec![2, 4], vec![2, 5], vec![3, 4]]
        );
    }

    #[test]
    fn test_only_first_tops_bottoms_and_dresses_are_used() {
        let mut items: Vec<ClothingItem> = (1..=5)
            .map(|id| item(id, Category::Top, "white", "casual"))
            .collect();
        items.push(item(10, Category::Bottom, "blue", "casual"));
        items.extend((20..=23).map(|id| item(id, Category::Dress, "black", "formal")));

        let result = Recommender::new().generate(&items, &casual()).unwrap();

        let ids: Vec<Vec<i64>> = result.recommendations.iter().map(|c| c.items.clone()).collect();
        assert_eq!(
            ids,
            vec![vec![1, 10], vec![2, 10], vec![3, 10], vec![20], vec![21]]
        );
    }

    #[test]
    fn test_unpairable_wardrobe_yields_empty_list() {
        let items = vec![
            item(1, Category::Top, "white", "casual"),
            item(2, Category::Other, "gold", "statement"),
            item(3, Category::Outerwear, "camel", "classic"),
        ];

        let result = Recommender::new().generate(&items, &casual()).unwrap();
        assert!(result.recommendations.is_empty());
        assert_eq!(result.shopping_suggestions.len(), 3);
    }

    #[test]
    fn test_context_is_echoed() {
        let items = vec![item(1, Category::Dress, "black", "formal")];
        let context = OutfitContext::new("wedding")
            .with_season(Some("summer".to_string()))
            .with_body_type(Some("athletic".to_string()));

        let result = Recommender::new().generate(&items, &context).unwrap();

        assert_eq!(result.occasion, "wedding");
        assert_eq!(result.season.as_deref(), Some("summer"));
        assert_eq!(result.user_body_type.as_deref(), Some("athletic"));
        assert_eq!(
            result.shopping_suggestions,
            SHOPPING_SUGGESTIONS.iter().map(|s| s.to_string()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_missing_color_and_style_render_defaults() {
        let mut dress = item(1, Category::Dress, "", "");
        dress.color = None;
        dress.style = None;

        let result = Recommender::new().generate(&[dress], &casual()).unwrap();
        assert_eq!(
            result.recommendations[0].reasoning,
            "Elegant neutral classic dress perfect for casual"
        );
    }

    #[test]
    fn test_generate_is_deterministic() {
        let items = vec![
            item(1, Category::Top, "blue", "casual"),
            item(2, Category::Bottom, "black", "casual"),
            item(3, Category::Dress, "green", "boho"),
            item(4, Category::Shoes, "white", "sporty"),
            item(5, Category::Accessory, "gold", "statement"),
        ];

        let recommender = Recommender::new();
        let first = serde_json::to_string(&recommender.generate(&items, &casual()).unwrap()).unwrap();
        let second = serde_json::to_string(&recommender.generate(&items, &casual()).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bounds_hold_for_many_wardrobes() {
        let categories = [
            Category::Top,
            Category::Bottom,
            Category::Dress,
            Category::Shoes,
            Category::Accessory,
            Category::Other,
        ];

        let recommender = Recommender::new();
        for size in 1..=12i64 {
            let items: Vec<ClothingItem> = (0..size)
                .map(|i| item(100 + i, categories[(i as usize * 7 + size as usize) % categories.len()], "blue", "casual"))
                .collect();
            let owned: HashSet<i64> = items.iter().map(|i| i.id).collect();

            let result = recommender.generate(&items, &casual()).unwrap();
            assert!(result.recommendations.len() <= MAX_RECOMMENDATIONS);
            assert_eq!(result.shopping_suggestions.len(), 3);
            for candidate in &result.recommendations {
                assert!(!candidate.items.is_empty() && candidate.items.len() <= 3);
                assert!(candidate.score <= 100);
                assert!(candidate.items.iter().all(|id| owned.contains(id)));
            }
        }
    }

    struct ScoreFirst;

    impl RankingStrategy for ScoreFirst {
        fn rank(
            &self,
            mut candidates: Vec<OutfitCandidate>,
            _wardrobe: &Wardrobe<'_>,
            _context: &OutfitContext,
        ) -> Vec<OutfitCandidate> {
            candidates.sort_by(|a, b| b.score.cmp(&a.score));
            candidates
        }

        fn name(&self) -> &'static str {
            "score_first"
        }
    }

    #[test]
    fn test_strategy_runs_before_truncation() {
        let items = vec![
            item(1, Category::Top, "white", "casual"),
            item(2, Category::Top, "grey", "casual"),
            item(3, Category::Top, "navy", "casual"),
            item(4, Category::Bottom, "black", "casual"),
            item(5, Category::Bottom, "khaki", "casual"),
            item(6, Category::Dress, "red", "formal"),
        ];

        let recommender = Recommender::with_strategy(Arc::new(ScoreFirst));
        let result = recommender.generate(&items, &casual()).unwrap();

        assert_eq!(result.recommendations.len(), 5);
        assert_eq!(result.recommendations[0].items, vec![6]);
        assert_eq!(result.recommendations[0].score, 90);
    }

    struct Rogue;

    impl RankingStrategy for Rogue {
        fn rank(
            &self,
            mut candidates: Vec<OutfitCandidate>,
            _wardrobe: &Wardrobe<'_>,
            _context: &OutfitContext,
        ) -> Vec<OutfitCandidate> {
            candidates.insert(
                0,
                OutfitCandidate {
                    items: vec![999],
                    score: 99,
                    reasoning: "Borrowed from a friend".to_string(),
                    styling_tips: Vec::new(),
                },
            );
            for candidate in candidates.iter_mut() {
                candidate.score = 250;
            }
            candidates
        }

        fn name(&self) -> &'static str {
            "rogue"
        }
    }

    #[test]
    fn test_foreign_items_and_scores_are_sanitized() {
        let items = vec![
            item(1, Category::Top, "white", "casual"),
            item(2, Category::Bottom, "black", "casual"),
        ];

        let recommender = Recommender::with_strategy(Arc::new(Rogue));
        let result = recommender.generate(&items, &casual()).unwrap();

        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].items, vec![1, 2]);
        assert_eq!(result.recommendations[0].score, 100);
    }

    /// Piles every unmatched item onto each candidate
    struct Stacker;

    impl RankingStrategy for Stacker {
        fn rank(
            &self,
            mut candidates: Vec<OutfitCandidate>,
            wardrobe: &Wardrobe<'_>,
            _context: &OutfitContext,
        ) -> Vec<OutfitCandidate> {
            for candidate in candidates.iter_mut() {
                candidate.items.extend(wardrobe.other.iter().map(|item| item.id));
            }
            candidates.push(OutfitCandidate {
                items: wardrobe.other.iter().map(|item| item.id).collect(),
                score: 70,
                reasoning: "Just the extras".to_string(),
                styling_tips: Vec::new(),
            });
            candidates
        }

        fn name(&self) -> &'static str {
            "stacker"
        }
    }

    #[test]
    fn test_oversized_candidates_are_dropped() {
        let items = vec![
            item(1, Category::Top, "white", "casual"),
            item(2, Category::Bottom, "black", "casual"),
            item(3, Category::Shoes, "brown", "casual"),
            item(4, Category::Other, "green", "casual"),
            item(5, Category::Other, "yellow", "casual"),
        ];

        let recommender = Recommender::with_strategy(Arc::new(Stacker));
        let result = recommender.generate(&items, &casual()).unwrap();

        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].items, vec![4, 5]);
        for candidate in &result.recommendations {
            assert!(candidate.items.len() <= MAX_OUTFIT_ITEMS);
        }
    }
}
