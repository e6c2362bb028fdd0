use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Category of a clothing item
///
/// Unknown strings parse to `Other` rather than failing, so items tagged by an
/// analyzer with a category we don't know about still land in the wardrobe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Category {
    Top,
    Bottom,
    Dress,
    Outerwear,
    Shoes,
    Accessory,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Dress => "dress",
            Category::Outerwear => "outerwear",
            Category::Shoes => "shoes",
            Category::Accessory => "accessory",
            Category::Other => "other",
        }
    }

    /// Lenient parse: anything unrecognized becomes `Other`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "top" => Category::Top,
            "bottom" => Category::Bottom,
            "dress" => Category::Dress,
            "outerwear" => Category::Outerwear,
            "shoes" => Category::Shoes,
            "accessory" => Category::Accessory,
            _ => Category::Other,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::parse(&value)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Season a clothing item is suited for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    All,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
            Season::All => "all",
        }
    }

    /// Lenient parse: "autumn" maps to `Fall`, anything unrecognized to `All`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "spring" => Season::Spring,
            "summer" => Season::Summer,
            "fall" | "autumn" => Season::Fall,
            "winter" => Season::Winter,
            _ => Season::All,
        }
    }
}

impl From<String> for Season {
    fn from(value: String) -> Self {
        Season::parse(&value)
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single clothing item in a user's wardrobe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClothingItem {
    pub id: i64,
    pub user_id: i64,
    /// Public reference to the stored image (e.g. `/uploads/clothing/1/<uuid>.jpg`)
    pub image_url: String,
    pub category: Category,
    pub color: Option<String>,
    pub style: Option<String>,
    pub season: Option<Season>,
    /// Tags produced by image analysis
    #[serde(rename = "ai_tags")]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Data needed to insert a clothing item; the store assigns id and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct NewClothingItem {
    pub user_id: i64,
    pub image_url: String,
    pub category: Category,
    pub color: Option<String>,
    pub style: Option<String>,
    pub season: Option<Season>,
    pub tags: Vec<String>,
}

/// Database row for `clothing_items`
///
/// Category and season are stored as plain text so that values written by
/// older analyzers never fail to load.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClothingItemRow {
    pub id: i64,
    pub user_id: i64,
    pub image_url: String,
    pub category: String,
    pub color: Option<String>,
    pub style: Option<String>,
    pub season: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ClothingItemRow> for ClothingItem {
    fn from(row: ClothingItemRow) -> Self {
        ClothingItem {
            id: row.id,
            user_id: row.user_id,
            image_url: row.image_url,
            category: Category::parse(&row.category),
            color: row.color,
            style: row.style,
            season: row.season.as_deref().map(Season::parse),
            tags: row.tags,
            created_at: row.created_at,
        }
    }
}
