use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An outfit the user chose to keep
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Outfit {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub occasion: String,
    pub items: Vec<i64>,
    pub ai_score: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Request body for saving an outfit
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutfitCreate {
    pub name: String,
    pub occasion: String,
    pub item_ids: Vec<i64>,
    #[serde(default)]
    pub ai_score: Option<i32>,
}

/// Data needed to insert an outfit
#[derive(Debug, Clone, PartialEq)]
pub struct NewOutfit {
    pub user_id: i64,
    pub name: String,
    pub occasion: String,
    pub items: Vec<i64>,
    pub ai_score: Option<i32>,
}

/// Database row for `outfits`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OutfitRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub occasion: String,
    pub items: Vec<i64>,
    pub ai_score: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<OutfitRow> for Outfit {
    fn from(row: OutfitRow) -> Self {
        Outfit {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            occasion: row.occasion,
            items: row.items,
            ai_score: row.ai_score,
            created_at: row.created_at,
        }
    }
}
