use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Styling guidance derived from a body-type analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StyleProfile {
    #[serde(default)]
    pub recommended_fits: Vec<String>,
    #[serde(default)]
    pub flattering_styles: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl StyleProfile {
    pub fn is_empty(&self) -> bool {
        self.recommended_fits.is_empty() && self.flattering_styles.is_empty() && self.tips.is_empty()
    }
}

/// A registered user of the outfit planner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub body_type: Option<String>,
    pub style_profile: Option<StyleProfile>,
    pub created_at: DateTime<Utc>,
}

/// Request body for registering a user
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
}

impl UserCreate {
    /// Trims both fields and rejects obviously malformed input
    pub fn validated(self) -> Result<Self, String> {
        let name = self.name.trim().to_string();
        let email = self.email.trim().to_lowercase();

        if name.is_empty() {
            return Err("Name must not be empty".to_string());
        }

        let valid_email = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
            }
            None => false,
        };
        if !valid_email {
            return Err(format!("Invalid email address: {}", self.email));
        }

        Ok(Self { name, email })
    }
}

/// Profile fields written after a user photo is analyzed
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub photo_url: String,
    pub body_type: Option<String>,
    pub style_profile: Option<StyleProfile>,
}

/// Database row for `users`
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
    pub body_type: Option<String>,
    pub style_profile: Option<sqlx::types::Json<StyleProfile>>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            photo_url: row.photo_url,
            body_type: row.body_type,
            style_profile: row.style_profile.map(|json| json.0),
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, email: &str) -> UserCreate {
        UserCreate {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_validated_normalizes_fields() {
        let user = create("  Ada ", " Ada@Example.COM ").validated().unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn test_validated_rejects_empty_name() {
        assert!(create("   ", "ada@example.com").validated().is_err());
    }

    #[test]
    fn test_validated_rejects_bad_email() {
        assert!(create("Ada", "ada.example.com").validated().is_err());
        assert!(create("Ada", "@example.com").validated().is_err());
        assert!(create("Ada", "ada@localhost").validated().is_err());
        assert!(create("Ada", "ada@example.").validated().is_err());
        assert!(create("Ada", "a@b@c.d").validated().is_err());
        assert!(create("Ada", "ada@mail@example.com").validated().is_err());
    }

    #[test]
    fn test_style_profile_deserializes_partial() {
        let profile: StyleProfile = serde_json::from_str(r#"{"tips":["Try structured pieces"]}"#).unwrap();
        assert!(profile.recommended_fits.is_empty());
        assert_eq!(profile.tips.len(), 1);
        assert!(!profile.is_empty());
        assert!(StyleProfile::default().is_empty());
    }
}
