//! Deterministic analyzer used when no vision endpoint is configured
//!
//! Returns the same metadata for every image so the upload pipeline stays
//! usable in development and tests.

use crate::{
    error::AppResult,
    models::{BodyAnalysis, Category, ClothingAnalysis, Season, StyleProfile},
    services::vision::VisionAnalyzer,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct StubVision;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[async_trait::async_trait]
impl VisionAnalyzer for StubVision {
    async fn analyze_body(&self, _image: &[u8]) -> AppResult<BodyAnalysis> {
        Ok(BodyAnalysis {
            body_type: "athletic".to_string(),
            style_suggestions: StyleProfile {
                recommended_fits: strings(&["fitted", "tailored"]),
                flattering_styles: strings(&["casual", "smart-casual"]),
                tips: strings(&["Emphasize shoulders", "Try structured pieces"]),
            },
        })
    }

    async fn analyze_clothing(&self, _image: &[u8]) -> AppResult<ClothingAnalysis> {
        Ok(ClothingAnalysis {
            category: Some(Category::Top),
            color: Some("blue".to_string()),
            style: Some("casual".to_string()),
            season: Some(Season::All),
            tags: strings(&["cotton", "comfortable", "versatile"]),
        })
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
