//! Vision analysis abstraction
//!
//! Image analysis is an external collaborator. Each analyzer implements both
//! body-type analysis (user photos) and clothing analysis (wardrobe photos).
//! Callers go through the `*_or_default` helpers, which never fail: when the
//! analyzer errors, deterministic fallback metadata is used instead.

use crate::{
    error::AppResult,
    models::{BodyAnalysis, ClothingAnalysis},
};

pub mod http;
pub mod stub;

pub use http::HttpVisionClient;
pub use stub::StubVision;

/// Trait for vision analysis backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait VisionAnalyzer: Send + Sync {
    /// Estimate body type and style guidance from a full-body photo
    async fn analyze_body(&self, image: &[u8]) -> AppResult<BodyAnalysis>;

    /// Tag a clothing photo with category, color, style, season and tags
    async fn analyze_clothing(&self, image: &[u8]) -> AppResult<ClothingAnalysis>;

    /// Analyzer name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Runs body analysis, substituting `BodyAnalysis::unknown()` on failure
pub async fn analyze_body_or_default(analyzer: &dyn VisionAnalyzer, image: &[u8]) -> BodyAnalysis {
    match analyzer.analyze_body(image).await {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::warn!(
                error = %e,
                analyzer = analyzer.name(),
                "Body analysis failed, using fallback"
            );
            BodyAnalysis::unknown()
        }
    }
}

/// Runs clothing analysis, substituting empty metadata on failure
pub async fn analyze_clothing_or_default(
    analyzer: &dyn VisionAnalyzer,
    image: &[u8],
) -> ClothingAnalysis {
    match analyzer.analyze_clothing(image).await {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::warn!(
                error = %e,
                analyzer = analyzer.name(),
                "Clothing analysis failed, using fallback"
            );
            ClothingAnalysis::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::Category;

    #[tokio::test]
    async fn test_body_fallback_on_error() {
        let mut analyzer = MockVisionAnalyzer::new();
        analyzer
            .expect_analyze_body()
            .times(1)
            .returning(|_| Err(AppError::ExternalApi("model offline".to_string())));
        analyzer.expect_name().return_const("mock");

        let analysis = analyze_body_or_default(&analyzer, b"bytes").await;
        assert_eq!(analysis, BodyAnalysis::unknown());
    }

    #[tokio::test]
    async fn test_clothing_fallback_on_error() {
        let mut analyzer = MockVisionAnalyzer::new();
        analyzer
            .expect_analyze_clothing()
            .returning(|_| Err(AppError::ExternalApi("timeout".to_string())));
        analyzer.expect_name().return_const("mock");

        let analysis = analyze_clothing_or_default(&analyzer, b"bytes").await;
        assert_eq!(analysis, ClothingAnalysis::default());
    }

    #[test]
    fn test_successful_analysis_passes_through() {
        let mut analyzer = MockVisionAnalyzer::new();
        analyzer.expect_analyze_clothing().returning(|_| {
            Ok(ClothingAnalysis {
                category: Some(Category::Bottom),
                color: Some("indigo".to_string()),
                ..Default::default()
            })
        });

        let analysis = tokio_test::block_on(analyze_clothing_or_default(&analyzer, b"bytes"));
        assert_eq!(analysis.category, Some(Category::Bottom));
        assert_eq!(analysis.color.as_deref(), Some("indigo"));
    }
}
