//! HTTP vision analysis client
//!
//! Sends raw image bytes to a model-serving endpoint and parses its JSON reply.
//!
//! API Flow:
//! 1. Body analysis: POST {base}/analyze/body → `{"body_type": ..., "style_suggestions": {...}}`
//! 2. Clothing analysis: POST {base}/analyze/clothing → `{"category": ..., "color": ..., ...}`

use std::time::Duration;

use reqwest::{header, Client as HttpClient};
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::{BodyAnalysis, ClothingAnalysis},
    services::vision::VisionAnalyzer,
};

#[derive(Clone)]
pub struct HttpVisionClient {
    http_client: HttpClient,
    api_url: String,
    api_key: Option<String>,
}

impl HttpVisionClient {
    /// Creates a client whose requests give up after `timeout`
    pub fn new(api_url: String, api_key: Option<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build vision HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/analyze/{}", self.api_url, path)
    }

    async fn post_image<T: DeserializeOwned>(&self, path: &str, image: &[u8]) -> AppResult<T> {
        let url = self.endpoint(path);

        let mut request = self
            .http_client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(image.to_vec());

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Vision API returned status {}: {}",
                status, body
            )));
        }

        let parsed = response.json::<T>().await?;

        tracing::debug!(url = %url, bytes = image.len(), "Vision analysis completed");

        Ok(parsed)
    }
}

#[async_trait::async_trait]
impl VisionAnalyzer for HttpVisionClient {
    async fn analyze_body(&self, image: &[u8]) -> AppResult<BodyAnalysis> {
        self.post_image("body", image).await
    }

    async fn analyze_clothing(&self, image: &[u8]) -> AppResult<ClothingAnalysis> {
        self.post_image("clothing", image).await
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
