use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// PostgreSQL database connection URL; the in-memory store is used when unset
    #[serde(default)]
    pub database_url: Option<String>,

    /// Directory where uploaded images are written
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    /// Longest allowed image side, in pixels
    #[serde(default = "default_max_image_dimension")]
    pub max_image_dimension: u32,

    /// Maximum accepted request body size for uploads
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Vision analysis endpoint; the deterministic stub is used when unset
    #[serde(default)]
    pub vision_api_url: Option<String>,

    /// Bearer token for the vision endpoint
    #[serde(default)]
    pub vision_api_key: Option<String>,

    /// Per-request deadline for vision calls, in seconds
    #[serde(default = "default_vision_timeout_secs")]
    pub vision_timeout_secs: u64,

    /// Allowed CORS origins (comma-separated in the environment)
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_max_image_dimension() -> u32 {
    crate::services::images::DEFAULT_MAX_DIMENSION
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_vision_timeout_secs() -> u64 {
    30
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
