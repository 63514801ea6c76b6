use anyhow::Context;

/// Configuration for Google Cloud Vision access.
#[derive(Clone)]
pub struct VisionConfig {
    pub api_key: String,
    pub base_url: Option<String>,
}

impl VisionConfig {
    /// Environment variables:
    /// - GOOGLE_VISION_API_KEY: API key with the Vision API enabled (required)
    /// - GOOGLE_VISION_API_URL: Alternative endpoint (optional)
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("GOOGLE_VISION_API_KEY")
            .context("GOOGLE_VISION_API_KEY environment variable must be set")?;
        let base_url = std::env::var("GOOGLE_VISION_API_URL").ok();
        Ok(Self { api_key, base_url })
    }
}
