use reqwest::Client;

pub const DEFAULT_BASE_URL: &str = "https://vision.googleapis.com/v1";

/// Shared Google Cloud Vision HTTP client configuration.
pub struct VisionClient {
    pub client: Client,
    pub api_key: String,
    pub base_url: String,
}

impl VisionClient {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Points the client at another Vision-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Returns the image annotation endpoint URL.
    pub fn annotate_url(&self) -> String {
        format!("{}/images:annotate", self.base_url)
    }
}
