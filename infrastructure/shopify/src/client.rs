use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::errors::ShopifyError;
use crate::graphql::GraphQlResponse;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

/// Shared Storefront GraphQL client configuration.
#[derive(Clone)]
pub struct ShopifyClient {
    pub client: Client,
    pub api_url: String,
    pub storefront_token: String,
}

impl ShopifyClient {
    pub fn new(api_url: String, storefront_token: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_url,
            storefront_token,
        }
    }

    /// Sends one GraphQL operation. User-influenced values must travel in
    /// `variables`; `document` is always a constant.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: Value,
    ) -> Result<T, ShopifyError> {
        let response = self
            .client
            .post(&self.api_url)
            .header(ACCESS_TOKEN_HEADER, &self.storefront_token)
            .header("Content-Type", "application/json")
            .json(&json!({ "query": document, "variables": variables }))
            .send()
            .await
            .map_err(|e| ShopifyError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShopifyError::Status(status.as_u16()));
        }

        let body: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| ShopifyError::Decode(e.to_string()))?;

        body.into_data()
    }
}
