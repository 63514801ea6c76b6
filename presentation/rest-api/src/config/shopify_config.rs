use anyhow::Context;

/// Configuration for the Shopify Storefront API.
#[derive(Clone)]
pub struct ShopifyConfig {
    pub api_url: String,
    pub storefront_token: String,
}

impl ShopifyConfig {
    /// Environment variables:
    /// - SHOPIFY_API_URL: Storefront GraphQL endpoint (required)
    /// - SHOPIFY_STOREFRONT_TOKEN: Public Storefront access token (required)
    pub fn from_env() -> anyhow::Result<Self> {
        let api_url = std::env::var("SHOPIFY_API_URL")
            .context("SHOPIFY_API_URL environment variable must be set")?;
        let storefront_token = std::env::var("SHOPIFY_STOREFRONT_TOKEN")
            .context("SHOPIFY_STOREFRONT_TOKEN environment variable must be set")?;
        Ok(Self {
            api_url,
            storefront_token,
        })
    }
}
