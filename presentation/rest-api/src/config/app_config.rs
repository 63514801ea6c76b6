use super::{
    cors_config, prescription_config::PrescriptionApiConfig, server_config::ServerConfig,
    shopify_config::ShopifyConfig, vision_config::VisionConfig,
};
use poem::middleware::Cors;

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub prescription: PrescriptionApiConfig,
    pub vision: VisionConfig,
    pub shopify: ShopifyConfig,
}

impl AppConfig {
    /// Reads every setting up front so a missing credential stops the
    /// process before the listener binds.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            server: ServerConfig::from_env()?,
            cors: cors_config::init_cors(),
            prescription: PrescriptionApiConfig::from_env()?,
            vision: VisionConfig::from_env()?,
            shopify: ShopifyConfig::from_env()?,
        })
    }
}
