pub mod app_config;
pub mod cors_config;
pub mod prescription_config;
pub mod server_config;
pub mod shopify_config;
pub mod vision_config;
