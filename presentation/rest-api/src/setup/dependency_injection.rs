use std::sync::Arc;

use logger::TracingLogger;

use shopify::cart::CartShopify;
use shopify::catalog_search::CatalogSearchShopify;
use shopify::client::ShopifyClient;

use vision::client::VisionClient;
use vision::text_detector::TextDetectorGoogleVision;

use business::application::prescription::assemble_cart::CartAssembler;
use business::application::prescription::process::ProcessPrescriptionUseCaseImpl;
use business::application::prescription::resolve_catalog::CatalogResolver;

use crate::api::health::routes::Api as HealthApi;
use crate::api::prescription::routes::PrescriptionApi;
use crate::config::app_config::AppConfig;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub prescription_api: PrescriptionApi,
}

impl DependencyContainer {
    pub fn new(config: &AppConfig) -> Self {
        let logger = Arc::new(TracingLogger);

        // Infrastructure adapters
        let mut vision_client = VisionClient::new(config.vision.api_key.clone());
        if let Some(base_url) = &config.vision.base_url {
            vision_client = vision_client.with_base_url(base_url.as_str());
        }
        let text_detector = Arc::new(TextDetectorGoogleVision::new(vision_client));

        let shopify_client = ShopifyClient::new(
            config.shopify.api_url.clone(),
            config.shopify.storefront_token.clone(),
        );
        let catalog = Arc::new(CatalogSearchShopify::new(shopify_client.clone()));
        let cart_service = Arc::new(CartShopify::new(shopify_client));

        // Pipeline
        let process_use_case = Arc::new(ProcessPrescriptionUseCaseImpl {
            recognizer: text_detector,
            resolver: CatalogResolver {
                catalog,
                logger: logger.clone(),
            },
            assembler: CartAssembler {
                cart_service,
                logger: logger.clone(),
            },
            logger,
        });

        Self {
            health_api: HealthApi::new(),
            prescription_api: PrescriptionApi::new(
                process_use_case,
                config.prescription.clone(),
            ),
        }
    }
}
