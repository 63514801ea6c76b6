use async_trait::async_trait;

use super::errors::PrescriptionError;
use super::model::{CandidateName, Cart, LineItem, PrescriptionImage, VariantId};

/// Service port for turning a prescription photo into text.
///
/// Returns the full recognized text as a single blob. An image without any
/// text yields an empty string, not an error.
#[async_trait]
pub trait TextRecognitionService: Send + Sync {
    async fn detect_text(&self, image: &PrescriptionImage) -> Result<String, PrescriptionError>;
}

/// Service port for looking up a medication in the product catalog.
///
/// Returns the first purchasable variant of the best match, or `None` when
/// the catalog has nothing for the name. Implementations must pass the name
/// as a bound parameter, never by splicing it into query text.
#[async_trait]
pub trait CatalogSearchService: Send + Sync {
    async fn search_product(
        &self,
        name: &CandidateName,
    ) -> Result<Option<VariantId>, PrescriptionError>;
}

/// Service port for creating a pre-filled cart.
#[async_trait]
pub trait CartService: Send + Sync {
    async fn create_cart(&self, line_items: &[LineItem]) -> Result<Cart, PrescriptionError>;
}
