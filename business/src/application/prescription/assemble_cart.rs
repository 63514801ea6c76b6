use std::sync::Arc;

use uuid::Uuid;

use crate::domain::logger::Logger;
use crate::domain::prescription::errors::PrescriptionError;
use crate::domain::prescription::model::{Cart, LineItem};
use crate::domain::prescription::services::CartService;

/// Creates a single cart from resolved line items.
///
/// Issues exactly one call to the cart service. Callers are expected to skip
/// the assembler when nothing resolved; an empty list is still refused here
/// so an empty cart is never requested.
pub struct CartAssembler {
    pub cart_service: Arc<dyn CartService>,
    pub logger: Arc<dyn Logger>,
}

impl CartAssembler {
    pub async fn create_cart(
        &self,
        request_id: Uuid,
        line_items: &[LineItem],
    ) -> Result<Cart, PrescriptionError> {
        if line_items.is_empty() {
            return Err(PrescriptionError::cart_creation_failed(
                "refusing to create a cart without line items",
            ));
        }

        let units: u32 = line_items.iter().map(|item| item.quantity).sum();
        self.logger.info(&format!(
            "[{}] creating cart with {} line items ({} units)",
            request_id,
            line_items.len(),
            units
        ));

        // Failures are logged once, by the pipeline's failed-stage line.
        let cart = self.cart_service.create_cart(line_items).await?;
        self.logger.info(&format!(
            "[{}] cart {} created",
            request_id,
            cart.id.as_deref().unwrap_or("<no id>")
        ));
        Ok(cart)
    }
}
