use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use business::domain::prescription::errors::PrescriptionError;
use business::domain::prescription::model::{Cart, CheckoutUrl, LineItem};
use business::domain::prescription::services::CartService;

use crate::client::ShopifyClient;

const CART_CREATE_MUTATION: &str = r#"
mutation CartCreate($input: CartInput!) {
  cartCreate(input: $input) {
    cart {
      id
      checkoutUrl
    }
    userErrors {
      field
      message
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartCreateData {
    cart_create: Option<CartCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartCreatePayload {
    cart: Option<CartNode>,
    #[serde(default)]
    user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartNode {
    id: Option<String>,
    checkout_url: String,
}

#[derive(Debug, Deserialize)]
struct UserError {
    field: Option<Vec<String>>,
    message: String,
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(path) if !path.is_empty() => write!(f, "{}: {}", path.join("."), self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}

/// Cart creation over the Storefront `cartCreate` mutation.
pub struct CartShopify {
    client: ShopifyClient,
}

impl CartShopify {
    pub fn new(client: ShopifyClient) -> Self {
        Self { client }
    }

    fn cart_variables(line_items: &[LineItem]) -> Value {
        let lines: Vec<Value> = line_items
            .iter()
            .map(|item| {
                json!({
                    "merchandiseId": item.variant_id.as_str(),
                    "quantity": item.quantity,
                })
            })
            .collect();

        json!({ "input": { "lines": lines } })
    }

    fn into_cart(data: CartCreateData) -> Result<Cart, PrescriptionError> {
        let payload = data
            .cart_create
            .ok_or_else(|| PrescriptionError::cart_creation_failed("cartCreate returned null"))?;

        if !payload.user_errors.is_empty() {
            let messages: Vec<String> = payload.user_errors.iter().map(|e| e.to_string()).collect();
            return Err(PrescriptionError::cart_creation_failed(format!(
                "userErrors: {}",
                messages.join("; ")
            )));
        }

        let cart = payload
            .cart
            .ok_or_else(|| PrescriptionError::cart_creation_failed("cartCreate returned no cart"))?;

        let checkout_url = CheckoutUrl::parse(&cart.checkout_url).map_err(|e| {
            PrescriptionError::cart_creation_failed(format!(
                "invalid checkout url '{}': {}",
                cart.checkout_url, e
            ))
        })?;

        Ok(Cart {
            id: cart.id,
            checkout_url,
        })
    }
}

#[async_trait]
impl CartService for CartShopify {
    async fn create_cart(&self, line_items: &[LineItem]) -> Result<Cart, PrescriptionError> {
        let data: CartCreateData = self
            .client
            .execute(CART_CREATE_MUTATION, Self::cart_variables(line_items))
            .await
            .map_err(|e| PrescriptionError::cart_creation_failed(e.to_string()))?;

        Self::into_cart(data)
    }
}
