use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use business::domain::prescription::errors::PrescriptionError;
use business::domain::prescription::model::{CandidateName, VariantId};
use business::domain::prescription::services::CatalogSearchService;

use crate::client::ShopifyClient;
use crate::graphql::Connection;

const SEARCH_PRODUCT_QUERY: &str = r#"
query SearchProduct($query: String!) {
  products(first: 1, query: $query) {
    edges {
      node {
        variants(first: 1) {
          edges {
            node {
              id
            }
          }
        }
      }
    }
  }
}
"#;

/// Characters with meaning in Shopify search syntax wherever they appear.
const SEARCH_SYNTAX_CHARS: [char; 7] = ['\\', '"', '\'', ':', '(', ')', '*'];

/// Negates the term it prefixes.
const NEGATION_PREFIX: char = '-';

#[derive(Debug, Deserialize)]
struct SearchProductData {
    products: Connection<ProductNode>,
}

#[derive(Debug, Deserialize)]
struct ProductNode {
    variants: Connection<VariantNode>,
}

#[derive(Debug, Deserialize)]
struct VariantNode {
    id: String,
}

/// Catalog lookup over the Storefront `products` search.
pub struct CatalogSearchShopify {
    client: ShopifyClient,
}

impl CatalogSearchShopify {
    pub fn new(client: ShopifyClient) -> Self {
        Self { client }
    }

    /// Backslash-escapes search syntax so OCR noise is matched as plain text.
    /// A `-` is only special at the start of a word, so hyphenated names
    /// pass through unchanged.
    pub fn escape_search_term(term: &str) -> String {
        let mut escaped = String::with_capacity(term.len());
        let mut at_word_start = true;
        for c in term.chars() {
            if SEARCH_SYNTAX_CHARS.contains(&c) || (at_word_start && c == NEGATION_PREFIX) {
                escaped.push('\\');
            }
            escaped.push(c);
            at_word_start = c.is_whitespace();
        }
        escaped
    }

    fn search_variables(name: &CandidateName) -> Value {
        json!({ "query": Self::escape_search_term(name.as_str()) })
    }

    fn first_variant(data: SearchProductData) -> Option<VariantId> {
        data.products
            .into_first()
            .and_then(|product| product.variants.into_first())
            .map(|variant| VariantId::new(variant.id))
    }
}

#[async_trait]
impl CatalogSearchService for CatalogSearchShopify {
    async fn search_product(
        &self,
        name: &CandidateName,
    ) -> Result<Option<VariantId>, PrescriptionError> {
        let data: SearchProductData = self
            .client
            .execute(SEARCH_PRODUCT_QUERY, Self::search_variables(name))
            .await
            .map_err(|e| PrescriptionError::catalog_query_failed(e.to_string()))?;

        Ok(Self::first_variant(data))
    }
}
