use serde::Deserialize;

use crate::errors::ShopifyError;

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Top-level `errors` win over partial data.
    pub fn into_data(self) -> Result<T, ShopifyError> {
        if !self.errors.is_empty() {
            let messages: Vec<String> = self.errors.into_iter().map(|e| e.message).collect();
            return Err(ShopifyError::GraphQl(messages.join("; ")));
        }
        self.data.ok_or(ShopifyError::MissingData)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    pub fn into_first(self) -> Option<T> {
        self.edges.into_iter().next().map(|edge| edge.node)
    }
}
