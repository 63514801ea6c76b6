/// Failures talking to the Storefront API, before they are mapped onto the
/// domain error of the calling adapter.
#[derive(Debug, thiserror::Error)]
pub enum ShopifyError {
    #[error("transport: {0}")]
    Transport(String),
    #[error("storefront returned HTTP {0}")]
    Status(u16),
    #[error("graphql: {0}")]
    GraphQl(String),
    #[error("decode: {0}")]
    Decode(String),
    #[error("response carried no data")]
    MissingData,
}
