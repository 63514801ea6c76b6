/// Prescription pipeline errors.
/// Display strings are code-style identifiers for i18n compatibility; the
/// upstream reason travels separately and is only meant for logs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PrescriptionError {
    #[error("prescription.image_empty")]
    ImageEmpty,
    #[error("prescription.unsupported_media_type")]
    UnsupportedMediaType(String),
    #[error("prescription.ocr_failed")]
    OcrFailed(String),
    #[error("prescription.catalog_query_failed")]
    CatalogQueryFailed(String),
    #[error("prescription.cart_creation_failed")]
    CartCreationFailed(String),
}

impl PrescriptionError {
    pub fn ocr_failed(reason: impl Into<String>) -> Self {
        PrescriptionError::OcrFailed(reason.into())
    }
    pub fn catalog_query_failed(reason: impl Into<String>) -> Self {
        PrescriptionError::CatalogQueryFailed(reason.into())
    }
    pub fn cart_creation_failed(reason: impl Into<String>) -> Self {
        PrescriptionError::CartCreationFailed(reason.into())
    }

    /// Internal detail behind the error code, if any.
    pub fn details(&self) -> Option<&str> {
        match self {
            PrescriptionError::ImageEmpty => None,
            PrescriptionError::UnsupportedMediaType(media_type) => Some(media_type),
            PrescriptionError::OcrFailed(reason)
            | PrescriptionError::CatalogQueryFailed(reason)
            | PrescriptionError::CartCreationFailed(reason) => Some(reason),
        }
    }
}
