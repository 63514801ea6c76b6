use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::prescription::errors::PrescriptionError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for PrescriptionError {
    fn into_error_response(self, expose_details: bool) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, error) = match &self {
            PrescriptionError::ImageEmpty => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "prescription.image_empty",
            ),
            PrescriptionError::UnsupportedMediaType(_) => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "prescription.unsupported_media_type",
            ),
            PrescriptionError::OcrFailed(_)
            | PrescriptionError::CatalogQueryFailed(_)
            | PrescriptionError::CartCreationFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "ProcessingError",
                "prescription.processing_failed",
            ),
        };

        let details = if expose_details {
            Some(format!("{}: {}", self, self.details().unwrap_or_default()))
        } else {
            None
        };

        (
            status,
            Json(ErrorResponse {
                name: name.to_string(),
                error: error.to_string(),
                details,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_validation_errors_to_bad_request() {
        let (status, json) = PrescriptionError::ImageEmpty.into_error_response(false);

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json.0.name, "ValidationError");
        assert_eq!(json.0.error, "prescription.image_empty");
    }

    #[test]
    fn should_hide_upstream_detail_by_default() {
        let (status, json) =
            PrescriptionError::ocr_failed("vision error 7: API key not valid").into_error_response(false);

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json.0.error, "prescription.processing_failed");
        assert!(json.0.details.is_none());
    }

    #[test]
    fn should_include_detail_when_exposure_enabled() {
        let (status, json) =
            PrescriptionError::cart_creation_failed("storefront returned HTTP 502").into_error_response(true);

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json.0.details.as_deref(),
            Some("prescription.cart_creation_failed: storefront returned HTTP 502")
        );
    }
}
