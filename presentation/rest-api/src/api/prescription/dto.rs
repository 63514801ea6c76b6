use poem_openapi::types::multipart::Upload;
use poem_openapi::{Multipart, Object};

use business::domain::prescription::errors::PrescriptionError;
use business::domain::prescription::model::PrescriptionReport;
use business::domain::prescription::value_objects::ImageMediaType;

pub const NO_PRODUCTS_FOUND: &str = "prescription.no_products_found";

/// Multipart upload of a prescription photo.
#[derive(Multipart)]
pub struct PrescriptionUploadRequest {
    /// Photo of the prescription (JPEG, PNG, GIF, WebP, BMP or TIFF)
    pub prescription: Upload,
}

/// Prescription text already extracted by the caller.
#[derive(Debug, Clone, Object)]
pub struct PrescriptionTextRequest {
    /// Raw prescription text, one medication per line or separated by commas
    pub raw_text: String,
}

/// Outcome of a processed prescription.
///
/// Exactly one of `link` and `error` is present.
#[derive(Debug, Clone, Object)]
pub struct PrescriptionResultResponse {
    /// Checkout link of the pre-filled cart
    #[oai(skip_serializing_if_is_none)]
    pub link: Option<String>,
    /// Why no cart was created
    #[oai(skip_serializing_if_is_none)]
    pub error: Option<String>,
    /// Medication names read from the prescription, in reading order
    pub candidates: Vec<String>,
    /// Number of candidates that matched a catalog product
    pub matched: u32,
}

impl From<PrescriptionReport> for PrescriptionResultResponse {
    fn from(report: PrescriptionReport) -> Self {
        let matched = report.line_items().len() as u32;
        let candidates = report
            .candidates
            .iter()
            .map(|candidate| candidate.as_str().to_string())
            .collect();

        let link = report.checkout_url().map(|url| url.to_string());
        let error = link.is_none().then(|| NO_PRODUCTS_FOUND.to_string());

        Self {
            link,
            error,
            candidates,
            matched,
        }
    }
}

/// Determines the image type of an upload from its declared content type,
/// falling back to the file extension when the client sent none or a
/// generic binary type.
pub fn media_type_of(
    content_type: Option<&str>,
    file_name: Option<&str>,
) -> Result<ImageMediaType, PrescriptionError> {
    match content_type {
        Some(declared) if !declared.starts_with("application/octet-stream") => declared.parse(),
        _ => {
            let extension = file_name
                .and_then(|name| name.rsplit_once('.'))
                .map(|(_, ext)| ext.to_ascii_lowercase())
                .unwrap_or_default();
            match extension.as_str() {
                "jpg" | "jpeg" => Ok(ImageMediaType::Jpeg),
                "png" => Ok(ImageMediaType::Png),
                "gif" => Ok(ImageMediaType::Gif),
                "webp" => Ok(ImageMediaType::Webp),
                "bmp" => Ok(ImageMediaType::Bmp),
                "tif" | "tiff" => Ok(ImageMediaType::Tiff),
                _ => Err(PrescriptionError::UnsupportedMediaType(
                    content_type.unwrap_or("unknown").to_string(),
                )),
            }
        }
    }
}
