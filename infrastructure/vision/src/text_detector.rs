use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::{Value, json};

use business::domain::prescription::errors::PrescriptionError;
use business::domain::prescription::model::PrescriptionImage;
use business::domain::prescription::services::TextRecognitionService;

use crate::client::VisionClient;

#[derive(Debug, Default, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    text_annotations: Vec<EntityAnnotation>,
    full_text_annotation: Option<FullTextAnnotation>,
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct EntityAnnotation {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FullTextAnnotation {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Status {
    code: Option<i32>,
    message: Option<String>,
}

/// Text recognition over Google Cloud Vision `TEXT_DETECTION`.
pub struct TextDetectorGoogleVision {
    client: VisionClient,
}

impl TextDetectorGoogleVision {
    pub fn new(client: VisionClient) -> Self {
        Self { client }
    }

    fn build_request_body(image: &PrescriptionImage) -> Value {
        json!({
            "requests": [
                {
                    "image": { "content": STANDARD.encode(image.bytes()) },
                    "features": [{ "type": "TEXT_DETECTION" }],
                }
            ]
        })
    }

    /// Extracts the full text blob. The first text annotation holds the
    /// whole detected text; the rest are individual words.
    fn parse_response(response: AnnotateResponse) -> Result<String, PrescriptionError> {
        let image_response = response.responses.into_iter().next().unwrap_or_default();

        if let Some(status) = image_response.error {
            return Err(PrescriptionError::ocr_failed(format!(
                "vision error {}: {}",
                status.code.unwrap_or_default(),
                status.message.unwrap_or_default()
            )));
        }

        let text = image_response
            .text_annotations
            .into_iter()
            .next()
            .and_then(|annotation| annotation.description)
            .or_else(|| image_response.full_text_annotation.and_then(|full| full.text))
            .unwrap_or_default();

        Ok(text)
    }
}

#[async_trait]
impl TextRecognitionService for TextDetectorGoogleVision {
    async fn detect_text(&self, image: &PrescriptionImage) -> Result<String, PrescriptionError> {
        let body = Self::build_request_body(image);

        let response = self
            .client
            .client
            .post(self.client.annotate_url())
            .query(&[("key", self.client.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| PrescriptionError::ocr_failed(format!("transport: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PrescriptionError::ocr_failed(format!(
                "vision returned HTTP {}",
                status.as_u16()
            )));
        }

        let data: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| PrescriptionError::ocr_failed(format!("decode: {}", e)))?;

        Self::parse_response(data)
    }
}
