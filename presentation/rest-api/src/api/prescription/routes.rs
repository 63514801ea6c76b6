use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use business::domain::prescription::errors::PrescriptionError;
use business::domain::prescription::model::{PrescriptionImage, PrescriptionReport};
use business::domain::prescription::use_cases::process::{
    ProcessPrescriptionImageParams, ProcessPrescriptionTextParams, ProcessPrescriptionUseCase,
};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::prescription::dto::{
    PrescriptionResultResponse, PrescriptionTextRequest, PrescriptionUploadRequest, media_type_of,
};
use crate::api::tags::ApiTags;
use crate::config::prescription_config::PrescriptionApiConfig;

pub struct PrescriptionApi {
    process_use_case: Arc<dyn ProcessPrescriptionUseCase>,
    config: PrescriptionApiConfig,
}

impl PrescriptionApi {
    pub fn new(
        process_use_case: Arc<dyn ProcessPrescriptionUseCase>,
        config: PrescriptionApiConfig,
    ) -> Self {
        Self {
            process_use_case,
            config,
        }
    }

    fn respond(
        &self,
        result: Result<PrescriptionReport, PrescriptionError>,
    ) -> ProcessPrescriptionResponse {
        match result {
            Ok(report) => ProcessPrescriptionResponse::Ok(Json(report.into())),
            Err(err) => {
                let (status, json) = err.into_error_response(self.config.expose_error_details);
                match status.as_u16() {
                    400 => ProcessPrescriptionResponse::BadRequest(json),
                    _ => ProcessPrescriptionResponse::InternalError(json),
                }
            }
        }
    }
}

/// Prescription API
///
/// Turns a prescription into a pre-filled checkout link.
#[OpenApi]
impl PrescriptionApi {
    /// Process a prescription photo
    ///
    /// Reads the prescription text, looks up each medication in the catalog
    /// and creates a cart with every product found. Returns the checkout link,
    /// or an explanatory error code when nothing matched.
    #[oai(path = "/prescriptions", method = "post", tag = "ApiTags::Prescriptions")]
    async fn process_prescription(
        &self,
        upload: PrescriptionUploadRequest,
    ) -> ProcessPrescriptionResponse {
        let file = upload.prescription;

        if file.size() > self.config.max_upload_bytes {
            return ProcessPrescriptionResponse::BadRequest(ErrorResponse::validation(
                "prescription.image_too_large",
            ));
        }

        let media_type = match media_type_of(file.content_type(), file.file_name()) {
            Ok(media_type) => media_type,
            Err(err) => return self.respond(Err(err)),
        };

        let bytes = match file.into_vec().await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!("Failed to read prescription upload: {err}");
                return ProcessPrescriptionResponse::BadRequest(ErrorResponse::validation(
                    "prescription.upload_unreadable",
                ));
            }
        };

        let image = match PrescriptionImage::new(bytes, media_type) {
            Ok(image) => image,
            Err(err) => return self.respond(Err(err)),
        };

        let result = self
            .process_use_case
            .execute_by_image(ProcessPrescriptionImageParams { image })
            .await;

        self.respond(result)
    }

    /// Process prescription text
    ///
    /// Same as the photo endpoint, for callers that already have the text.
    #[oai(
        path = "/prescriptions/text",
        method = "post",
        tag = "ApiTags::Prescriptions"
    )]
    async fn process_prescription_text(
        &self,
        body: Json<PrescriptionTextRequest>,
    ) -> ProcessPrescriptionResponse {
        let result = self
            .process_use_case
            .execute_by_text(ProcessPrescriptionTextParams {
                raw_text: body.0.raw_text,
            })
            .await;

        self.respond(result)
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum ProcessPrescriptionResponse {
    /// Checkout link, or an explanation when nothing matched
    #[oai(status = 200)]
    Ok(Json<PrescriptionResultResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use business::domain::prescription::model::PrescriptionOutcome;
    use poem::Route;
    use poem::http::StatusCode;
    use poem::test::{TestClient, TestForm, TestFormField};
    use poem_openapi::OpenApiService;
    use uuid::Uuid;

    const JPEG_BYTES: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

    /// Use case stub answering every call with a fixed result.
    struct FixedUseCase {
        result: Result<PrescriptionOutcome, PrescriptionError>,
        image_calls: AtomicUsize,
    }

    impl FixedUseCase {
        fn new(result: Result<PrescriptionOutcome, PrescriptionError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                image_calls: AtomicUsize::new(0),
            })
        }

        fn report(&self) -> Result<PrescriptionReport, PrescriptionError> {
            self.result.clone().map(|outcome| PrescriptionReport {
                request_id: Uuid::new_v4(),
                candidates: vec![],
                resolutions: vec![],
                outcome,
            })
        }
    }

    #[async_trait]
    impl ProcessPrescriptionUseCase for FixedUseCase {
        async fn execute_by_image(
            &self,
            _params: ProcessPrescriptionImageParams,
        ) -> Result<PrescriptionReport, PrescriptionError> {
            self.image_calls.fetch_add(1, Ordering::SeqCst);
            self.report()
        }

        async fn execute_by_text(
            &self,
            _params: ProcessPrescriptionTextParams,
        ) -> Result<PrescriptionReport, PrescriptionError> {
            self.report()
        }
    }

    fn api(result: Result<PrescriptionOutcome, PrescriptionError>) -> PrescriptionApi {
        PrescriptionApi::new(FixedUseCase::new(result), PrescriptionApiConfig::default())
    }

    fn client(use_case: Arc<FixedUseCase>, max_upload_bytes: usize) -> TestClient<Route> {
        let api = PrescriptionApi::new(
            use_case,
            PrescriptionApiConfig {
                max_upload_bytes,
                expose_error_details: false,
            },
        );
        TestClient::new(Route::new().nest("/", OpenApiService::new(api, "test", "1.0")))
    }

    fn upload(bytes: Vec<u8>, file_name: &str, content_type: &str) -> TestForm {
        TestForm::new().field(
            TestFormField::bytes(bytes)
                .name("prescription")
                .filename(file_name)
                .content_type(content_type),
        )
    }

    fn text_request() -> Json<PrescriptionTextRequest> {
        Json(PrescriptionTextRequest {
            raw_text: "Loratadina".to_string(),
        })
    }

    #[tokio::test]
    async fn should_reject_upload_when_larger_than_limit() {
        let use_case = FixedUseCase::new(Ok(PrescriptionOutcome::NoProductsFound));
        let cli = client(use_case.clone(), 16);

        let resp = cli
            .post("/prescriptions")
            .multipart(upload(vec![0xFF; 32], "receta.jpg", "image/jpeg"))
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.json()
            .await
            .value()
            .object()
            .get("error")
            .assert_string("prescription.image_too_large");
        assert_eq!(use_case.image_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_reject_upload_when_not_an_image() {
        let use_case = FixedUseCase::new(Ok(PrescriptionOutcome::NoProductsFound));
        let cli = client(use_case.clone(), 1024);

        let resp = cli
            .post("/prescriptions")
            .multipart(upload(b"%PDF-1.7".to_vec(), "receta.pdf", "application/pdf"))
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.json()
            .await
            .value()
            .object()
            .get("error")
            .assert_string("prescription.unsupported_media_type");
        assert_eq!(use_case.image_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_reject_upload_when_file_is_empty() {
        let use_case = FixedUseCase::new(Ok(PrescriptionOutcome::NoProductsFound));
        let cli = client(use_case.clone(), 1024);

        let resp = cli
            .post("/prescriptions")
            .multipart(upload(vec![], "receta.jpg", "image/jpeg"))
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
        resp.json()
            .await
            .value()
            .object()
            .get("error")
            .assert_string("prescription.image_empty");
        assert_eq!(use_case.image_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_process_image_when_upload_is_valid_jpeg() {
        let use_case = FixedUseCase::new(Ok(PrescriptionOutcome::NoProductsFound));
        let cli = client(use_case.clone(), 1024);

        let resp = cli
            .post("/prescriptions")
            .multipart(upload(JPEG_BYTES.to_vec(), "receta.jpg", "image/jpeg"))
            .send()
            .await;

        resp.assert_status_is_ok();
        resp.json()
            .await
            .value()
            .object()
            .get("error")
            .assert_string("prescription.no_products_found");
        assert_eq!(use_case.image_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn should_answer_ok_with_message_when_no_products_found() {
        let response = api(Ok(PrescriptionOutcome::NoProductsFound))
            .process_prescription_text(text_request())
            .await;

        match response {
            ProcessPrescriptionResponse::Ok(Json(body)) => {
                assert!(body.link.is_none());
                assert!(body.error.is_some());
            }
            _ => panic!("expected 200 response"),
        }
    }

    #[tokio::test]
    async fn should_answer_internal_error_when_processing_fails() {
        let response = api(Err(PrescriptionError::ocr_failed("HTTP 403")))
            .process_prescription_text(text_request())
            .await;

        match response {
            ProcessPrescriptionResponse::InternalError(Json(body)) => {
                assert_eq!(body.error, "prescription.processing_failed");
                assert!(body.details.is_none());
            }
            _ => panic!("expected 500 response"),
        }
    }

    #[tokio::test]
    async fn should_answer_bad_request_for_validation_errors() {
        let response = api(Err(PrescriptionError::ImageEmpty))
            .process_prescription_text(text_request())
            .await;

        assert!(matches!(
            response,
            ProcessPrescriptionResponse::BadRequest(_)
        ));
    }
}
