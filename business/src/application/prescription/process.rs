use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::prescription::assemble_cart::CartAssembler;
use crate::application::prescription::resolve_catalog::CatalogResolver;
use crate::domain::logger::Logger;
use crate::domain::prescription::errors::PrescriptionError;
use crate::domain::prescription::model::{
    PipelineStage, PrescriptionOutcome, PrescriptionReport, collect_line_items,
};
use crate::domain::prescription::normalizer::extract_candidates;
use crate::domain::prescription::services::TextRecognitionService;
use crate::domain::prescription::use_cases::process::{
    ProcessPrescriptionImageParams, ProcessPrescriptionTextParams, ProcessPrescriptionUseCase,
};

/// Prescription pipeline: text recognition, candidate extraction, catalog
/// resolution and cart assembly, in that order.
///
/// Only text recognition and cart creation failures abort a run. Each run is
/// tagged with a fresh request id and holds no state beyond its own call.
pub struct ProcessPrescriptionUseCaseImpl {
    pub recognizer: Arc<dyn TextRecognitionService>,
    pub resolver: CatalogResolver,
    pub assembler: CartAssembler,
    pub logger: Arc<dyn Logger>,
}

impl ProcessPrescriptionUseCaseImpl {
    fn enter(&self, request_id: Uuid, stage: PipelineStage, detail: &str) {
        self.logger
            .info(&format!("[{}] {}: {}", request_id, stage, detail));
    }

    fn fail(&self, request_id: Uuid, err: &PrescriptionError) {
        self.logger.error(&format!(
            "[{}] {}: {} ({})",
            request_id,
            PipelineStage::Failed,
            err,
            err.details().unwrap_or_default()
        ));
    }

    async fn run_from_text(
        &self,
        request_id: Uuid,
        raw_text: &str,
    ) -> Result<PrescriptionReport, PrescriptionError> {
        let candidates = extract_candidates(raw_text);
        self.enter(
            request_id,
            PipelineStage::CandidatesExtracted,
            &format!("{} candidates", candidates.len()),
        );

        let resolutions = self.resolver.resolve(request_id, &candidates).await;
        let line_items = collect_line_items(&resolutions);
        self.enter(
            request_id,
            PipelineStage::Resolved,
            &format!("{} of {} candidates matched", line_items.len(), candidates.len()),
        );

        let outcome = if line_items.is_empty() {
            PrescriptionOutcome::NoProductsFound
        } else {
            let cart = self
                .assembler
                .create_cart(request_id, &line_items)
                .await
                .inspect_err(|err| self.fail(request_id, err))?;
            PrescriptionOutcome::CartCreated(cart)
        };

        let report = PrescriptionReport {
            request_id,
            candidates,
            resolutions,
            outcome,
        };
        self.enter(
            request_id,
            report.stage(),
            report
                .checkout_url()
                .map_or("skipping cart creation", |url| url.as_str()),
        );

        Ok(report)
    }
}

#[async_trait]
impl ProcessPrescriptionUseCase for ProcessPrescriptionUseCaseImpl {
    async fn execute_by_image(
        &self,
        params: ProcessPrescriptionImageParams,
    ) -> Result<PrescriptionReport, PrescriptionError> {
        let request_id = Uuid::new_v4();
        self.enter(
            request_id,
            PipelineStage::Received,
            &format!(
                "{} image, {} bytes",
                params.image.media_type(),
                params.image.bytes().len()
            ),
        );

        let raw_text = self
            .recognizer
            .detect_text(&params.image)
            .await
            .inspect_err(|err| self.fail(request_id, err))?;

        self.enter(
            request_id,
            PipelineStage::TextExtracted,
            &format!("{} characters", raw_text.chars().count()),
        );

        self.run_from_text(request_id, &raw_text).await
    }

    async fn execute_by_text(
        &self,
        params: ProcessPrescriptionTextParams,
    ) -> Result<PrescriptionReport, PrescriptionError> {
        let request_id = Uuid::new_v4();
        self.enter(
            request_id,
            PipelineStage::TextExtracted,
            &format!("{} characters supplied", params.raw_text.chars().count()),
        );

        self.run_from_text(request_id, &params.raw_text).await
    }
}
