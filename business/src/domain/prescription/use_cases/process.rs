use async_trait::async_trait;

use crate::domain::prescription::errors::PrescriptionError;
use crate::domain::prescription::model::{PrescriptionImage, PrescriptionReport};

pub struct ProcessPrescriptionImageParams {
    pub image: PrescriptionImage,
}

pub struct ProcessPrescriptionTextParams {
    pub raw_text: String,
}

#[async_trait]
pub trait ProcessPrescriptionUseCase: Send + Sync {
    async fn execute_by_image(
        &self,
        params: ProcessPrescriptionImageParams,
    ) -> Result<PrescriptionReport, PrescriptionError>;

    async fn execute_by_text(
        &self,
        params: ProcessPrescriptionTextParams,
    ) -> Result<PrescriptionReport, PrescriptionError>;
}
