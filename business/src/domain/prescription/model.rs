use url::Url;
use uuid::Uuid;

use super::errors::PrescriptionError;
use super::value_objects::ImageMediaType;

/// An uploaded prescription photo ready to be sent to text recognition.
#[derive(Debug, Clone)]
pub struct PrescriptionImage {
    bytes: Vec<u8>,
    media_type: ImageMediaType,
}

impl PrescriptionImage {
    pub fn new(bytes: Vec<u8>, media_type: ImageMediaType) -> Result<Self, PrescriptionError> {
        if bytes.is_empty() {
            return Err(PrescriptionError::ImageEmpty);
        }
        Ok(Self { bytes, media_type })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn media_type(&self) -> ImageMediaType {
        self.media_type
    }
}

/// Fragments this short or shorter are never treated as medication names.
const MAX_DISCARDED_CHARS: usize = 3;

/// A normalized text fragment believed to name a medication.
///
/// Always trimmed, lower-cased and longer than three characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CandidateName(String);

impl CandidateName {
    /// Normalizes a raw fragment, returning `None` when it is too short to
    /// be a medication name.
    pub fn parse(fragment: &str) -> Option<Self> {
        let normalized = fragment.trim().to_lowercase();
        if normalized.chars().count() <= MAX_DISCARDED_CHARS {
            return None;
        }
        Some(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CandidateName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque catalog reference of a purchasable product variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariantId(String);

impl VariantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VariantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One purchasable unit ready for cart insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub variant_id: VariantId,
    pub quantity: u32,
}

impl LineItem {
    /// Every matched candidate contributes exactly one unit.
    pub fn single(variant_id: VariantId) -> Self {
        Self {
            variant_id,
            quantity: 1,
        }
    }
}

/// Per-candidate result of a catalog lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    Found(LineItem),
    NotFound,
    QueryFailed(String),
}

impl ResolutionOutcome {
    pub fn line_item(&self) -> Option<&LineItem> {
        match self {
            ResolutionOutcome::Found(item) => Some(item),
            ResolutionOutcome::NotFound | ResolutionOutcome::QueryFailed(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateResolution {
    pub candidate: CandidateName,
    pub outcome: ResolutionOutcome,
}

/// Checkout link of a pre-filled cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutUrl(Url);

impl CheckoutUrl {
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        Url::parse(raw).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for CheckoutUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: Option<String>,
    pub checkout_url: CheckoutUrl,
}

/// Stages a prescription passes through within one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    TextExtracted,
    CandidatesExtracted,
    Resolved,
    CartCreated,
    NoProductsFound,
    Failed,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::Received => write!(f, "received"),
            PipelineStage::TextExtracted => write!(f, "text_extracted"),
            PipelineStage::CandidatesExtracted => write!(f, "candidates_extracted"),
            PipelineStage::Resolved => write!(f, "resolved"),
            PipelineStage::CartCreated => write!(f, "cart_created"),
            PipelineStage::NoProductsFound => write!(f, "no_products_found"),
            PipelineStage::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrescriptionOutcome {
    CartCreated(Cart),
    NoProductsFound,
}

/// Everything a successful pipeline run produced.
#[derive(Debug, Clone)]
pub struct PrescriptionReport {
    pub request_id: Uuid,
    pub candidates: Vec<CandidateName>,
    pub resolutions: Vec<CandidateResolution>,
    pub outcome: PrescriptionOutcome,
}

impl PrescriptionReport {
    /// Matched line items in candidate order.
    pub fn line_items(&self) -> Vec<LineItem> {
        collect_line_items(&self.resolutions)
    }

    pub fn stage(&self) -> PipelineStage {
        match self.outcome {
            PrescriptionOutcome::CartCreated(_) => PipelineStage::CartCreated,
            PrescriptionOutcome::NoProductsFound => PipelineStage::NoProductsFound,
        }
    }

    pub fn checkout_url(&self) -> Option<&CheckoutUrl> {
        match &self.outcome {
            PrescriptionOutcome::CartCreated(cart) => Some(&cart.checkout_url),
            PrescriptionOutcome::NoProductsFound => None,
        }
    }
}

/// Keeps only the found outcomes, preserving their order.
pub fn collect_line_items(resolutions: &[CandidateResolution]) -> Vec<LineItem> {
    resolutions
        .iter()
        .filter_map(|resolution| resolution.outcome.line_item().cloned())
        .collect()
}
