use std::sync::Arc;

use futures::future::join_all;
use uuid::Uuid;

use crate::domain::logger::Logger;
use crate::domain::prescription::model::{
    CandidateName, CandidateResolution, LineItem, ResolutionOutcome,
};
use crate::domain::prescription::services::CatalogSearchService;

/// Resolves candidate names against the product catalog.
///
/// Each candidate gets its own lookup. Lookups run concurrently and are
/// awaited independently: a failing or slow lookup never cancels the others,
/// and a failure is recorded as `QueryFailed` instead of being propagated.
pub struct CatalogResolver {
    pub catalog: Arc<dyn CatalogSearchService>,
    pub logger: Arc<dyn Logger>,
}

impl CatalogResolver {
    /// Returns one resolution per candidate, in candidate order.
    pub async fn resolve(
        &self,
        request_id: Uuid,
        candidates: &[CandidateName],
    ) -> Vec<CandidateResolution> {
        join_all(
            candidates
                .iter()
                .enumerate()
                .map(|(position, candidate)| self.resolve_one(request_id, position, candidate)),
        )
        .await
    }

    async fn resolve_one(
        &self,
        request_id: Uuid,
        position: usize,
        candidate: &CandidateName,
    ) -> CandidateResolution {
        let outcome = match self.catalog.search_product(candidate).await {
            Ok(Some(variant_id)) => {
                self.logger.debug(&format!(
                    "[{}] candidate #{} '{}' matched variant {}",
                    request_id,
                    position + 1,
                    candidate,
                    variant_id
                ));
                ResolutionOutcome::Found(LineItem::single(variant_id))
            }
            Ok(None) => {
                self.logger.debug(&format!(
                    "[{}] candidate #{} '{}' has no catalog match",
                    request_id,
                    position + 1,
                    candidate
                ));
                ResolutionOutcome::NotFound
            }
            Err(err) => {
                let reason = err.details().unwrap_or_default().to_string();
                self.logger.warn(&format!(
                    "[{}] catalog lookup failed for candidate #{} '{}': {} ({})",
                    request_id,
                    position + 1,
                    candidate,
                    err,
                    reason
                ));
                ResolutionOutcome::QueryFailed(reason)
            }
        };

        CandidateResolution {
            candidate: candidate.clone(),
            outcome,
        }
    }
}
