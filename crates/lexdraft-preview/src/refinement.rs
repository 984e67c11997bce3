//! Single-flight refinement of the draft

use crate::busy::BusyFlag;
use crate::error::PreviewError;
use lexdraft_domain::GenerationService;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a refinement request that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefineOutcome {
    /// Instruction was blank; the service was not contacted
    Skipped,
    /// Another refinement is in flight; the service was not contacted
    Busy,
    /// Replacement draft returned by the service
    Refined(String),
}

/// Sends the current draft plus an instruction to the generation service
///
/// Clones share the service and the busy flag, so a refinement started
/// through one clone makes the others report [`RefineOutcome::Busy`].
pub struct RefinementController<S> {
    service: Arc<S>,
    busy: BusyFlag,
}

impl<S> Clone for RefinementController<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            busy: self.busy.clone(),
        }
    }
}

impl<S> RefinementController<S>
where
    S: GenerationService + Send + Sync,
{
    /// Create a controller over a shared service
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            busy: BusyFlag::new(),
        }
    }

    /// Whether a refinement is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Ask the service to rewrite `current_draft` following `instruction`
    ///
    /// An empty draft is sent as-is. Dropping the returned future before it
    /// completes releases the busy flag.
    pub async fn refine(
        &self,
        current_draft: &str,
        instruction: &str,
    ) -> Result<RefineOutcome, PreviewError> {
        if instruction.trim().is_empty() {
            debug!("Empty refinement instruction, skipping");
            return Ok(RefineOutcome::Skipped);
        }

        let Some(_token) = self.busy.try_acquire() else {
            debug!("Refinement already in flight");
            return Ok(RefineOutcome::Busy);
        };

        info!(
            "Refining draft ({} chars) with instruction ({} chars)",
            current_draft.len(),
            instruction.len()
        );

        // Runs to completion; only the transport bounds how long this waits
        let refined = self
            .service
            .refine(current_draft, instruction)
            .await
            .map_err(|e| {
                warn!("Refinement failed: {}", e);
                PreviewError::RefinementService(e.to_string())
            })?;

        info!("Refinement complete, {} chars", refined.len());
        Ok(RefineOutcome::Refined(refined))
    }
}
