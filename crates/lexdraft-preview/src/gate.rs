//! Verification gate in front of export

use crate::error::PreviewError;
use crate::export::ExportRequest;
use lexdraft_domain::ExportFormat;
use tracing::debug;

/// Explicit user confirmation that the extracted details are correct
///
/// Starts unverified. Only [`set`](VerificationGate::set) turns it on; with
/// `reset_on_change` any content or detail change turns it off again.
#[derive(Debug, Clone, Default)]
pub struct VerificationGate {
    verified: bool,
    reset_on_change: bool,
}

impl VerificationGate {
    /// Create an unverified gate
    pub fn new(reset_on_change: bool) -> Self {
        Self {
            verified: false,
            reset_on_change,
        }
    }

    /// Current state
    pub fn is_verified(&self) -> bool {
        self.verified
    }

    /// Set the flag; returns `true` when the value changed
    pub fn set(&mut self, value: bool) -> bool {
        let changed = self.verified != value;
        self.verified = value;
        changed
    }

    /// Content or details changed; returns `true` when verification was cleared
    pub fn content_changed(&mut self) -> bool {
        if self.reset_on_change && self.verified {
            debug!("Draft changed, clearing verification");
            self.verified = false;
            return true;
        }
        false
    }

    /// Build an export request, refusing while unverified
    pub fn authorize(
        &self,
        content: &str,
        format: ExportFormat,
        base_name: &str,
    ) -> Result<ExportRequest, PreviewError> {
        if !self.verified {
            return Err(PreviewError::NotVerified);
        }
        if base_name.trim().is_empty() {
            return Err(PreviewError::InvalidFileName);
        }
        Ok(ExportRequest::new(content.to_string(), format, base_name))
    }
}
