//! Preview error types

use thiserror::Error;

/// Errors that can occur during a preview session
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreviewError {
    /// Detail extraction failed at the service
    #[error("{0}")]
    ExtractionService(String),

    /// Refinement failed at the service
    #[error("{0}")]
    RefinementService(String),

    /// Export attempted before the details were verified
    #[error("Document details must be verified before export")]
    NotVerified,

    /// Detail cannot be edited by the user
    #[error("Detail '{0}' is read-only")]
    ReadOnlyDetail(String),

    /// Export file name is empty
    #[error("File name cannot be empty")]
    InvalidFileName,

    /// Export sink failed to deliver the document
    #[error("Export failed: {0}")]
    Export(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
