//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
///
/// Parse problems never show up here: an unusable response degrades to the
/// next parse stage instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// Generation service rejected the request or could not be reached
    #[error("{0}")]
    Service(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
