//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Implementations live in other crates.

use crate::message::ChatMessage;
use std::future::Future;

/// Text generation backend used to draft, analyse and refine documents
///
/// Implemented by the infrastructure layer (lexdraft-llm)
pub trait GenerationService {
    /// Error type for service operations; its message is shown to the user as-is
    type Error: std::fmt::Display;

    /// Generate a completion for `prompt` given prior conversation turns
    fn generate(
        &self,
        prompt: &str,
        history: &[ChatMessage],
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;

    /// Rewrite `current_draft` according to `user_request`
    fn refine(
        &self,
        current_draft: &str,
        user_request: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
