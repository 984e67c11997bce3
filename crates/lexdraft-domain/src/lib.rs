//! Lexdraft Domain Layer
//!
//! Core model for reviewing AI-generated legal drafts before export. This crate
//! holds the value types, the categorization rules and the trait boundary to
//! the generation service. Its only external dependency is `uuid`.
//!
//! ## Key Concepts
//!
//! - **Document**: a generated draft, identified by a UUIDv7 `DocumentId`
//! - **DetailRecord**: ordered key/value facts extracted from a draft
//! - **Category**: the five display buckets details are sorted into
//! - **ExportFormat**: the file formats a verified draft can be exported as
//!
//! ## Architecture
//!
//! - Pure logic only, no I/O
//! - Infrastructure implementations live in other crates
//! - `GenerationService` is the seam to the text generation backend

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod details;
pub mod document;
pub mod export;
pub mod message;
pub mod traits;

// Re-exports for convenience
pub use category::{
    categorize, classify, CategorizedDetails, Category, CategoryRule, KeyMatcher, Placement,
    CATEGORY_RULES,
};
pub use details::{DetailRecord, DEFAULT_DETAILS, DEFAULT_DOCUMENT_TYPE, DOCUMENT_TYPE_KEY};
pub use document::{Document, DocumentId};
pub use export::{ExportFormat, DEFAULT_FILE_NAME};
pub use message::{ChatMessage, Role};
pub use traits::GenerationService;
