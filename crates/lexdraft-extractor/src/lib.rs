//! Lexdraft Extractor
//!
//! Turns a generated legal draft into a structured detail record.
//!
//! # Overview
//!
//! The extractor asks the generation service for a JSON object of key
//! details, then parses whatever comes back. The service is not trusted to
//! follow instructions, so parsing is staged and never fails.
//!
//! # Architecture
//!
//! ```text
//! Draft → DetailExtractor → GenerationService → parse_response → DetailRecord
//! ```
//!
//! # Key Features
//!
//! - **Fixed prompt**: asks for the canonical legal keys as JSON only
//! - **Staged parsing**: JSON object, then `key: value` lines, then a preview
//! - **Single request**: one `generate` call per extraction, awaited to completion
//! - **Draft cleanup**: strips assistant chatter from generated drafts
//!
//! # Example Usage
//!
//! ```no_run
//! use lexdraft_extractor::{DetailExtractor, ExtractorConfig, ParseStage};
//! use lexdraft_llm::MockService;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = MockService::new(r#"{"Party 1 Name": "Alice"}"#);
//! let extractor = DetailExtractor::new(service, ExtractorConfig::default());
//!
//! if let Some(extraction) = extractor.extract("LEASE AGREEMENT ...").await? {
//!     assert_eq!(extraction.stage, ParseStage::StrictJson);
//!     println!("{:?}", extraction.details.get("Party 1 Name"));
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod cleaning;
mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;


pub use cleaning::{clean_legal_document, is_draft_complete, strip_draft_marker, DRAFT_COMPLETE_MARKER};
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::DetailExtractor;
pub use parser::{parse_response, CONTENT_PREVIEW_KEY};
pub use prompt::{PromptBuilder, CANONICAL_KEYS};
pub use types::{Extraction, ParseStage};
