//! Lexdraft Preview
//!
//! Review state for a generated legal draft, from first look to export.
//!
//! A [`PreviewSession`] provides:
//! - The detail record (defaults, document details, extraction results)
//! - The categorised view used to lay out editable fields
//! - A verification gate that must be passed before export
//! - Single-flight refinement and extraction against the generation service
//! - Manual editing through an edit buffer
//!
//! # Examples
//!
//! ```no_run
//! use lexdraft_domain::Document;
//! use lexdraft_llm::MockService;
//! use lexdraft_preview::{PreviewSession, PreviewError};
//!
//! # async fn example() -> Result<(), PreviewError> {
//! let document = Document::new("PROPERTY TRANSFER AGREEMENT ...");
//! let mut session = PreviewSession::new(document, MockService::default())?;
//!
//! session.extract_details().await?;
//! assert!(session.export_request().is_err());
//!
//! session.set_verified(true);
//! let request = session.export_request()?;
//! assert_eq!(request.file_name(), "legal_document.docx");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod busy;
mod config;
mod error;
mod events;
mod export;
mod gate;
mod refinement;
mod session;

pub use busy::{BusyFlag, BusyToken};
pub use config::PreviewConfig;
pub use error::PreviewError;
pub use events::{Notice, NoticeLevel, PreviewEvent, PreviewObserver};
pub use export::{ExportRequest, ExportSink};
pub use gate::VerificationGate;
pub use refinement::{RefineOutcome, RefinementController};
pub use session::{ExtractOutcome, PreviewSession};
