//! Preview session: the state behind one document review
//!
//! A session owns the detail record, the verification gate, the edit buffer
//! and the export settings for a single [`Document`]. It exposes the
//! operations a preview screen needs and reports changes to subscribed
//! [`PreviewObserver`]s.

use crate::busy::BusyFlag;
use crate::config::PreviewConfig;
use crate::error::PreviewError;
use crate::events::{
    Notice, PreviewEvent, PreviewObserver, EXTRACTED_NOTICE, EXTRACT_FAILED_NOTICE,
    REFINED_NOTICE, REFINE_FAILED_NOTICE, UPDATED_NOTICE, VERIFIED_NOTICE,
};
use crate::export::{ExportRequest, ExportSink};
use crate::gate::VerificationGate;
use crate::refinement::{RefineOutcome, RefinementController};
use lexdraft_domain::{
    categorize, CategorizedDetails, DetailRecord, Document, ExportFormat, GenerationService,
    DOCUMENT_TYPE_KEY,
};
use lexdraft_extractor::{DetailExtractor, ExtractorConfig, ExtractorError, ParseStage};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of a detail extraction request that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// Document has no content; the service was not contacted
    Skipped,
    /// Another extraction is in flight; the service was not contacted
    Busy,
    /// Details were merged into the record by the given parser stage
    Extracted(ParseStage),
}

/// Review state for one document
pub struct PreviewSession<S> {
    document: Document,
    details: DetailRecord,
    gate: VerificationGate,
    extractor: DetailExtractor<S>,
    extracting: BusyFlag,
    refinement: RefinementController<S>,
    pending_instruction: String,
    edit_buffer: String,
    editing: bool,
    file_name: String,
    format: ExportFormat,
    observers: Vec<Box<dyn PreviewObserver>>,
}

impl<S> PreviewSession<S>
where
    S: GenerationService + Send + Sync,
{
    /// Start a session with default configuration
    pub fn new(document: Document, service: S) -> Result<Self, PreviewError> {
        Self::with_config(
            document,
            Arc::new(service),
            PreviewConfig::default(),
            ExtractorConfig::default(),
        )
    }

    /// Start a session with explicit configuration
    ///
    /// The detail record starts from the default set, overlaid with the
    /// document's own details.
    pub fn with_config(
        document: Document,
        service: Arc<S>,
        config: PreviewConfig,
        extractor_config: ExtractorConfig,
    ) -> Result<Self, PreviewError> {
        config.validate()?;
        extractor_config
            .validate()
            .map_err(|e| PreviewError::Config(e.to_string()))?;

        let mut details = DetailRecord::with_defaults(document.document_type.as_deref());
        if let Some(known) = &document.details {
            details.merge(known);
        }

        debug!("Starting preview session for document {}", document.id);

        Ok(Self {
            edit_buffer: document.display_text().to_string(),
            details,
            gate: VerificationGate::new(config.reset_verification_on_change),
            extractor: DetailExtractor::with_shared(Arc::clone(&service), extractor_config),
            extracting: BusyFlag::new(),
            refinement: RefinementController::new(service),
            pending_instruction: String::new(),
            editing: false,
            file_name: config.default_file_name.clone(),
            format: config.export_format()?,
            observers: Vec::new(),
            document,
        })
    }

    /// Register an observer for session events
    pub fn subscribe(&mut self, observer: impl PreviewObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&self, event: PreviewEvent) {
        for observer in &self.observers {
            observer.on_event(&event);
        }
    }

    fn notify(&self, notice: Notice) {
        self.emit(PreviewEvent::Notice(notice));
    }

    fn draft_changed(&mut self) {
        if self.gate.content_changed() {
            self.emit(PreviewEvent::VerificationChanged(false));
        }
    }

    // --- document -------------------------------------------------------

    /// The document under review
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Raw draft text
    pub fn content(&self) -> &str {
        &self.document.content
    }

    /// Text sent for refinement and export: the content, or the edit buffer
    /// while the content is empty
    pub fn working_draft(&self) -> &str {
        if self.document.content.is_empty() {
            &self.edit_buffer
        } else {
            &self.document.content
        }
    }

    fn replace_content(&mut self, content: String) {
        self.document.content = content.clone();
        self.edit_buffer = content.clone();
        self.emit(PreviewEvent::ContentUpdated(content));
        self.draft_changed();
    }

    // --- details --------------------------------------------------------

    /// Current detail record, including `Document Type`
    pub fn details(&self) -> &DetailRecord {
        &self.details
    }

    /// `Document Type` shown above the categorised fields
    pub fn document_type(&self) -> Option<&str> {
        self.details.get(DOCUMENT_TYPE_KEY)
    }

    /// Details sorted into display buckets, recomputed on every call
    pub fn categorized(&self) -> CategorizedDetails {
        categorize(&self.details)
    }

    /// Edit one detail value
    ///
    /// `Document Type` is read-only here; only extraction may change it.
    pub fn set_detail(&mut self, key: &str, value: impl Into<String>) -> Result<(), PreviewError> {
        if key == DOCUMENT_TYPE_KEY {
            return Err(PreviewError::ReadOnlyDetail(key.to_string()));
        }
        self.details.insert(key, value);
        self.emit(PreviewEvent::DetailsChanged);
        self.draft_changed();
        Ok(())
    }

    /// Whether an extraction is in flight
    pub fn is_extracting(&self) -> bool {
        self.extracting.is_busy()
    }

    /// Flag guarding extraction, shared with hosts that track progress
    pub fn extraction_flag(&self) -> &BusyFlag {
        &self.extracting
    }

    /// Ask the service for the document's details and merge them in
    ///
    /// Extracted keys overwrite existing ones; keys the response does not
    /// mention keep their values.
    pub async fn extract_details(&mut self) -> Result<ExtractOutcome, PreviewError> {
        if !self.document.has_content() {
            debug!("No content to extract details from");
            return Ok(ExtractOutcome::Skipped);
        }

        let Some(_token) = self.extracting.try_acquire() else {
            debug!("Extraction already in flight");
            return Ok(ExtractOutcome::Busy);
        };

        let extraction = match self.extractor.extract(&self.document.content).await {
            Ok(Some(extraction)) => extraction,
            Ok(None) => return Ok(ExtractOutcome::Skipped),
            Err(e) => {
                warn!("Detail extraction failed: {}", e);
                let message = match &e {
                    ExtractorError::Service(message) if !message.is_empty() => message.clone(),
                    _ => EXTRACT_FAILED_NOTICE.to_string(),
                };
                self.notify(Notice::error(message.clone()));
                return Err(PreviewError::ExtractionService(message));
            }
        };

        info!(
            "Merging {} extracted details ({} stage)",
            extraction.details.len(),
            extraction.stage
        );
        self.details.merge(&extraction.details);
        self.emit(PreviewEvent::DetailsChanged);
        self.notify(Notice::success(EXTRACTED_NOTICE));
        self.draft_changed();

        Ok(ExtractOutcome::Extracted(extraction.stage))
    }

    // --- verification and export ---------------------------------------

    /// Whether the user has confirmed the details
    pub fn is_verified(&self) -> bool {
        self.gate.is_verified()
    }

    /// Record the user's confirmation (or withdrawal of it)
    pub fn set_verified(&mut self, value: bool) {
        if self.gate.set(value) {
            self.emit(PreviewEvent::VerificationChanged(value));
            if value {
                self.notify(Notice::success(VERIFIED_NOTICE));
            }
        }
    }

    /// Base name for exported files
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Change the export base name; blank names are rejected
    pub fn set_file_name(&mut self, base_name: impl Into<String>) -> Result<(), PreviewError> {
        let base_name = base_name.into();
        if base_name.trim().is_empty() {
            return Err(PreviewError::InvalidFileName);
        }
        self.file_name = base_name;
        Ok(())
    }

    /// Selected export format
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// Select the export format
    pub fn set_format(&mut self, format: ExportFormat) {
        self.format = format;
    }

    /// Approved export request, if the details are verified
    pub fn export_request(&self) -> Result<ExportRequest, PreviewError> {
        self.gate
            .authorize(self.working_draft(), self.format, &self.file_name)
    }

    /// Hand the approved draft to an export sink
    ///
    /// Returns the exported file name.
    pub fn export<E: ExportSink>(&self, sink: &mut E) -> Result<String, PreviewError> {
        let request = self.export_request()?;
        let file_name = request.file_name().to_string();
        info!("Exporting {}", file_name);
        sink.deliver(request)
            .map_err(|e| PreviewError::Export(e.to_string()))?;
        Ok(file_name)
    }

    // --- refinement -----------------------------------------------------

    /// Whether a refinement is in flight
    pub fn is_refining(&self) -> bool {
        self.refinement.is_busy()
    }

    /// Controller used for refinement, shared with clones
    pub fn refinement(&self) -> &RefinementController<S> {
        &self.refinement
    }

    /// Instruction kept from the last refinement that did not succeed
    pub fn pending_instruction(&self) -> &str {
        &self.pending_instruction
    }

    /// Rewrite the draft following a natural-language instruction
    ///
    /// On success the refined text replaces the content. On failure the
    /// content is untouched and the instruction stays pending for a retry.
    pub async fn refine(&mut self, instruction: impl Into<String>) -> Result<RefineOutcome, PreviewError> {
        let previous = std::mem::replace(&mut self.pending_instruction, instruction.into());

        let outcome = self
            .refinement
            .refine(self.working_draft(), &self.pending_instruction)
            .await;

        match outcome {
            Ok(RefineOutcome::Refined(text)) => {
                self.pending_instruction.clear();
                self.replace_content(text.clone());
                self.notify(Notice::success(REFINED_NOTICE));
                Ok(RefineOutcome::Refined(text))
            }
            Ok(other) => {
                // Not accepted, so the earlier instruction stays pending
                self.pending_instruction = previous;
                Ok(other)
            }
            Err(e) => {
                self.notify(Notice::error(REFINE_FAILED_NOTICE));
                Err(e)
            }
        }
    }

    // --- manual editing -------------------------------------------------

    /// Whether the edit buffer is open
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Text in the edit buffer
    pub fn edit_buffer(&self) -> &str {
        &self.edit_buffer
    }

    /// Open the edit buffer
    pub fn begin_edit(&mut self) {
        self.editing = true;
    }

    /// Replace the edit buffer text
    pub fn set_edit_buffer(&mut self, text: impl Into<String>) {
        self.edit_buffer = text.into();
    }

    /// Save the edit buffer as the new content and close it
    pub fn save_edit(&mut self) {
        let content = self.edit_buffer.clone();
        self.editing = false;
        self.replace_content(content);
        self.notify(Notice::success(UPDATED_NOTICE));
    }

    /// Discard the edit buffer and close it
    pub fn cancel_edit(&mut self) {
        self.editing = false;
        self.edit_buffer = self.document.display_text().to_string();
    }
}
