//! Session events delivered to the host

use std::fmt;

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
}

/// Short message meant for a toast or status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Text shown to the user
    pub message: String,
}

impl Notice {
    /// Success notice
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Error notice
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub(crate) const VERIFIED_NOTICE: &str = "Document details verified!";
pub(crate) const UPDATED_NOTICE: &str = "Document updated successfully!";
pub(crate) const REFINED_NOTICE: &str = "Document refined successfully!";
pub(crate) const EXTRACTED_NOTICE: &str = "Document details extracted successfully!";
pub(crate) const REFINE_FAILED_NOTICE: &str = "Failed to refine document. Please try again.";
pub(crate) const EXTRACT_FAILED_NOTICE: &str = "Failed to extract details. Please try again.";

/// Something the host may want to react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewEvent {
    /// Document content was replaced (saved edit or refinement)
    ContentUpdated(String),
    /// The detail record changed
    DetailsChanged,
    /// Verification flag flipped
    VerificationChanged(bool),
    /// User-facing message
    Notice(Notice),
}

/// Receives session events
pub trait PreviewObserver: Send + Sync {
    /// Called synchronously for every event, in emission order
    fn on_event(&self, event: &PreviewEvent);
}

impl<F> PreviewObserver for F
where
    F: Fn(&PreviewEvent) + Send + Sync,
{
    fn on_event(&self, event: &PreviewEvent) {
        self(event)
    }
}
