//! Export requests and sinks

use lexdraft_domain::ExportFormat;

/// A document approved for export
///
/// Only a verified session can produce one, so holding an `ExportRequest`
/// means the details were confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    content: String,
    format: ExportFormat,
    file_name: String,
}

impl ExportRequest {
    pub(crate) fn new(content: String, format: ExportFormat, base_name: &str) -> Self {
        Self {
            content,
            format,
            file_name: format.file_name(base_name),
        }
    }

    /// Draft text to convert
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Target format
    pub fn format(&self) -> ExportFormat {
        self.format
    }

    /// `<base_name>.<format>`
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Host-side consumer of approved documents (conversion, download, upload)
pub trait ExportSink {
    /// Error type returned by the sink
    type Error: std::fmt::Display;

    /// Deliver an approved document
    fn deliver(&mut self, request: ExportRequest) -> Result<(), Self::Error>;
}
