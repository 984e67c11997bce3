//! Export formats and file naming

use std::fmt;

/// Base name used for exported files until the user picks another
pub const DEFAULT_FILE_NAME: &str = "legal_document";

/// Target format handed to the export sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    /// Word document
    #[default]
    Docx,

    /// Portable document format
    Pdf,
}

impl ExportFormat {
    /// File extension (also the wire name)
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// MIME type for the converted file
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// Parse a format name, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "docx" => Some(ExportFormat::Docx),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }

    /// `<base_name>.<extension>`
    ///
    /// # Examples
    ///
    /// ```
    /// use lexdraft_domain::ExportFormat;
    ///
    /// assert_eq!(ExportFormat::Pdf.file_name("lease"), "lease.pdf");
    /// ```
    pub fn file_name(&self, base_name: &str) -> String {
        format!("{}.{}", base_name, self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid export format: {}", s))
    }
}
