//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use lexdraft_domain::{CategorizedDetails, DetailRecord};
use lexdraft_extractor::ParseStage;
use lexdraft_preview::{Notice, NoticeLevel};
use serde_json::{Map, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format categorised details, with the document type shown separately.
    pub fn format_categorized(
        &self,
        document_type: &str,
        buckets: &CategorizedDetails,
        stage: Option<ParseStage>,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_categorized_json(document_type, buckets, stage),
            OutputFormat::Table => Ok(self.format_categorized_table(document_type, buckets, stage)),
        }
    }

    fn format_categorized_json(
        &self,
        document_type: &str,
        buckets: &CategorizedDetails,
        stage: Option<ParseStage>,
    ) -> Result<String> {
        let mut root = Map::new();
        root.insert("document_type".to_string(), Value::from(document_type));
        if let Some(stage) = stage {
            root.insert("stage".to_string(), Value::from(stage.as_str()));
        }
        for (category, details) in buckets.iter() {
            root.insert(category.as_str().to_string(), details_json(details));
        }
        Ok(serde_json::to_string_pretty(&Value::Object(root))?)
    }

    fn format_categorized_table(
        &self,
        document_type: &str,
        buckets: &CategorizedDetails,
        stage: Option<ParseStage>,
    ) -> String {
        let mut out = format!("{} {}\n", self.colorize("Document Type:", "cyan"), document_type);

        if buckets.total() == 0 {
            out.push_str(&self.colorize("No details found.", "yellow"));
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Category", "Field", "Value"]);
            for (category, details) in buckets.non_empty() {
                for (key, value) in details.iter() {
                    builder.push_record([category.heading(), key, value]);
                }
            }

            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));
            out.push_str(&table.to_string());
        }

        if let Some(stage) = stage {
            out.push('\n');
            out.push_str(&self.info(&format!("Parsed via {} stage", stage)));
        }
        out
    }

    /// Format a session notice.
    pub fn notice(&self, notice: &Notice) -> String {
        match notice.level {
            NoticeLevel::Success => self.success(&notice.message),
            NoticeLevel::Error => self.error(&notice.message),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn details_json(details: &DetailRecord) -> Value {
    Value::Object(
        details
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(v)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexdraft_domain::categorize;

    fn scenario() -> CategorizedDetails {
        let record: DetailRecord = [
            ("Party 1 Name", "John Smith"),
            ("Property Address", "123 Main Street"),
            ("Effective Date", "2024-01-01"),
            ("Consideration", "$100,000"),
            ("Governing Law", "State of California"),
        ]
        .into_iter()
        .collect();
        categorize(&record)
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter
            .format_categorized("Deed", &scenario(), Some(ParseStage::StrictJson))
            .unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["document_type"], "Deed");
        assert_eq!(value["stage"], "json");
        assert_eq!(value["parties"]["Property Address"], "123 Main Street");
        assert_eq!(value["legal"]["Governing Law"], "State of California");
        assert!(value["property"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_categorized("Deed", &scenario(), None).unwrap();

        assert!(output.starts_with("Document Type: Deed"));
        assert!(output.contains("Category"));
        assert!(output.contains("Effective Date"));
        assert!(!output.contains("Parsed via"));
    }

    #[test]
    fn test_empty_details() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_categorized("Legal Document", &CategorizedDetails::default(), Some(ParseStage::Fallback))
            .unwrap();
        assert!(output.contains("No details found"));
        assert!(output.contains("Parsed via fallback stage"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.notice(&Notice::error("nope")), "✗ nope");
    }
}
