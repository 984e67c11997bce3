//! Preview session configuration

use crate::error::PreviewError;
use lexdraft_domain::{ExportFormat, DEFAULT_FILE_NAME};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a preview session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Base name offered for exported files
    pub default_file_name: String,

    /// Export format selected when a session starts (`docx` or `pdf`)
    pub default_format: String,

    /// Transport timeout for refinement requests (seconds)
    pub refine_timeout_secs: u64,

    /// Clear verification whenever content or details change
    pub reset_verification_on_change: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            default_file_name: DEFAULT_FILE_NAME.to_string(),
            default_format: ExportFormat::default().to_string(),
            refine_timeout_secs: 120,
            reset_verification_on_change: false,
        }
    }
}

impl PreviewConfig {
    /// Strict preset: any change to the draft requires re-verification
    pub fn strict() -> Self {
        Self {
            reset_verification_on_change: true,
            ..Self::default()
        }
    }

    /// Get the refinement transport timeout as a Duration
    pub fn refine_timeout(&self) -> Duration {
        Duration::from_secs(self.refine_timeout_secs)
    }

    /// Parsed `default_format`
    pub fn export_format(&self) -> Result<ExportFormat, PreviewError> {
        ExportFormat::parse(&self.default_format).ok_or_else(|| {
            PreviewError::Config(format!("unknown export format '{}'", self.default_format))
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), PreviewError> {
        if self.default_file_name.trim().is_empty() {
            return Err(PreviewError::Config(
                "default_file_name cannot be empty".to_string(),
            ));
        }
        if self.refine_timeout_secs == 0 {
            return Err(PreviewError::Config(
                "refine_timeout_secs must be greater than 0".to_string(),
            ));
        }
        self.export_format()?;
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, PreviewError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| PreviewError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, PreviewError> {
        toml::to_string_pretty(self)
            .map_err(|e| PreviewError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PreviewConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_file_name, "legal_document");
        assert_eq!(config.export_format().unwrap(), ExportFormat::Docx);
        assert!(!config.reset_verification_on_change);
    }

    #[test]
    fn test_strict_config() {
        let config = PreviewConfig::strict();
        assert!(config.validate().is_ok());
        assert!(config.reset_verification_on_change);
    }

    #[test]
    fn test_invalid_values() {
        let mut config = PreviewConfig::default();
        config.default_format = "odt".to_string();
        assert!(matches!(config.validate(), Err(PreviewError::Config(_))));

        let mut config = PreviewConfig::default();
        config.default_file_name = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = PreviewConfig::default();
        config.refine_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PreviewConfig {
            default_format: "pdf".to_string(),
            ..PreviewConfig::strict()
        };
        let parsed = PreviewConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_format_is_case_insensitive() {
        let parsed = PreviewConfig::from_toml("default_format = \"PDF\"").unwrap();
        assert_eq!(parsed.export_format().unwrap(), ExportFormat::Pdf);
    }
}
