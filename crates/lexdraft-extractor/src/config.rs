//! Configuration for the Extractor

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Transport timeout for extraction requests (seconds)
    pub timeout_secs: u64,

    /// Characters of the document kept in the `Content Preview` fallback
    pub preview_chars: usize,
}

impl ExtractorConfig {
    /// Get the transport timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.timeout_secs == 0 {
            return Err(ExtractorError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.preview_chars == 0 {
            return Err(ExtractorError::Config(
                "preview_chars must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Aggressive preset: short timeout, terse preview
    pub fn aggressive() -> Self {
        Self {
            timeout_secs: 30,
            preview_chars: 60,
        }
    }

    /// Lenient preset: long timeout for slow backends, longer preview
    pub fn lenient() -> Self {
        Self {
            timeout_secs: 300,
            preview_chars: 250,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 120,
            preview_chars: 100,
        }
    }
}
