//! Command implementations.

pub mod categorize;
pub mod clean;
pub mod draft;
pub mod extract;
pub mod profile;
pub mod refine;

pub use self::categorize::execute_categorize;
pub use self::clean::execute_clean;
pub use self::draft::execute_draft;
pub use self::extract::execute_extract;
pub use self::profile::execute_profile;
pub use self::refine::execute_refine;

use crate::config::Config;
use crate::error::{CliError, Result};
use lexdraft_llm::HttpService;
use std::fs;
use std::path::Path;

/// Build the HTTP service for the active profile.
pub fn build_service(config: &Config) -> Result<HttpService> {
    let profile = config.get_active_profile()?;
    // The transport is the only timeout; extraction and refinement wait on it
    let timeout = config.extractor.timeout().max(config.preview.refine_timeout());
    let service = HttpService::with_timeout(&profile.service_url, timeout)?;
    Ok(match &profile.api_token {
        Some(token) => service.with_api_token(token),
        None => service,
    })
}

/// Read a draft file, rejecting empty paths with a clear message.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        CliError::InvalidInput(format!("Cannot read '{}': {}", path.display(), e))
    })
}

/// Write `text` to `output`, or print it when no file is given.
pub fn write_or_print(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text)?,
        None => println!("{}", text),
    }
    Ok(())
}
