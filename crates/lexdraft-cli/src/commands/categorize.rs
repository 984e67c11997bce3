//! Categorize command implementation.

use super::read_text;
use crate::cli::CategorizeArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use lexdraft_domain::{categorize, DetailRecord, DEFAULT_DOCUMENT_TYPE, DOCUMENT_TYPE_KEY};
use serde_json::Value;

/// Execute the categorize command.
pub fn execute_categorize(args: CategorizeArgs, formatter: &Formatter) -> Result<()> {
    let details = parse_details(&read_text(&args.file)?)?;
    let document_type = details.get(DOCUMENT_TYPE_KEY).unwrap_or(DEFAULT_DOCUMENT_TYPE);

    println!(
        "{}",
        formatter.format_categorized(document_type, &categorize(&details), None)?
    );
    Ok(())
}

/// Parse a JSON object of details; non-string values are kept as JSON text.
fn parse_details(json: &str) -> Result<DetailRecord> {
    let Value::Object(map) = serde_json::from_str::<Value>(json)? else {
        return Err(CliError::InvalidInput(
            "Expected a JSON object of details".to_string(),
        ));
    };

    Ok(map
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| match value {
            Value::String(s) => (key, s),
            other => (key, other.to_string()),
        })
        .collect())
}
