//! Extract command implementation.

use super::{build_service, read_text};
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use lexdraft_domain::{categorize, DEFAULT_DOCUMENT_TYPE, DOCUMENT_TYPE_KEY};
use lexdraft_extractor::DetailExtractor;

/// Execute the extract command.
pub async fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let content = read_text(&args.file)?;
    let extractor = DetailExtractor::new(build_service(config)?, config.extractor.clone());

    let Some(extraction) = extractor.extract(&content).await? else {
        println!("{}", formatter.warning("Document is empty, nothing to extract"));
        return Ok(());
    };

    let document_type = extraction
        .details
        .get(DOCUMENT_TYPE_KEY)
        .unwrap_or(DEFAULT_DOCUMENT_TYPE);
    let buckets = categorize(&extraction.details);

    println!(
        "{}",
        formatter.format_categorized(document_type, &buckets, Some(extraction.stage))?
    );
    Ok(())
}
