//! Draft command implementation.

use super::{build_service, write_or_print};
use crate::cli::DraftArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use lexdraft_domain::GenerationService;
use lexdraft_extractor::{clean_legal_document, is_draft_complete, strip_draft_marker};

/// Execute the draft command.
pub async fn execute_draft(args: DraftArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let service = build_service(config)?;
    let response = service.generate(&args.prompt, &[]).await?;

    let text = finish_draft(&response, args.clean);
    if text.is_none() {
        // The service answered with a question instead of a draft
        println!("{}", formatter.info("The service needs more information:"));
    }

    write_or_print(args.output.as_deref(), text.as_deref().unwrap_or(&response))?;
    Ok(())
}

/// Completed draft text, or `None` when the response is not a finished draft.
fn finish_draft(response: &str, clean: bool) -> Option<String> {
    if !is_draft_complete(response) {
        return None;
    }
    let draft = strip_draft_marker(response);
    Some(if clean { clean_legal_document(&draft) } else { draft })
}
