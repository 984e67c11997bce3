//! Clean command implementation.

use super::{read_text, write_or_print};
use crate::cli::CleanArgs;
use crate::error::Result;
use lexdraft_extractor::{clean_legal_document, strip_draft_marker};

/// Execute the clean command.
pub fn execute_clean(args: CleanArgs) -> Result<()> {
    let raw = read_text(&args.file)?;
    let cleaned = clean_legal_document(&strip_draft_marker(&raw));
    write_or_print(args.output.as_deref(), &cleaned)
}
