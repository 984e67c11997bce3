//! Refine command implementation.

use super::{build_service, read_text};
use crate::cli::RefineArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use lexdraft_preview::{RefineOutcome, RefinementController};
use std::fs;
use std::sync::Arc;

/// Execute the refine command.
pub async fn execute_refine(args: RefineArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let draft = read_text(&args.file)?;
    let controller = RefinementController::new(Arc::new(build_service(config)?));

    match controller.refine(&draft, &args.instruction).await? {
        RefineOutcome::Skipped => {
            println!("{}", formatter.warning("Instruction is empty, nothing to refine"));
        }
        RefineOutcome::Busy => {
            println!("{}", formatter.warning("A refinement is already running"));
        }
        RefineOutcome::Refined(text) if args.in_place => {
            fs::write(&args.file, &text)?;
            println!(
                "{}",
                formatter.success(&format!("Refined {}", args.file.display()))
            );
        }
        RefineOutcome::Refined(text) => println!("{}", text),
    }

    Ok(())
}
