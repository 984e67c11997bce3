//! Interactive preview mode.
//!
//! Loads a draft into a `PreviewSession` and lets the user inspect details,
//! refine or edit the text, verify it and export it from a prompt.

use crate::cli::PreviewArgs;
use crate::commands::{build_service, read_text};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::export::FileExportSink;
use crate::output::Formatter;
use lexdraft_domain::{Document, ExportFormat, GenerationService, DEFAULT_DOCUMENT_TYPE};
use lexdraft_preview::{ExtractOutcome, PreviewError, PreviewEvent, PreviewSession, RefineOutcome};
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::sync::Arc;

/// Run the interactive preview for a draft file.
pub async fn run_preview(args: PreviewArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut document = Document::new(read_text(&args.file)?);
    if let Some(document_type) = args.document_type {
        document = document.with_document_type(document_type);
    }

    let mut session = PreviewSession::with_config(
        document,
        Arc::new(build_service(config)?),
        config.preview.clone(),
        config.extractor.clone(),
    )?;

    let printer = *formatter;
    session.subscribe(move |event: &PreviewEvent| {
        if let PreviewEvent::Notice(notice) = event {
            println!("{}", printer.notice(notice));
        }
    });

    println!(
        "{}",
        formatter.info("Lexdraft preview - Type 'help' for commands, 'exit' to quit")
    );
    println!();

    let mut editor = DefaultEditor::new().map_err(|e| {
        CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e)))
    })?;
    editor
        .set_max_history_size(config.settings.history_size)
        .map_err(|e| CliError::Config(format!("Invalid history size: {}", e)))?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut sink = FileExportSink::new(&config.settings.output_dir);

    loop {
        let prompt = if session.is_verified() {
            "lexdraft (verified)> "
        } else {
            "lexdraft> "
        };

        match editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => print_help(formatter),
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, &mut session, &mut sink, formatter).await {
                            report_error(&e, formatter);
                        }
                    }
                    Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();
    Ok(())
}

/// Preview REPL command.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Show,
    Details,
    Status,
    Extract,
    Set { key: String, value: String },
    Verify(bool),
    Refine(String),
    Edit(PathBuf),
    Name(String),
    Format(ExportFormat),
    Download,
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "" => Err(CliError::InvalidInput("Empty command".to_string())),
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "show" => Ok(ReplCommand::Show),
        "details" => Ok(ReplCommand::Details),
        "status" => Ok(ReplCommand::Status),
        "extract" => Ok(ReplCommand::Extract),
        "verify" => Ok(ReplCommand::Verify(true)),
        "unverify" => Ok(ReplCommand::Verify(false)),
        "download" => Ok(ReplCommand::Download),
        "set" => parse_set_command(rest),
        "refine" => Ok(ReplCommand::Refine(rest.to_string())),
        "edit" if !rest.is_empty() => Ok(ReplCommand::Edit(PathBuf::from(rest))),
        "edit" => Err(CliError::InvalidInput("Usage: edit <file>".to_string())),
        "name" if !rest.is_empty() => Ok(ReplCommand::Name(rest.to_string())),
        "name" => Err(CliError::InvalidInput("Usage: name <file name>".to_string())),
        "format" => ExportFormat::parse(rest)
            .map(ReplCommand::Format)
            .ok_or_else(|| CliError::InvalidInput("Usage: format docx|pdf".to_string())),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            word
        ))),
    }
}

fn parse_set_command(args: &str) -> Result<ReplCommand> {
    match args.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok(ReplCommand::Set {
            key: key.trim().to_string(),
            value: value.trim().to_string(),
        }),
        _ => Err(CliError::InvalidInput("Usage: set <key> = <value>".to_string())),
    }
}

/// Execute a REPL command against the session.
async fn execute_repl_command<S>(
    cmd: ReplCommand,
    session: &mut PreviewSession<S>,
    sink: &mut FileExportSink,
    formatter: &Formatter,
) -> Result<()>
where
    S: GenerationService + Send + Sync,
{
    match cmd {
        ReplCommand::Show => println!("{}", session.working_draft()),
        ReplCommand::Details => {
            let document_type = session.document_type().unwrap_or(DEFAULT_DOCUMENT_TYPE);
            println!(
                "{}",
                formatter.format_categorized(document_type, &session.categorized(), None)?
            );
        }
        ReplCommand::Status => {
            println!("Verified: {}", if session.is_verified() { "yes" } else { "no" });
            println!("Export as: {}", session.format().file_name(session.file_name()));
        }
        ReplCommand::Extract => match session.extract_details().await? {
            ExtractOutcome::Skipped => println!("{}", formatter.warning("Document has no content")),
            ExtractOutcome::Busy => println!("{}", formatter.warning("Extraction already running")),
            ExtractOutcome::Extracted(stage) => {
                println!("{}", formatter.info(&format!("Parsed with the {} stage", stage)));
            }
        },
        ReplCommand::Set { key, value } => {
            session.set_detail(&key, value)?;
            println!("{}", formatter.success(&format!("Updated '{}'", key)));
        }
        ReplCommand::Verify(value) => {
            session.set_verified(value);
            if !value {
                println!("{}", formatter.info("Verification cleared"));
            }
        }
        ReplCommand::Refine(instruction) => match session.refine(instruction).await? {
            RefineOutcome::Skipped => println!("{}", formatter.warning("Instruction is empty")),
            RefineOutcome::Busy => println!("{}", formatter.warning("Refinement already running")),
            RefineOutcome::Refined(_) => {}
        },
        ReplCommand::Edit(path) => {
            session.begin_edit();
            match read_text(&path) {
                Ok(text) => {
                    session.set_edit_buffer(text);
                    session.save_edit();
                }
                Err(e) => {
                    session.cancel_edit();
                    return Err(e);
                }
            }
        }
        ReplCommand::Name(base_name) => {
            session.set_file_name(base_name)?;
            println!(
                "{}",
                formatter.info(&format!("Export as {}", session.format().file_name(session.file_name())))
            );
        }
        ReplCommand::Format(format) => {
            session.set_format(format);
            println!("{}", formatter.info(&format!("Export format: {}", format)));
        }
        ReplCommand::Download => {
            let file_name = session.export(sink)?;
            let written = sink
                .last_written()
                .map(|path| path.display().to_string())
                .unwrap_or(file_name);
            println!("{}", formatter.success(&format!("Saved {}", written)));
        }
        ReplCommand::Exit | ReplCommand::Help => {}
    }

    Ok(())
}

/// Print an error unless the session already raised a notice for it.
fn report_error(error: &CliError, formatter: &Formatter) {
    match error {
        CliError::Preview(PreviewError::ExtractionService(_))
        | CliError::Preview(PreviewError::RefinementService(_)) => {}
        other => eprintln!("{}", formatter.error(&other.to_string())),
    }
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  show                   - Print the current draft");
    println!("  details                - Show details by category");
    println!("  status                 - Show verification and export target");
    println!("  extract                - Extract details from the draft");
    println!("  set <key> = <value>    - Edit a detail");
    println!("  verify | unverify      - Confirm or clear the details check");
    println!("  refine <instruction>   - Ask the service to revise the draft");
    println!("  edit <file>            - Replace the draft with a file's text");
    println!("  name <file name>       - Set the export file name");
    println!("  format docx|pdf        - Set the export format");
    println!("  download               - Export the verified draft");
    println!("  help, ?                - Show this help");
    println!("  exit, quit, q          - Leave the preview");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use lexdraft_llm::MockService;
    use tempfile::TempDir;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_repl_command("quit").unwrap(), ReplCommand::Exit);
        assert_eq!(parse_repl_command("  details ").unwrap(), ReplCommand::Details);
        assert_eq!(parse_repl_command("unverify").unwrap(), ReplCommand::Verify(false));
        assert_eq!(
            parse_repl_command("format PDF").unwrap(),
            ReplCommand::Format(ExportFormat::Pdf)
        );
    }

    #[test]
    fn test_parse_set_command() {
        assert_eq!(
            parse_repl_command("set Governing Law = State of Texas").unwrap(),
            ReplCommand::Set {
                key: "Governing Law".to_string(),
                value: "State of Texas".to_string(),
            }
        );
        assert!(parse_repl_command("set Governing Law").is_err());
        assert!(parse_repl_command("set = x").is_err());
    }

    #[test]
    fn test_parse_refine_keeps_instruction_text() {
        assert_eq!(
            parse_repl_command("refine Add a closing date: March 1").unwrap(),
            ReplCommand::Refine("Add a closing date: March 1".to_string())
        );
        // Blank instruction is left for the session to skip
        assert_eq!(parse_repl_command("refine").unwrap(), ReplCommand::Refine(String::new()));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_repl_command("format odt").is_err());
        assert!(parse_repl_command("edit").is_err());
        assert!(parse_repl_command("name").is_err());
        assert!(parse_repl_command("frobnicate").is_err());
    }

    #[tokio::test]
    async fn test_download_requires_verification() {
        let dir = TempDir::new().unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut sink = FileExportSink::new(dir.path());
        let mut session =
            PreviewSession::new(Document::new("DEED OF TRUST"), MockService::default()).unwrap();

        let result = execute_repl_command(ReplCommand::Download, &mut session, &mut sink, &formatter).await;
        assert!(matches!(result, Err(CliError::Preview(PreviewError::NotVerified))));

        for cmd in [
            ReplCommand::Verify(true),
            ReplCommand::Name("deed".to_string()),
            ReplCommand::Download,
        ] {
            execute_repl_command(cmd, &mut session, &mut sink, &formatter).await.unwrap();
        }

        let written = dir.path().join("deed.docx");
        assert_eq!(sink.last_written(), Some(written.as_path()));
        assert_eq!(std::fs::read_to_string(written).unwrap(), "DEED OF TRUST");
    }

    #[tokio::test]
    async fn test_refine_and_edit_replace_draft() {
        let dir = TempDir::new().unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut sink = FileExportSink::new(dir.path());
        let service = MockService::default().with_refine_response("LEASE v2");
        let mut session = PreviewSession::new(Document::new("LEASE"), service).unwrap();

        execute_repl_command(ReplCommand::Refine("tighten".to_string()), &mut session, &mut sink, &formatter)
            .await
            .unwrap();
        assert_eq!(session.content(), "LEASE v2");

        let edited = dir.path().join("edited.txt");
        std::fs::write(&edited, "LEASE v3").unwrap();
        execute_repl_command(ReplCommand::Edit(edited), &mut session, &mut sink, &formatter)
            .await
            .unwrap();
        assert_eq!(session.content(), "LEASE v3");

        let missing = execute_repl_command(
            ReplCommand::Edit(dir.path().join("missing.txt")),
            &mut session,
            &mut sink,
            &formatter,
        )
        .await;
        assert!(missing.is_err());
        assert!(!session.is_editing());
        assert_eq!(session.content(), "LEASE v3");
    }

    #[tokio::test]
    async fn test_document_type_is_read_only() {
        let dir = TempDir::new().unwrap();
        let formatter = Formatter::new(OutputFormat::Table, false);
        let mut sink = FileExportSink::new(dir.path());
        let mut session = PreviewSession::new(Document::new("NDA"), MockService::default()).unwrap();

        let result = execute_repl_command(
            ReplCommand::Set {
                key: "Document Type".to_string(),
                value: "Lease".to_string(),
            },
            &mut session,
            &mut sink,
            &formatter,
        )
        .await;
        assert!(matches!(result, Err(CliError::Preview(PreviewError::ReadOnlyDetail(_)))));
    }
}
