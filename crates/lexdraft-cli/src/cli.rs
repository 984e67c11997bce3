//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Lexdraft CLI - Review, refine and export AI-generated legal drafts.
#[derive(Debug, Parser)]
#[command(name = "lexdraft")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "LEXDRAFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract key details from a draft
    Extract(ExtractArgs),

    /// Sort a JSON object of details into display categories
    Categorize(CategorizeArgs),

    /// Refine a draft with a natural-language instruction
    Refine(RefineArgs),

    /// Generate a new draft from a prompt
    Draft(DraftArgs),

    /// Strip assistant chatter and markdown from a draft
    Clean(CleanArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Review a draft interactively and export it once verified
    Preview(PreviewArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Draft file
    pub file: PathBuf,
}

/// Arguments for the categorize command.
#[derive(Debug, Parser)]
pub struct CategorizeArgs {
    /// JSON file containing an object of details
    pub file: PathBuf,
}

/// Arguments for the refine command.
#[derive(Debug, Parser)]
pub struct RefineArgs {
    /// Draft file
    pub file: PathBuf,

    /// What to change
    #[arg(short, long)]
    pub instruction: String,

    /// Write the refined draft back to the file
    #[arg(long)]
    pub in_place: bool,
}

/// Arguments for the draft command.
#[derive(Debug, Parser)]
pub struct DraftArgs {
    /// Description of the document to draft
    #[arg(long)]
    pub prompt: String,

    /// Clean the generated draft
    #[arg(long)]
    pub clean: bool,

    /// Write the draft to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the clean command.
#[derive(Debug, Parser)]
pub struct CleanArgs {
    /// Draft file
    pub file: PathBuf,

    /// Write the cleaned draft to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the preview command.
#[derive(Debug, Parser)]
pub struct PreviewArgs {
    /// Draft file
    pub file: PathBuf,

    /// Known document type
    #[arg(short = 't', long)]
    pub document_type: Option<String>,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Use {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Add {
        /// Profile name
        name: String,
        /// Service base URL
        #[arg(short, long)]
        url: String,
        /// Bearer token sent with every request
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
