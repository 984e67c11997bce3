//! Lexdraft CLI library.
//!
//! Configuration, command execution, output formatting and the interactive
//! preview used by the `lexdraft` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use export::FileExportSink;
pub use output::Formatter;
