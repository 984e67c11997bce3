//! Lexdraft CLI - Review, refine and export AI-generated legal drafts.

use clap::Parser;
use lexdraft_cli::commands;
use lexdraft_cli::repl;
use lexdraft_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> lexdraft_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter).await?,
        Command::Categorize(args) => commands::execute_categorize(args, &formatter)?,
        Command::Refine(args) => commands::execute_refine(args, &config, &formatter).await?,
        Command::Draft(args) => commands::execute_draft(args, &config, &formatter).await?,
        Command::Clean(args) => commands::execute_clean(args)?,
        Command::Profile(args) => commands::execute_profile(args, &mut config, &formatter)?,
        Command::Preview(args) => repl::run_preview(args, &config, &formatter).await?,
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}
