//! glossa command-line entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use glossa_cli::commands::{Commands, GlobalOptions};
use glossa_cli::CliConfig;

#[derive(Debug, Parser)]
#[command(
    name = "glossa",
    version,
    about = "Annotation pipelines for ancient and historical languages",
    after_help = "EXAMPLES:\n  \
                  glossa analyze --example -l lat\n  \
                  glossa analyze -i 'texts/*.txt' -l grc -f conllu -o out.conllu\n  \
                  glossa list languages\n  \
                  glossa generate-config -l ang -o ang.toml\n  \
                  glossa validate --pipeline-config ang.toml"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file with default settings
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };
    log::debug!("Configuration: {config:?}");

    let options = GlobalOptions {
        config,
        quiet: cli.quiet,
        verbose: cli.verbose,
    };
    cli.command.execute(&options)
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();
    }
}
