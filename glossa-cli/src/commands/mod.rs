//! CLI command implementations

use std::io;

use anyhow::Result;
use clap::Subcommand;

use crate::config::CliConfig;

pub mod analyze;
pub mod generate_config;
pub mod list;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze text with a language's pipeline
    Analyze(analyze::AnalyzeArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Check a pipeline configuration file
    Validate(validate::ValidateArgs),

    /// Write a pipeline configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

/// List subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ListCommands {
    /// List known languages
    Languages,

    /// List default pipelines and their steps
    Pipelines,

    /// List process kinds usable in pipeline configurations
    Processes,

    /// List available output formats
    Formats,
}

/// Settings shared by every command
#[derive(Debug, Default)]
pub struct GlobalOptions {
    pub config: CliConfig,
    pub quiet: bool,
    pub verbose: u8,
}

impl Commands {
    pub fn execute(&self, options: &GlobalOptions) -> Result<()> {
        match self {
            Commands::Analyze(args) => args.execute(options),
            Commands::List { subcommand } => list::execute(*subcommand, &mut io::stdout().lock()),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}
