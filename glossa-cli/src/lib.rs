//! glossa CLI library
//!
//! This library provides the command-line interface for the glossa
//! annotation pipelines: analyzing files, listing the registries and
//! checking pipeline configurations.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use config::CliConfig;
pub use error::{CliError, CliResult};
