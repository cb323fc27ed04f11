//! Layered error types
//!
//! Construction of an analysis context fails with [`NlpError`]; analysis
//! itself fails with the [`ProcessError`] of the step that broke, passed
//! through untouched. [`AnalyzeError`] only appears on the cancellable entry
//! point, and [`ConfigError`] only when pipelines are built from TOML.

use crate::validation::ValidationReport;
use glossa_core::{LanguageError, ProcessError};
use thiserror::Error;

/// Errors raised while building an [`Nlp`](crate::Nlp)
#[derive(Error, Debug)]
pub enum NlpError {
    /// Unknown language, or known language without a default pipeline
    #[error(transparent)]
    Language(#[from] LanguageError),

    /// Strict validation found errors in a custom pipeline
    #[error("pipeline '{description}' failed validation:\n{report}")]
    InvalidPipeline {
        /// Description of the rejected pipeline
        description: String,
        /// Every diagnostic that was found
        report: ValidationReport,
    },
}

/// Errors raised by [`Nlp::analyze_with_cancellation`](crate::Nlp::analyze_with_cancellation)
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// The cancellation token fired before a step started
    #[error("analysis cancelled after {completed_steps} step(s)")]
    Cancelled {
        /// Number of steps that finished before cancellation was observed
        completed_steps: usize,
    },

    /// A step failed
    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Errors raised while loading a pipeline configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the configuration file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The TOML was malformed or did not match the schema
    #[error("failed to parse pipeline configuration: {0}")]
    Parse(String),

    /// The configured language is unknown
    #[error(transparent)]
    Language(#[from] LanguageError),

    /// The configuration is well-formed but cannot be built
    #[error("invalid pipeline configuration: {0}")]
    Invalid(String),
}

/// Result type for building analysis contexts
pub type Result<T> = std::result::Result<T, NlpError>;
