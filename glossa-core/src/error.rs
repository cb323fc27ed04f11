//! Error types shared by every layer
//!
//! Two families live here: language selection errors, raised while an
//! analysis context is being built, and process errors, raised by individual
//! annotation steps while a document is being analyzed.

use crate::document::Field;
use thiserror::Error;

/// Errors raised while resolving a language or its default pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageError {
    /// The code does not exist in the language registry
    #[error("Unknown language '{code}'. Use ISO 639-3 languages.")]
    Unknown {
        /// The code that was looked up
        code: String,
    },

    /// The language exists but no default pipeline is registered for it
    #[error("language '{code}' has no default pipeline")]
    Unimplemented {
        /// The ISO 639-3 code of the known language
        code: String,
    },

    /// A language table could not be parsed or failed validation
    #[error("invalid language table: {0}")]
    InvalidTable(String),
}

/// Errors raised by a single annotation step
///
/// The orchestrator hands these back to the caller untouched, so every
/// variant carries enough context to identify the failing step.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The step was asked to annotate a language it does not handle
    #[error("process '{process}' does not support language '{language}'")]
    UnsupportedLanguage {
        /// Name of the failing process
        process: String,
        /// Language code the process was invoked with
        language: String,
    },

    /// A field the step depends on has not been produced by an earlier step
    #[error("process '{process}' requires {field}, which no earlier step produced")]
    MissingField {
        /// Name of the failing process
        process: String,
        /// The field that was expected to be populated
        field: Field,
    },

    /// A populated annotation would have been overwritten with a different value
    #[error("word {position} already has a different {field} annotation")]
    AnnotationConflict {
        /// 0-based position of the word in the document
        position: usize,
        /// The conflicting field
        field: Field,
    },

    /// A tokenizer ran on a document that already holds words
    #[error("document is already tokenized ({words} words)")]
    AlreadyTokenized {
        /// Number of words already present
        words: usize,
    },

    /// A tokenizer produced words whose indices break the 1-based token /
    /// 0-based sentence numbering
    #[error("invalid tokenization: {reason}")]
    InvalidTokenization {
        /// Which index was out of sequence
        reason: String,
    },

    /// A word position outside the document was addressed
    #[error("word position {position} is out of range (document has {len} words)")]
    WordOutOfRange {
        /// Requested 0-based position
        position: usize,
        /// Number of words in the document
        len: usize,
    },

    /// A model, lexicon or annotation file the step needs is missing
    #[error("process '{process}' could not find resource '{resource}'")]
    ResourceNotFound {
        /// Name of the failing process
        process: String,
        /// Path or identifier of the missing resource
        resource: String,
    },

    /// The input could not be interpreted by the step
    #[error("process '{process}' rejected its input: {reason}")]
    MalformedInput {
        /// Name of the failing process
        process: String,
        /// What was wrong with the input
        reason: String,
    },

    /// I/O failure while reading a resource
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure reported by an externally supplied process
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl ProcessError {
    /// Wrap an arbitrary error raised by a caller-defined step
    pub fn other<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        ProcessError::Other(err.into())
    }
}

/// Result type for process execution
pub type ProcessResult<T> = std::result::Result<T, ProcessError>;
