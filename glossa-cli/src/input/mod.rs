//! Input handling module

pub mod glob_resolver;

pub use glob_resolver::resolve_patterns;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glossa_engine::example_text;

use crate::error::CliError;

/// Where the text to analyze comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Text given on the command line
    Inline(String),
    /// Bundled sample passage of a language
    Example(String),
    /// A file on disk
    File(PathBuf),
}

impl InputSource {
    /// Label used in logs and multi-document output
    pub fn label(&self) -> String {
        match self {
            InputSource::Inline(_) => "<text>".to_string(),
            InputSource::Example(code) => format!("<example:{code}>"),
            InputSource::File(path) => path.display().to_string(),
        }
    }

    /// The text behind the source
    pub fn read_text(&self) -> Result<String> {
        match self {
            InputSource::Inline(text) => Ok(text.clone()),
            InputSource::Example(code) => example_text(code)
                .map(str::to_string)
                .ok_or_else(|| CliError::NoExample(code.clone()).into()),
            InputSource::File(path) => read_file(path),
        }
    }
}

/// Read a UTF-8 text file, dropping a leading byte order mark
///
/// A BOM would otherwise become part of the first token and shift every
/// character offset by one.
fn read_file(path: &Path) -> Result<String> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CliError::FileNotFound(path.display().to_string()).into())
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read file: {}", path.display()))
        }
    };

    Ok(match content.strip_prefix('\u{FEFF}') {
        Some(rest) => rest.to_string(),
        None => content,
    })
}
