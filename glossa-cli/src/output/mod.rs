//! Output formatting module

use std::io::Write;

use anyhow::Result;
use glossa_engine::Document;
use serde::{Deserialize, Serialize};

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output one analyzed document
    fn format_document(&mut self, source: &str, document: &Document) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod conllu;
pub mod json;
pub mod text;

pub use conllu::ConlluFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One sentence per line followed by its annotated tokens
    Text,
    /// JSON array of documents with every word annotation
    Json,
    /// CoNLL-U with one block per sentence
    Conllu,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Text, OutputFormat::Json, OutputFormat::Conllu];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Conllu => "conllu",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            OutputFormat::Text => "sentences with token, lemma and UPOS columns",
            OutputFormat::Json => "JSON array of documents and their words",
            OutputFormat::Conllu => "CoNLL-U, one block per sentence",
        }
    }
}

/// Build the formatter for `format`
///
/// `headers` marks where each document starts, for output covering more
/// than one input.
pub fn create_formatter<W>(
    format: OutputFormat,
    writer: W,
    pretty_json: bool,
    headers: bool,
) -> Box<dyn OutputFormatter>
where
    W: Write + Send + Sync + 'static,
{
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer).with_headers(headers)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer).pretty(pretty_json)),
        OutputFormat::Conllu => Box::new(ConlluFormatter::new(writer).with_headers(headers)),
    }
}

/// Text of a sentence cut from the raw input, or its joined tokens
pub(crate) fn sentence_text(document: &Document, words: &[glossa_engine::Word]) -> String {
    let span = words
        .first()
        .and_then(|w| w.index_char_start)
        .zip(words.last().and_then(|w| w.index_char_stop));
    if let Some((start, stop)) = span {
        if start <= stop {
            let text: String = document.raw().chars().skip(start).take(stop - start).collect();
            if text.chars().count() == stop - start {
                return text.split_whitespace().collect::<Vec<_>>().join(" ");
            }
        }
    }
    words
        .iter()
        .map(|w| w.string.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
