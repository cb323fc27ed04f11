//! Plain text output formatter

use super::{sentence_text, OutputFormatter};
use anyhow::Result;
use glossa_engine::Document;
use std::io::Write;

/// Plain text formatter - one sentence per line, then one line per token
pub struct TextFormatter<W: Write> {
    writer: W,
    headers: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            headers: false,
        }
    }

    /// Print a `==> source <==` line before each document
    pub fn with_headers(mut self, headers: bool) -> Self {
        self.headers = headers;
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_document(&mut self, source: &str, document: &Document) -> Result<()> {
        if self.headers {
            writeln!(self.writer, "==> {source} <==")?;
        }
        for sentence in document.sentences() {
            writeln!(self.writer, "{}", sentence_text(document, sentence.words()))?;
            for word in sentence.words() {
                let upos = word.upos.map(|t| t.as_str()).unwrap_or("_");
                writeln!(
                    self.writer,
                    "  {:>3}  {:<20} {:<20} {}",
                    word.index_token,
                    word.string,
                    word.lemma.as_deref().unwrap_or("_"),
                    upos
                )?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
