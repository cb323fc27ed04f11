//! CoNLL-U output formatter

use super::OutputFormatter;
use anyhow::Result;
use glossa_engine::{write_conllu, Document};
use std::io::Write;

/// CoNLL-U formatter - one block per sentence, `# newdoc` between inputs
pub struct ConlluFormatter<W: Write> {
    writer: W,
    headers: bool,
}

impl<W: Write> ConlluFormatter<W> {
    /// Create a new CoNLL-U formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            headers: false,
        }
    }

    pub fn with_headers(mut self, headers: bool) -> Self {
        self.headers = headers;
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for ConlluFormatter<W> {
    fn format_document(&mut self, source: &str, document: &Document) -> Result<()> {
        if self.headers {
            writeln!(self.writer, "# newdoc id = {source}")?;
        }
        self.writer.write_all(write_conllu(document).as_bytes())?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
