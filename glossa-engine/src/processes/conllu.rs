//! CoNLL-U import and export
//!
//! [`ConlluProcess`] merges annotations produced by an external tagger or
//! parser into a tokenized document. [`write_conllu`] renders a document in
//! the same format.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use glossa_core::{
    Annotation, Document, Features, Field, PosTag, Process, ProcessError, ProcessResult,
};

const NAME: &str = "conllu";

/// One token row of a CoNLL-U file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConlluRow {
    pub id: usize,
    pub form: String,
    pub lemma: Option<String>,
    pub upos: Option<PosTag>,
    pub xpos: Option<String>,
    pub feats: Option<Features>,
    pub head: Option<usize>,
    pub deprel: Option<String>,
}

impl ConlluRow {
    fn annotations(&self) -> Vec<Annotation> {
        let mut out = Vec::new();
        if let Some(lemma) = &self.lemma {
            out.push(Annotation::Lemma(lemma.clone()));
        }
        if let Some(upos) = self.upos {
            out.push(Annotation::Upos(upos));
        }
        if let Some(xpos) = &self.xpos {
            out.push(Annotation::Xpos(xpos.clone()));
        }
        if let Some(feats) = &self.feats {
            out.push(Annotation::Features(feats.clone()));
        }
        if let (Some(governor), Some(relation)) = (self.head, &self.deprel) {
            out.push(Annotation::Dependency {
                governor,
                relation: relation.clone(),
            });
        }
        out
    }
}

fn optional(field: &str) -> Option<&str> {
    match field {
        "_" | "" => None,
        value => Some(value),
    }
}

/// Parse CoNLL-U text into sentences of token rows
///
/// Comment lines, multiword ranges (`1-2`) and empty nodes (`1.1`) are
/// skipped. A HEAD must point at a token of its own sentence or at `0`.
/// Errors name the offending line.
pub fn parse_conllu(text: &str) -> Result<Vec<Vec<ConlluRow>>, String> {
    let mut sentences = Vec::new();
    let mut current: Vec<ConlluRow> = Vec::new();
    let mut row_lines: Vec<usize> = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim_end_matches('\r');

        if line.trim().is_empty() {
            if !current.is_empty() {
                check_heads(&current, &row_lines)?;
                sentences.push(std::mem::take(&mut current));
                row_lines.clear();
            }
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() != 10 {
            return Err(format!(
                "line {line_no}: expected 10 tab-separated columns, found {}",
                columns.len()
            ));
        }
        if columns[0].contains('-') || columns[0].contains('.') {
            continue;
        }

        let id: usize = columns[0]
            .parse()
            .map_err(|_| format!("line {line_no}: invalid token id '{}'", columns[0]))?;
        if id != current.len() + 1 {
            return Err(format!(
                "line {line_no}: token id {id} out of sequence, expected {}",
                current.len() + 1
            ));
        }

        let upos = optional(columns[3])
            .map(|tag| tag.parse::<PosTag>())
            .transpose()
            .map_err(|e| format!("line {line_no}: {e}"))?;
        let feats = optional(columns[5])
            .map(|feats| feats.parse::<Features>())
            .transpose()
            .map_err(|e| format!("line {line_no}: {e}"))?;
        let head = optional(columns[6])
            .map(|head| {
                head.parse::<usize>()
                    .map_err(|_| format!("line {line_no}: invalid head '{head}'"))
            })
            .transpose()?;

        current.push(ConlluRow {
            id,
            form: columns[1].to_string(),
            lemma: optional(columns[2]).map(str::to_string),
            upos,
            xpos: optional(columns[4]).map(str::to_string),
            feats,
            head,
            deprel: optional(columns[7]).map(str::to_string),
        });
        row_lines.push(line_no);
    }

    if !current.is_empty() {
        check_heads(&current, &row_lines)?;
        sentences.push(current);
    }
    Ok(sentences)
}

fn check_heads(rows: &[ConlluRow], row_lines: &[usize]) -> Result<(), String> {
    for (row, line_no) in rows.iter().zip(row_lines) {
        if let Some(head) = row.head {
            if head > rows.len() {
                return Err(format!(
                    "line {line_no}: head {head} outside a sentence of {} tokens",
                    rows.len()
                ));
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
enum Source {
    File(PathBuf),
    Inline(Arc<str>),
}

/// Merges an externally produced CoNLL-U analysis into the document
///
/// The file must contain the same sentences and tokens, in the same order,
/// as the tokenizer produced; any difference is reported as
/// [`ProcessError::MalformedInput`]. The file is read on every run, so a
/// pipeline can be reused while the file is regenerated.
#[derive(Debug, Clone)]
pub struct ConlluProcess {
    source: Source,
}

impl ConlluProcess {
    /// Read annotations from a file at run time
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::File(path.into()),
        }
    }

    /// Use annotations already in memory
    pub fn from_text(text: impl Into<Arc<str>>) -> Self {
        Self {
            source: Source::Inline(text.into()),
        }
    }

    /// Path of the file, if the annotations come from one
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::File(path) => Some(path),
            Source::Inline(_) => None,
        }
    }

    fn load(&self) -> ProcessResult<Vec<Vec<ConlluRow>>> {
        let text: Arc<str> = match &self.source {
            Source::Inline(text) => Arc::clone(text),
            Source::File(path) => match std::fs::read_to_string(path) {
                Ok(text) => text.into(),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(ProcessError::ResourceNotFound {
                        process: NAME.to_string(),
                        resource: path.display().to_string(),
                    })
                }
                Err(e) => return Err(ProcessError::Io(e)),
            },
        };
        parse_conllu(&text).map_err(malformed)
    }
}

fn malformed(reason: impl Into<String>) -> ProcessError {
    ProcessError::MalformedInput {
        process: NAME.to_string(),
        reason: reason.into(),
    }
}

impl Process for ConlluProcess {
    fn name(&self) -> &str {
        NAME
    }

    fn requires(&self) -> &[Field] {
        &[Field::Tokens]
    }

    fn provides(&self) -> &[Field] {
        &[
            Field::Lemma,
            Field::Upos,
            Field::Xpos,
            Field::Features,
            Field::Dependencies,
        ]
    }

    fn run(&self, mut input: Document, _language: &str) -> ProcessResult<Document> {
        input.require(NAME, Field::Tokens)?;
        let parsed = self.load()?;

        let sentence_lengths: Vec<usize> = input.sentences().iter().map(|s| s.len()).collect();
        if parsed.len() != sentence_lengths.len() {
            return Err(malformed(format!(
                "annotation has {} sentences, document has {}",
                parsed.len(),
                sentence_lengths.len()
            )));
        }

        let mut position = 0;
        for (index, (rows, &len)) in parsed.iter().zip(&sentence_lengths).enumerate() {
            if rows.len() != len {
                return Err(malformed(format!(
                    "sentence {index} has {} annotated tokens, document has {len}",
                    rows.len()
                )));
            }
            for row in rows {
                let form = &input.words()[position].string;
                if *form != row.form {
                    return Err(malformed(format!(
                        "sentence {index} token {}: annotation has '{}', document has '{form}'",
                        row.id, row.form
                    )));
                }
                for annotation in row.annotations() {
                    input.annotate(position, annotation)?;
                }
                position += 1;
            }
        }

        Ok(input)
    }
}

/// Render a document as CoNLL-U
///
/// Unset fields are written as `_`. Each sentence carries `sent_id` and
/// `text` comments; the text is cut from the raw input when character
/// offsets are known.
pub fn write_conllu(document: &Document) -> String {
    let mut out = String::new();
    let chars: Vec<char> = document.raw().chars().collect();

    for sentence in document.sentences() {
        let text = match sentence.char_span() {
            Some((start, stop)) if stop <= chars.len() && start <= stop => {
                chars[start..stop].iter().collect()
            }
            _ => sentence.text(),
        };
        out.push_str(&format!("# sent_id = {}\n", sentence.index() + 1));
        out.push_str(&format!("# text = {}\n", text.replace('\n', " ")));

        for word in sentence.words() {
            let upos = word.upos.map(|t| t.as_str().to_string());
            let feats = word.features.as_ref().map(|f| f.to_string());
            let head = word.governor.map(|g| g.to_string());
            let columns = [
                word.index_token.to_string(),
                word.string.clone(),
                word.lemma.clone().unwrap_or_else(|| "_".into()),
                upos.unwrap_or_else(|| "_".into()),
                word.xpos.clone().unwrap_or_else(|| "_".into()),
                feats.unwrap_or_else(|| "_".into()),
                head.unwrap_or_else(|| "_".into()),
                word.dependency_relation
                    .clone()
                    .unwrap_or_else(|| "_".into()),
                "_".to_string(),
                "_".to_string(),
            ];
            out.push_str(&columns.join("\t"));
            out.push('\n');
        }
        out.push('\n');
    }

    out
}
