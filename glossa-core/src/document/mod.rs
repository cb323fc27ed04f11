//! The document threaded through a pipeline
//!
//! A [`Document`] starts as raw text stamped with a language code. A
//! tokenizer gives it words; later steps add annotations to those words.
//! Annotations are never silently overwritten: [`Document::annotate`] only
//! fills empty fields, and replacing a value requires [`Document::refine`].

mod annotation;
mod word;

pub use annotation::{Annotation, Features, Field, PosTag};
pub use word::Word;

use crate::error::{ProcessError, ProcessResult};
use serde::{Deserialize, Serialize};

/// Accumulated analysis of one text
///
/// Deserializing checks the same word indices as [`Document::set_words`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DocumentRepr")]
pub struct Document {
    language: String,
    raw: String,
    tokenized: bool,
    words: Vec<Word>,
}

/// Unchecked wire form of a [`Document`]
#[derive(Deserialize)]
struct DocumentRepr {
    language: String,
    raw: String,
    tokenized: bool,
    words: Vec<Word>,
}

impl TryFrom<DocumentRepr> for Document {
    type Error = ProcessError;

    fn try_from(repr: DocumentRepr) -> ProcessResult<Self> {
        if !repr.tokenized && !repr.words.is_empty() {
            return Err(ProcessError::InvalidTokenization {
                reason: format!("{} words on an untokenized document", repr.words.len()),
            });
        }
        check_indices(&repr.words)?;
        Ok(Self {
            language: repr.language,
            raw: repr.raw,
            tokenized: repr.tokenized,
            words: repr.words,
        })
    }
}

/// Borrowed view of the words of one sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    index: usize,
    words: &'a [Word],
}

impl Document {
    /// An untokenized document
    pub fn new(language: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            raw: raw.into(),
            tokenized: false,
            words: Vec::new(),
        }
    }

    /// ISO 639-3 code the document was analyzed as
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The input text
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// All words in document order
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Word at a 0-based document position
    pub fn word(&self, position: usize) -> Option<&Word> {
        self.words.get(position)
    }

    /// Whether a tokenizer has run, even if it found no words
    pub fn is_tokenized(&self) -> bool {
        self.tokenized
    }

    /// Whether the field is available for later steps
    ///
    /// Tokens are available once a tokenizer has run; any other field is
    /// available when at least one word carries it.
    pub fn has_field(&self, field: Field) -> bool {
        match field {
            Field::Tokens => self.tokenized,
            other => self.words.iter().any(|w| w.has(other)),
        }
    }

    /// Fail with [`ProcessError::MissingField`] unless `field` is available
    pub fn require(&self, process: &str, field: Field) -> ProcessResult<()> {
        if self.has_field(field) {
            Ok(())
        } else {
            Err(ProcessError::MissingField {
                process: process.to_string(),
                field,
            })
        }
    }

    /// Install the word sequence produced by a tokenizer
    ///
    /// Sentence indices must start at 0 and increase by at most one from
    /// word to word; token indices must restart at 1 with every sentence
    /// and increase by exactly one.
    pub fn set_words(&mut self, words: Vec<Word>) -> ProcessResult<()> {
        if self.tokenized {
            return Err(ProcessError::AlreadyTokenized {
                words: self.words.len(),
            });
        }
        check_indices(&words)?;
        self.words = words;
        self.tokenized = true;
        Ok(())
    }

    /// Fill an empty annotation on the word at `position`
    ///
    /// Writing the value a field already holds is a no-op; writing a
    /// different one fails with [`ProcessError::AnnotationConflict`].
    pub fn annotate(&mut self, position: usize, annotation: Annotation) -> ProcessResult<()> {
        let word = self.word_mut(position)?;
        word.fill(annotation)
            .map_err(|field| ProcessError::AnnotationConflict { position, field })
    }

    /// Explicitly replace an annotation, returning the previous value
    pub fn refine(
        &mut self,
        position: usize,
        annotation: Annotation,
    ) -> ProcessResult<Option<Annotation>> {
        let word = self.word_mut(position)?;
        Ok(word.replace(annotation))
    }

    /// Words grouped into sentences, in order
    pub fn sentences(&self) -> Vec<Sentence<'_>> {
        self.words
            .chunk_by(|a, b| a.index_sentence == b.index_sentence)
            .map(|words| Sentence {
                index: words[0].index_sentence,
                words,
            })
            .collect()
    }

    /// Number of sentences
    pub fn sentence_count(&self) -> usize {
        self.words
            .last()
            .map(|w| w.index_sentence + 1)
            .unwrap_or(0)
    }

    fn word_mut(&mut self, position: usize) -> ProcessResult<&mut Word> {
        let len = self.words.len();
        self.words
            .get_mut(position)
            .ok_or(ProcessError::WordOutOfRange { position, len })
    }
}

fn check_indices(words: &[Word]) -> ProcessResult<()> {
    let mut expected_sentence = 0;
    let mut expected_token = 1;

    for (position, word) in words.iter().enumerate() {
        if word.index_sentence == expected_sentence + 1 && position > 0 {
            expected_sentence += 1;
            expected_token = 1;
        }
        if word.index_sentence != expected_sentence {
            return Err(ProcessError::InvalidTokenization {
                reason: format!(
                    "word {position} has sentence index {}, expected {expected_sentence}",
                    word.index_sentence
                ),
            });
        }
        if word.index_token != expected_token {
            return Err(ProcessError::InvalidTokenization {
                reason: format!(
                    "word {position} has token index {}, expected {expected_token}",
                    word.index_token
                ),
            });
        }
        expected_token += 1;
    }

    Ok(())
}

impl<'a> Sentence<'a> {
    /// 0-based sentence number
    pub fn index(&self) -> usize {
        self.index
    }

    /// The sentence's words
    pub fn words(&self) -> &'a [Word] {
        self.words
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false; sentences are only built from at least one word
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word by its 1-based `index_token`
    pub fn token(&self, index_token: usize) -> Option<&'a Word> {
        index_token
            .checked_sub(1)
            .and_then(|i| self.words.get(i))
    }

    /// Character span covered by the sentence, if offsets are known
    pub fn char_span(&self) -> Option<(usize, usize)> {
        let start = self.words.first()?.index_char_start?;
        let stop = self.words.last()?.index_char_stop?;
        Some((start, stop))
    }

    /// Surface forms joined by single spaces
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.string.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
