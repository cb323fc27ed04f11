//! A single annotated word

use super::annotation::{Annotation, Features, Field, PosTag};
use serde::{Deserialize, Serialize};

/// A lexical unit with its positional and linguistic annotations
///
/// Every linguistic field is optional; which ones are set depends on the
/// processes that have run. `index_token` is 1-based within the sentence,
/// `index_sentence` is 0-based within the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Character offset of the first character in the raw text
    pub index_char_start: Option<usize>,
    /// Character offset one past the last character
    pub index_char_stop: Option<usize>,
    /// 1-based position within the sentence
    pub index_token: usize,
    /// 0-based sentence number
    pub index_sentence: usize,
    /// Surface form
    pub string: String,
    /// Dictionary form
    pub lemma: Option<String>,
    /// Universal part-of-speech tag
    pub upos: Option<PosTag>,
    /// Language-specific part-of-speech tag
    pub xpos: Option<String>,
    /// Morphological features
    pub features: Option<Features>,
    /// `index_token` of the syntactic head, 0 for the sentence root
    pub governor: Option<usize>,
    /// Dependency relation to the governor
    pub dependency_relation: Option<String>,
    /// Metrical scansion
    pub scansion: Option<String>,
}

impl Word {
    /// A bare word with positional indices and nothing else
    pub fn new(string: impl Into<String>, index_sentence: usize, index_token: usize) -> Self {
        Self {
            index_char_start: None,
            index_char_stop: None,
            index_token,
            index_sentence,
            string: string.into(),
            lemma: None,
            upos: None,
            xpos: None,
            features: None,
            governor: None,
            dependency_relation: None,
            scansion: None,
        }
    }

    /// Attach a character span
    pub fn with_span(mut self, start: usize, stop: usize) -> Self {
        self.index_char_start = Some(start);
        self.index_char_stop = Some(stop);
        self
    }

    /// Whether the given field carries a value
    pub fn has(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// Current value of a field as an [`Annotation`]
    ///
    /// `Field::Tokens` is not a per-word annotation and always yields `None`.
    pub fn get(&self, field: Field) -> Option<Annotation> {
        match field {
            Field::Tokens => None,
            Field::CharOffsets => match (self.index_char_start, self.index_char_stop) {
                (Some(start), Some(stop)) => Some(Annotation::CharSpan { start, stop }),
                _ => None,
            },
            Field::Lemma => self.lemma.clone().map(Annotation::Lemma),
            Field::Upos => self.upos.map(Annotation::Upos),
            Field::Xpos => self.xpos.clone().map(Annotation::Xpos),
            Field::Features => self.features.clone().map(Annotation::Features),
            Field::Dependencies => match (self.governor, &self.dependency_relation) {
                (Some(governor), Some(relation)) => Some(Annotation::Dependency {
                    governor,
                    relation: relation.clone(),
                }),
                _ => None,
            },
            Field::Scansion => self.scansion.clone().map(Annotation::Scansion),
        }
    }

    /// Fill an empty field; refilling with an identical value is accepted.
    ///
    /// Returns the field back as the error when a different value is present.
    pub(crate) fn fill(&mut self, annotation: Annotation) -> Result<(), Field> {
        let field = annotation.field();
        match self.get(field) {
            None => {
                self.set(annotation);
                Ok(())
            }
            Some(existing) if existing == annotation => Ok(()),
            Some(_) => Err(field),
        }
    }

    /// Overwrite a field, returning the previous value
    pub(crate) fn replace(&mut self, annotation: Annotation) -> Option<Annotation> {
        let previous = self.get(annotation.field());
        self.set(annotation);
        previous
    }

    fn set(&mut self, annotation: Annotation) {
        match annotation {
            Annotation::CharSpan { start, stop } => {
                self.index_char_start = Some(start);
                self.index_char_stop = Some(stop);
            }
            Annotation::Lemma(lemma) => self.lemma = Some(lemma),
            Annotation::Upos(tag) => self.upos = Some(tag),
            Annotation::Xpos(tag) => self.xpos = Some(tag),
            Annotation::Features(features) => self.features = Some(features),
            Annotation::Dependency { governor, relation } => {
                self.governor = Some(governor);
                self.dependency_relation = Some(relation);
            }
            Annotation::Scansion(scansion) => self.scansion = Some(scansion),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_word_is_bare() {
        let word = Word::new("Gallia", 0, 1);
        assert_eq!(word.string, "Gallia");
        assert_eq!(word.index_token, 1);
        assert_eq!(word.index_sentence, 0);
        for field in Field::ALL {
            assert!(!word.has(field), "{field} should be unset");
        }
    }

    #[test]
    fn test_with_span() {
        let word = Word::new("est", 0, 2).with_span(7, 10);
        assert_eq!(
            word.get(Field::CharOffsets),
            Some(Annotation::CharSpan { start: 7, stop: 10 })
        );
    }

    #[test]
    fn test_fill_empty_and_identical() {
        let mut word = Word::new("Gallia", 0, 1);
        assert!(word.fill(Annotation::Lemma("Gallia".into())).is_ok());
        assert!(word.fill(Annotation::Lemma("Gallia".into())).is_ok());
        assert_eq!(word.lemma.as_deref(), Some("Gallia"));
    }

    #[test]
    fn test_fill_conflict_leaves_value() {
        let mut word = Word::new("est", 0, 2);
        word.fill(Annotation::Upos(PosTag::Aux)).unwrap();
        assert_eq!(word.fill(Annotation::Upos(PosTag::Verb)), Err(Field::Upos));
        assert_eq!(word.upos, Some(PosTag::Aux));
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut word = Word::new("est", 0, 2);
        assert_eq!(word.replace(Annotation::Lemma("esse".into())), None);
        assert_eq!(
            word.replace(Annotation::Lemma("sum".into())),
            Some(Annotation::Lemma("esse".into()))
        );
        assert_eq!(word.lemma.as_deref(), Some("sum"));
    }

    #[test]
    fn test_dependency_sets_both_fields() {
        let mut word = Word::new("Gallia", 0, 1);
        word.fill(Annotation::Dependency {
            governor: 4,
            relation: "nsubj".into(),
        })
        .unwrap();
        assert_eq!(word.governor, Some(4));
        assert_eq!(word.dependency_relation.as_deref(), Some("nsubj"));
        assert!(word.has(Field::Dependencies));
    }
}
