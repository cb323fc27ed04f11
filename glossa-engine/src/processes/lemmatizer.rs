//! Dictionary lemmatization with an identity fallback

use std::sync::Arc;

use glossa_core::{Annotation, Document, Field, LanguageSupport, Process, ProcessResult};

use super::rules::{self, Rules};
use super::tagger::heuristic_tag;

/// Assigns a lemma to every word that lacks one
///
/// The lexicon is tried first; unknown words are lemmatized to their
/// lower-cased surface form, punctuation and numerals to themselves. Lemmas
/// set by an earlier step are kept.
#[derive(Debug, Clone)]
pub struct LemmatizationProcess {
    name: String,
    rules: Arc<Rules>,
}

impl LemmatizationProcess {
    pub fn for_language(code: &str) -> Option<Self> {
        rules::rules_for(code).map(Self::with_rules)
    }

    /// Identity lemmatization for any language
    pub fn generic() -> Self {
        Self::with_rules(rules::generic_rules())
    }

    pub fn with_rules(rules: Arc<Rules>) -> Self {
        Self {
            name: rules.step_name("lemmatization"),
            rules,
        }
    }

    pub fn lemma_for(&self, form: &str) -> String {
        if let Some(entry) = self.rules.lookup(form) {
            return entry.lemma.clone();
        }
        if heuristic_tag(form).is_some() {
            return form.to_string();
        }
        form.to_lowercase()
    }
}

impl Process for LemmatizationProcess {
    fn name(&self) -> &str {
        &self.name
    }

    fn languages(&self) -> LanguageSupport {
        self.rules.support()
    }

    fn requires(&self) -> &[Field] {
        &[Field::Tokens]
    }

    fn provides(&self) -> &[Field] {
        &[Field::Lemma]
    }

    fn run(&self, mut input: Document, language: &str) -> ProcessResult<Document> {
        self.check_language(language)?;
        input.require(&self.name, Field::Tokens)?;

        for position in 0..input.words().len() {
            let word = &input.words()[position];
            if word.lemma.is_some() {
                continue;
            }
            let lemma = self.lemma_for(&word.string);
            input.annotate(position, Annotation::Lemma(lemma))?;
        }
        Ok(input)
    }
}
