//! The contract every annotation step implements
//!
//! A process takes the current [`Document`] by value together with the
//! language code it is being analyzed as, and hands back the extended
//! document or an error. Processes are stateless between calls and must be
//! `Send + Sync` so one pipeline can serve concurrent analyses.
//!
//! Each process also describes itself: which languages it handles, which
//! fields it expects earlier steps to have produced and which fields it
//! adds. The descriptions are advisory; they feed optional eager validation
//! and are otherwise only checked by the process itself at run time.

use crate::document::{Document, Field};
use crate::error::{ProcessError, ProcessResult};
use std::fmt;
use std::sync::Arc;

/// Languages a process can annotate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSupport {
    /// Any language
    Any,
    /// Only the listed ISO 639-3 codes
    Only(Vec<String>),
}

impl LanguageSupport {
    /// Support for a fixed list of codes
    pub fn only<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LanguageSupport::Only(codes.into_iter().map(Into::into).collect())
    }

    /// Whether `code` is covered
    pub fn supports(&self, code: &str) -> bool {
        match self {
            LanguageSupport::Any => true,
            LanguageSupport::Only(codes) => codes.iter().any(|c| c == code),
        }
    }
}

/// One annotation step of a pipeline
pub trait Process: Send + Sync {
    /// Stable identifier, e.g. `latin_tokenization`
    fn name(&self) -> &str;

    /// Languages this step handles
    fn languages(&self) -> LanguageSupport {
        LanguageSupport::Any
    }

    /// Fields that must exist before this step runs
    fn requires(&self) -> &[Field] {
        &[]
    }

    /// Fields this step adds
    fn provides(&self) -> &[Field];

    /// Run the step on `input`, producing the extended document
    fn run(&self, input: Document, language: &str) -> ProcessResult<Document>;

    /// Fail with [`ProcessError::UnsupportedLanguage`] unless `language` is handled
    fn check_language(&self, language: &str) -> ProcessResult<()> {
        if self.languages().supports(language) {
            Ok(())
        } else {
            Err(ProcessError::UnsupportedLanguage {
                process: self.name().to_string(),
                language: language.to_string(),
            })
        }
    }
}

impl fmt::Debug for dyn Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Process")
            .field("name", &self.name())
            .field("requires", &self.requires())
            .field("provides", &self.provides())
            .finish()
    }
}

type StepFn = dyn Fn(Document, &str) -> ProcessResult<Document> + Send + Sync;

/// Adapter turning a closure into a [`Process`]
///
/// ```ignore
/// let uppercase_lemmas = FnProcess::new("uppercase_lemmas", |mut doc, _lang| {
///     for i in 0..doc.words().len() {
///         let upper = doc.words()[i].string.to_uppercase();
///         doc.annotate(i, Annotation::Lemma(upper))?;
///     }
///     Ok(doc)
/// })
/// .with_requires(&[Field::Tokens])
/// .with_provides(&[Field::Lemma]);
/// ```
#[derive(Clone)]
pub struct FnProcess {
    name: String,
    languages: LanguageSupport,
    requires: Vec<Field>,
    provides: Vec<Field>,
    step: Arc<StepFn>,
}

impl FnProcess {
    /// Wrap `step` under the given name
    pub fn new<F>(name: impl Into<String>, step: F) -> Self
    where
        F: Fn(Document, &str) -> ProcessResult<Document> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            languages: LanguageSupport::Any,
            requires: Vec::new(),
            provides: Vec::new(),
            step: Arc::new(step),
        }
    }

    /// Declare the fields the closure expects
    pub fn with_requires(mut self, fields: &[Field]) -> Self {
        self.requires = fields.to_vec();
        self
    }

    /// Declare the fields the closure adds
    pub fn with_provides(mut self, fields: &[Field]) -> Self {
        self.provides = fields.to_vec();
        self
    }

    /// Restrict the closure to some languages
    pub fn with_languages(mut self, languages: LanguageSupport) -> Self {
        self.languages = languages;
        self
    }
}

impl fmt::Debug for FnProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnProcess")
            .field("name", &self.name)
            .field("languages", &self.languages)
            .field("requires", &self.requires)
            .field("provides", &self.provides)
            .finish()
    }
}

impl Process for FnProcess {
    fn name(&self) -> &str {
        &self.name
    }

    fn languages(&self) -> LanguageSupport {
        self.languages.clone()
    }

    fn requires(&self) -> &[Field] {
        &self.requires
    }

    fn provides(&self) -> &[Field] {
        &self.provides
    }

    fn run(&self, input: Document, language: &str) -> ProcessResult<Document> {
        (self.step)(input, language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Annotation, Word};

    #[test]
    fn test_language_support() {
        assert!(LanguageSupport::Any.supports("lat"));
        let only = LanguageSupport::only(["lat", "grc"]);
        assert!(only.supports("grc"));
        assert!(!only.supports("got"));
    }

    #[test]
    fn test_fn_process_runs_closure() {
        let step = FnProcess::new("one_word", |mut doc: Document, _lang: &str| {
            let raw = doc.raw().to_string();
            doc.set_words(vec![Word::new(raw, 0, 1)])?;
            Ok(doc)
        })
        .with_provides(&[Field::Tokens]);

        assert_eq!(step.name(), "one_word");
        assert_eq!(step.provides(), &[Field::Tokens]);
        assert!(step.requires().is_empty());

        let doc = step.run(Document::new("lat", "salve"), "lat").unwrap();
        assert_eq!(doc.words()[0].string, "salve");
    }

    #[test]
    fn test_check_language() {
        let step = FnProcess::new("greek_only", |doc: Document, _lang: &str| Ok(doc))
            .with_languages(LanguageSupport::only(["grc"]));

        assert!(step.check_language("grc").is_ok());
        match step.check_language("lat") {
            Err(ProcessError::UnsupportedLanguage { process, language }) => {
                assert_eq!(process, "greek_only");
                assert_eq!(language, "lat");
            }
            other => panic!("Expected UnsupportedLanguage, got {other:?}"),
        }
    }

    #[test]
    fn test_errors_pass_through() {
        let step = FnProcess::new("annotate_missing", |mut doc: Document, _lang: &str| {
            doc.annotate(0, Annotation::Lemma("x".into()))?;
            Ok(doc)
        });
        let err = step.run(Document::new("lat", ""), "lat").unwrap_err();
        assert!(matches!(err, ProcessError::WordOutOfRange { .. }));
    }

    #[test]
    fn test_trait_object_debug() {
        let step: Arc<dyn Process> =
            Arc::new(FnProcess::new("noop", |doc: Document, _: &str| Ok(doc)));
        let debug = format!("{:?}", step);
        assert!(debug.contains("noop"));
    }
}
