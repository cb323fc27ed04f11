//! The analysis entry point
//!
//! An [`Nlp`] binds a language to a pipeline. Construction resolves the
//! language and, unless a pipeline is supplied, the language's default
//! pipeline; both lookups fail early with a [`LanguageError`] inside
//! [`NlpError::Language`]. After that, [`Nlp::analyze`] runs every step in
//! order on a fresh [`Document`] and returns the result or the first step
//! error unchanged.

use std::sync::Arc;
use std::time::Instant;

use glossa_core::{Document, Language, LanguageRegistry, ProcessError};

use crate::cancel::CancellationToken;
use crate::error::{AnalyzeError, NlpError, Result};
use crate::observer::{NoopObserver, PipelineObserver};
use crate::pipeline::Pipeline;
use crate::registry::default_pipeline_for;
use crate::validation::{ValidationEngine, ValidationReport};

/// How a caller-supplied pipeline is checked at construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Accept any pipeline; problems surface when a step runs
    #[default]
    Permissive,
    /// Reject pipelines whose validation report contains errors
    Strict,
}

/// A language bound to the pipeline that analyzes it
#[derive(Clone)]
pub struct Nlp {
    language: Arc<Language>,
    pipeline: Arc<Pipeline>,
}

impl Nlp {
    /// Analysis context with the language's default pipeline
    ///
    /// ```rust
    /// use glossa_engine::Nlp;
    ///
    /// let nlp = Nlp::new("got").unwrap();
    /// let doc = nlp.analyze("swa liuhtjai liuhaþ izwar.").unwrap();
    /// assert_eq!(doc.words()[0].lemma.as_deref(), Some("swa"));
    ///
    /// assert!(Nlp::new("xxx").is_err());
    /// ```
    pub fn new(language: &str) -> Result<Self> {
        Self::builder(language).build()
    }

    /// Analysis context with a caller-supplied pipeline
    ///
    /// The default lookup is skipped entirely, so this also works for
    /// languages that have no default. No compatibility check is made.
    pub fn with_pipeline(language: &str, pipeline: Arc<Pipeline>) -> Result<Self> {
        Self::builder(language).pipeline(pipeline).build()
    }

    /// Start configuring an [`Nlp`] for `language`
    pub fn builder(language: impl Into<String>) -> NlpBuilder {
        NlpBuilder::new(language)
    }

    /// The resolved language
    pub fn language(&self) -> &Arc<Language> {
        &self.language
    }

    /// The pipeline every analysis runs
    pub fn pipeline(&self) -> &Arc<Pipeline> {
        &self.pipeline
    }

    /// Run the pipeline over `text`
    pub fn analyze(&self, text: &str) -> std::result::Result<Document, ProcessError> {
        self.analyze_observed(text, &mut NoopObserver)
    }

    /// Run the pipeline, reporting each step to `observer`
    pub fn analyze_observed(
        &self,
        text: &str,
        observer: &mut dyn PipelineObserver,
    ) -> std::result::Result<Document, ProcessError> {
        self.drive(text, observer, |_| Ok(()))
    }

    /// Run the pipeline, checking `token` before every step
    ///
    /// A step that has started always runs to completion.
    pub fn analyze_with_cancellation(
        &self,
        text: &str,
        token: &CancellationToken,
    ) -> std::result::Result<Document, AnalyzeError> {
        self.drive(text, &mut NoopObserver, |completed_steps| {
            if token.is_cancelled() {
                log::debug!("analysis cancelled after {completed_steps} step(s)");
                Err(AnalyzeError::Cancelled { completed_steps })
            } else {
                Ok(())
            }
        })
    }

    fn drive<E, G>(
        &self,
        text: &str,
        observer: &mut dyn PipelineObserver,
        mut gate: G,
    ) -> std::result::Result<Document, E>
    where
        E: From<ProcessError>,
        G: FnMut(usize) -> std::result::Result<(), E>,
    {
        let code = self.language.code();
        let mut document = Document::new(code, text);
        log::trace!(
            "analyzing {} characters as {} with '{}'",
            text.chars().count(),
            code,
            self.pipeline.description()
        );

        for (index, process) in self.pipeline.processes().iter().enumerate() {
            gate(index)?;
            let name = process.name();
            observer.on_step_start(index, name, &document);

            let started = Instant::now();
            document = match process.run(document, code) {
                Ok(next) => next,
                Err(err) => {
                    log::debug!("step {index} '{name}' failed: {err}");
                    observer.on_step_failed(index, name, &err);
                    return Err(err.into());
                }
            };
            let elapsed = started.elapsed();

            log::debug!(
                "step {index} '{name}' finished in {elapsed:?} ({} words)",
                document.words().len()
            );
            observer.on_step_end(index, name, &document, elapsed);
        }

        Ok(document)
    }
}

impl std::fmt::Debug for Nlp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Nlp")
            .field("language", &self.language.code())
            .field("pipeline", &self.pipeline)
            .finish()
    }
}

/// Configures an [`Nlp`]
pub struct NlpBuilder {
    language: String,
    pipeline: Option<Arc<Pipeline>>,
    validation: ValidationMode,
    registry: Option<LanguageRegistry>,
}

impl NlpBuilder {
    /// Builder for `language` with its default pipeline, permissive
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            pipeline: None,
            validation: ValidationMode::default(),
            registry: None,
        }
    }

    /// Use this pipeline instead of the language default
    pub fn pipeline(mut self, pipeline: Arc<Pipeline>) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// How a supplied pipeline is checked in [`build`](Self::build)
    pub fn validation(mut self, mode: ValidationMode) -> Self {
        self.validation = mode;
        self
    }

    /// Shorthand for [`ValidationMode::Strict`]
    pub fn strict(self) -> Self {
        self.validation(ValidationMode::Strict)
    }

    /// Resolve the language against another table than the embedded one
    pub fn registry(mut self, registry: LanguageRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Resolve the language and settle the pipeline
    ///
    /// Fails when the code is unknown, when no pipeline was given and the
    /// language has no default, or when strict validation finds errors.
    pub fn build(self) -> Result<Nlp> {
        let language = match &self.registry {
            Some(registry) => registry.resolve(&self.language)?,
            None => LanguageRegistry::embedded().resolve(&self.language)?,
        };

        let pipeline = match self.pipeline {
            Some(pipeline) => {
                check_custom(&pipeline, &language, self.validation)?;
                pipeline
            }
            None => Arc::new(default_pipeline_for(&language)?),
        };

        log::debug!("using {pipeline} for {language}");
        Ok(Nlp { language, pipeline })
    }
}

fn check_custom(pipeline: &Pipeline, language: &Language, mode: ValidationMode) -> Result<()> {
    if mode == ValidationMode::Permissive {
        return Ok(());
    }

    let report: ValidationReport = ValidationEngine::with_defaults().validate(pipeline, language);
    for warning in report.warnings() {
        log::warn!("{warning}");
    }
    if report.has_errors() {
        return Err(NlpError::InvalidPipeline {
            description: pipeline.description().to_string(),
            report,
        });
    }
    Ok(())
}
