//! Default pipeline for each supported language

use std::sync::Arc;

use glossa_core::{Language, LanguageError, Process};

use crate::pipeline::Pipeline;
use crate::processes::{LemmatizationProcess, TaggingProcess, TokenizationProcess};

/// Languages that ship a default pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultPipeline {
    /// `lat`
    Latin,
    /// `grc`
    AncientGreek,
    /// `chu`
    OldChurchSlavonic,
    /// `fro`
    OldFrench,
    /// `got`
    Gothic,
}

impl DefaultPipeline {
    /// Every registered default, ordered by code
    pub const ALL: [DefaultPipeline; 5] = [
        DefaultPipeline::OldChurchSlavonic,
        DefaultPipeline::OldFrench,
        DefaultPipeline::Gothic,
        DefaultPipeline::AncientGreek,
        DefaultPipeline::Latin,
    ];

    /// Exact lookup by ISO 639-3 code
    pub fn for_code(code: &str) -> Option<Self> {
        match code {
            "lat" => Some(DefaultPipeline::Latin),
            "grc" => Some(DefaultPipeline::AncientGreek),
            "chu" => Some(DefaultPipeline::OldChurchSlavonic),
            "fro" => Some(DefaultPipeline::OldFrench),
            "got" => Some(DefaultPipeline::Gothic),
            _ => None,
        }
    }

    /// ISO 639-3 code the default is registered under
    pub fn code(self) -> &'static str {
        match self {
            DefaultPipeline::Latin => "lat",
            DefaultPipeline::AncientGreek => "grc",
            DefaultPipeline::OldChurchSlavonic => "chu",
            DefaultPipeline::OldFrench => "fro",
            DefaultPipeline::Gothic => "got",
        }
    }

    /// Description given to the built pipeline
    pub fn description(self) -> &'static str {
        match self {
            DefaultPipeline::Latin => "Pipeline for the Latin language",
            DefaultPipeline::AncientGreek => "Pipeline for the Greek language",
            DefaultPipeline::OldChurchSlavonic => "Pipeline for the Old Church Slavonic language",
            DefaultPipeline::OldFrench => "Pipeline for the Old French language",
            DefaultPipeline::Gothic => "Pipeline for the Gothic language",
        }
    }

    /// Ordered steps: tokenization, tagging, lemmatization
    pub fn steps(self) -> Result<Vec<Arc<dyn Process>>, LanguageError> {
        let code = self.code();
        let unimplemented = || LanguageError::Unimplemented {
            code: code.to_string(),
        };
        let tokenizer = TokenizationProcess::for_language(code).ok_or_else(unimplemented)?;
        let tagger = TaggingProcess::for_language(code).ok_or_else(unimplemented)?;
        let lemmatizer = LemmatizationProcess::for_language(code).ok_or_else(unimplemented)?;

        Ok(vec![
            Arc::new(tokenizer),
            Arc::new(tagger),
            Arc::new(lemmatizer),
        ])
    }

    /// Build the pipeline for `language`, which must carry this default's code
    pub fn build(self, language: Arc<Language>) -> Result<Pipeline, LanguageError> {
        let mut pipeline = Pipeline::new(self.description(), language);
        for step in self.steps()? {
            pipeline.push(step);
        }
        Ok(pipeline)
    }
}

/// The default pipeline of a known language
///
/// Fails with [`LanguageError::Unimplemented`] when no default is
/// registered for the code. No fallback or fuzzy matching is attempted.
pub fn default_pipeline_for(language: &Arc<Language>) -> Result<Pipeline, LanguageError> {
    let default = DefaultPipeline::for_code(language.code()).ok_or_else(|| {
        LanguageError::Unimplemented {
            code: language.code().to_string(),
        }
    })?;
    default.build(Arc::clone(language))
}

/// Codes with a default pipeline, sorted
pub fn registered_codes() -> Vec<&'static str> {
    DefaultPipeline::ALL.iter().map(|d| d.code()).collect()
}
