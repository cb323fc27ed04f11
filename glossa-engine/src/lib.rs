//! Pipeline selection and orchestration for glossa
//!
//! This crate turns the building blocks of `glossa-core` into something that
//! analyzes text:
//!
//! - [`Pipeline`]: an ordered list of [`Process`](glossa_core::Process) steps
//!   bound to a language, with optional eager [`validation`].
//! - [`default_pipeline_for`]: the registered default for each supported
//!   language (`lat`, `grc`, `chu`, `fro`, `got`).
//! - [`Nlp`]: resolves a language, picks its pipeline and runs
//!   [`Nlp::analyze`].
//! - [`processes`]: the built-in rule-based steps and CoNLL-U import.
//! - [`PipelineConfig`]: custom pipelines written in TOML.
//!
//! # Example
//!
//! ```rust
//! use glossa_engine::{example_text, Nlp};
//!
//! let nlp = Nlp::new("lat")?;
//! let doc = nlp.analyze(example_text("lat").unwrap())?;
//!
//! let first = &doc.words()[0];
//! assert_eq!(first.string, "Gallia");
//! assert_eq!(first.index_token, 1);
//! assert_eq!(first.index_sentence, 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod cancel;
pub mod config;
pub mod error;
mod example_texts;
mod nlp;
pub mod observer;
mod pipeline;
pub mod processes;
mod registry;
pub mod validation;

pub use cancel::CancellationToken;
pub use config::{PipelineConfig, ProcessSpec};
pub use error::{AnalyzeError, ConfigError, NlpError};
pub use example_texts::{example_languages, example_text};
pub use nlp::{Nlp, NlpBuilder, ValidationMode};
pub use observer::{NoopObserver, PipelineObserver, StepTiming, StepTimings};
pub use pipeline::Pipeline;
pub use processes::write_conllu;
pub use registry::{default_pipeline_for, registered_codes, DefaultPipeline};
pub use validation::{Severity, ValidationDiagnostic, ValidationReport};

pub use glossa_core::{
    Annotation, Document, Features, Field, FnProcess, Language, LanguageError, LanguageRegistry,
    LanguageSupport, PosTag, Process, ProcessError, ProcessResult, Sentence, Word,
};
