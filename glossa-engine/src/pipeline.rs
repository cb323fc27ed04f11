//! Ordered sequences of annotation steps

use std::fmt;
use std::sync::Arc;

use glossa_core::{Language, Process};

use crate::validation::{ValidationEngine, ValidationReport};

/// A description plus the ordered processes run for one language
///
/// Pipelines are immutable once shared; an [`Nlp`](crate::Nlp) holds its
/// pipeline behind an `Arc` and never changes it.
#[derive(Clone)]
pub struct Pipeline {
    description: String,
    processes: Vec<Arc<dyn Process>>,
    language: Arc<Language>,
}

impl Pipeline {
    /// An empty pipeline for `language`
    pub fn new(description: impl Into<String>, language: Arc<Language>) -> Self {
        Self {
            description: description.into(),
            processes: Vec::new(),
            language,
        }
    }

    /// Append a step
    pub fn with_process<P: Process + 'static>(self, process: P) -> Self {
        self.with_shared_process(Arc::new(process))
    }

    /// Append a step that may also be used by other pipelines
    pub fn with_shared_process(mut self, process: Arc<dyn Process>) -> Self {
        self.processes.push(process);
        self
    }

    /// Append a step in place
    pub fn push(&mut self, process: Arc<dyn Process>) {
        self.processes.push(process);
    }

    /// Human-readable summary, e.g. `Pipeline for the Latin language`
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Language the pipeline was built for
    pub fn language(&self) -> &Arc<Language> {
        &self.language
    }

    /// Steps in execution order
    pub fn processes(&self) -> &[Arc<dyn Process>] {
        &self.processes
    }

    /// Step names in execution order
    pub fn process_names(&self) -> Vec<&str> {
        self.processes.iter().map(|p| p.name()).collect()
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether the pipeline has no steps
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Run the built-in rules against the pipeline's own language
    pub fn validate(&self) -> ValidationReport {
        ValidationEngine::with_defaults().validate(self, &self.language)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("description", &self.description)
            .field("language", &self.language.code())
            .field("processes", &self.process_names())
            .finish()
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {}",
            self.description,
            self.language.code(),
            self.process_names().join(" -> ")
        )
    }
}
