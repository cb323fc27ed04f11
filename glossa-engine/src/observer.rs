//! Per-step hooks for watching an analysis
//!
//! Observers see each step start, finish or fail without the steps knowing
//! about them. [`StepTimings`] is the built-in collector the CLI uses for
//! its verbose timing report.

use std::time::Duration;

use glossa_core::{Document, ProcessError};

/// Callbacks invoked by [`Nlp::analyze_observed`](crate::Nlp::analyze_observed)
pub trait PipelineObserver {
    /// A step is about to run on `document`
    fn on_step_start(&mut self, _index: usize, _process: &str, _document: &Document) {}

    /// A step finished; `document` is its output
    fn on_step_end(
        &mut self,
        _index: usize,
        _process: &str,
        _document: &Document,
        _elapsed: Duration,
    ) {
    }

    /// A step failed and the analysis stops
    fn on_step_failed(&mut self, _index: usize, _process: &str, _error: &ProcessError) {}
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// How one step went
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTiming {
    /// Step name
    pub process: String,
    /// Wall-clock time the step took
    pub elapsed: Duration,
    /// Words in the document after the step
    pub words: usize,
}

/// Records the duration of every completed step
#[derive(Debug, Default, Clone)]
pub struct StepTimings {
    /// Completed steps in execution order
    pub steps: Vec<StepTiming>,
    /// Name of the step that failed, if any
    pub failed: Option<String>,
}

impl StepTimings {
    /// An empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of the completed steps' durations
    pub fn total(&self) -> Duration {
        self.steps.iter().map(|s| s.elapsed).sum()
    }
}

impl PipelineObserver for StepTimings {
    fn on_step_end(&mut self, _index: usize, process: &str, document: &Document, elapsed: Duration) {
        self.steps.push(StepTiming {
            process: process.to_string(),
            elapsed,
            words: document.words().len(),
        });
    }

    fn on_step_failed(&mut self, _index: usize, process: &str, _error: &ProcessError) {
        self.failed = Some(process.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_timings_accumulate() {
        let mut timings = StepTimings::new();
        let doc = Document::new("lat", "");
        timings.on_step_start(0, "a", &doc);
        timings.on_step_end(0, "a", &doc, Duration::from_millis(2));
        timings.on_step_end(1, "b", &doc, Duration::from_millis(3));

        assert_eq!(timings.steps.len(), 2);
        assert_eq!(timings.total(), Duration::from_millis(5));
        assert!(timings.failed.is_none());

        timings.on_step_failed(2, "c", &ProcessError::other("boom"));
        assert_eq!(timings.failed.as_deref(), Some("c"));
    }
}
