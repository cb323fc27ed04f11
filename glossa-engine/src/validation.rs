//! Eager validation of pipelines
//!
//! Pipelines are permissive by default: an ill-ordered or mismatched
//! pipeline only fails once the offending step runs. The rules here let a
//! caller find those problems up front. The engine runs every registered
//! [`ValidationRule`] and collects all findings into a [`ValidationReport`]
//! instead of stopping at the first one.
//!
//! ```rust
//! use glossa_engine::{default_pipeline_for, validation::ValidationEngine};
//!
//! let latin = glossa_core::language::resolve("lat").unwrap();
//! let pipeline = default_pipeline_for(&latin).unwrap();
//! let report = ValidationEngine::with_defaults().validate(&pipeline, &latin);
//! assert!(report.is_empty());
//! ```

use std::collections::HashSet;
use std::fmt;

use glossa_core::{Field, Language, LanguageSupport};
use serde::Serialize;

use crate::pipeline::Pipeline;

/// Whether a diagnostic blocks strict construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Rejects the pipeline under strict validation
    Error,
    /// Reported but never rejects
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A single finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    /// Name of the rule that produced it
    pub rule: String,
    /// 0-based index of the step concerned, if any
    pub step: Option<usize>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ValidationDiagnostic {
    /// An error raised by `rule`
    pub fn error(rule: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            rule: rule.to_string(),
            step: None,
            message: message.into(),
            hint: None,
        }
    }

    /// A warning raised by `rule`
    pub fn warning(rule: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(rule, message)
        }
    }

    pub fn at_step(mut self, step: usize) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.severity, self.rule)?;
        if let Some(step) = self.step {
            write!(f, " step {step}")?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

/// Collected diagnostics from running all rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Diagnostics with [`Severity::Error`]
    pub fn errors(&self) -> impl Iterator<Item = &ValidationDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    /// Diagnostics with [`Severity::Warning`]
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// No errors; warnings are acceptable
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {diagnostic}")?;
        }
        Ok(())
    }
}

/// A rule inspecting a pipeline about to be run as `language`
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier, e.g. `"field_order"`
    fn name(&self) -> &str;

    /// Findings for `pipeline`; empty when the rule is satisfied
    fn validate(&self, pipeline: &Pipeline, language: &Language) -> Vec<ValidationDiagnostic>;
}

/// Runs a set of rules and collects the report
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// An engine with no rules
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// All built-in rules
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(EmptyPipelineRule));
        engine.add_rule(Box::new(LanguageMismatchRule));
        engine.add_rule(Box::new(LanguageSupportRule));
        engine.add_rule(Box::new(FieldOrderRule));
        engine.add_rule(Box::new(DuplicateProcessRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in evaluation order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule in order and collect their findings
    pub fn validate(&self, pipeline: &Pipeline, language: &Language) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(pipeline, language));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

struct EmptyPipelineRule;

impl ValidationRule for EmptyPipelineRule {
    fn name(&self) -> &str {
        "empty_pipeline"
    }

    fn validate(&self, pipeline: &Pipeline, _language: &Language) -> Vec<ValidationDiagnostic> {
        if pipeline.is_empty() {
            vec![ValidationDiagnostic::warning(
                self.name(),
                format!(
                    "pipeline '{}' has no processes; analysis returns an untokenized document",
                    pipeline.description()
                ),
            )]
        } else {
            Vec::new()
        }
    }
}

struct LanguageMismatchRule;

impl ValidationRule for LanguageMismatchRule {
    fn name(&self) -> &str {
        "language_mismatch"
    }

    fn validate(&self, pipeline: &Pipeline, language: &Language) -> Vec<ValidationDiagnostic> {
        if pipeline.language().code() == language.code() {
            return Vec::new();
        }
        vec![ValidationDiagnostic::warning(
            self.name(),
            format!(
                "pipeline '{}' was built for {} but will analyze {}",
                pipeline.description(),
                pipeline.language(),
                language
            ),
        )]
    }
}

struct LanguageSupportRule;

impl ValidationRule for LanguageSupportRule {
    fn name(&self) -> &str {
        "language_support"
    }

    fn validate(&self, pipeline: &Pipeline, language: &Language) -> Vec<ValidationDiagnostic> {
        let code = language.code();
        pipeline
            .processes()
            .iter()
            .enumerate()
            .filter(|(_, process)| !process.languages().supports(code))
            .map(|(step, process)| {
                let diagnostic = ValidationDiagnostic::error(
                    self.name(),
                    format!("process '{}' does not support {}", process.name(), language),
                )
                .at_step(step);
                match process.languages() {
                    LanguageSupport::Only(codes) => {
                        diagnostic.with_hint(format!("supported: {}", codes.join(", ")))
                    }
                    LanguageSupport::Any => diagnostic,
                }
            })
            .collect()
    }
}

struct FieldOrderRule;

impl ValidationRule for FieldOrderRule {
    fn name(&self) -> &str {
        "field_order"
    }

    fn validate(&self, pipeline: &Pipeline, _language: &Language) -> Vec<ValidationDiagnostic> {
        let mut available: HashSet<Field> = HashSet::new();
        let mut diagnostics = Vec::new();

        for (step, process) in pipeline.processes().iter().enumerate() {
            for &field in process.requires() {
                if available.contains(&field) {
                    continue;
                }
                let provider = pipeline.processes()[step + 1..]
                    .iter()
                    .find(|later| later.provides().contains(&field));
                let mut diagnostic = ValidationDiagnostic::error(
                    self.name(),
                    format!(
                        "process '{}' requires {field}, which no earlier process provides",
                        process.name()
                    ),
                )
                .at_step(step);
                if let Some(provider) = provider {
                    diagnostic = diagnostic
                        .with_hint(format!("move '{}' before '{}'", provider.name(), process.name()));
                }
                diagnostics.push(diagnostic);
            }
            available.extend(process.provides().iter().copied());
        }

        diagnostics
    }
}

struct DuplicateProcessRule;

impl ValidationRule for DuplicateProcessRule {
    fn name(&self) -> &str {
        "duplicate_process"
    }

    fn validate(&self, pipeline: &Pipeline, _language: &Language) -> Vec<ValidationDiagnostic> {
        let mut seen = HashSet::new();
        pipeline
            .processes()
            .iter()
            .enumerate()
            .filter(|(_, process)| !seen.insert(process.name().to_string()))
            .map(|(step, process)| {
                ValidationDiagnostic::warning(
                    self.name(),
                    format!("process '{}' appears more than once", process.name()),
                )
                .at_step(step)
            })
            .collect()
    }
}
