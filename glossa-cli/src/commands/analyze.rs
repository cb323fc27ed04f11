//! Analyze command implementation

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args};
use glossa_engine::{Document, Nlp, PipelineConfig, StepTimings};
use rayon::prelude::*;

use super::GlobalOptions;
use crate::input::{resolve_patterns, InputSource};
use crate::output::{create_formatter, OutputFormat};
use crate::progress::ProgressReporter;

/// Arguments for the analyze command
#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["input", "text", "example"])
))]
pub struct AnalyzeArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", num_args = 1..)]
    pub input: Vec<String>,

    /// Analyze this text instead of files
    #[arg(long, value_name = "TEXT")]
    pub text: Option<String>,

    /// Analyze the bundled example text of the language
    #[arg(long)]
    pub example: bool,

    /// ISO 639-3 language code
    #[arg(short, long, value_name = "CODE")]
    pub language: Option<String>,

    /// Pipeline configuration replacing the language's default pipeline
    #[arg(short = 'p', long, value_name = "FILE")]
    pub pipeline_config: Option<PathBuf>,

    /// Reject a configured pipeline that fails validation
    #[arg(long)]
    pub strict: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Worker threads when analyzing several files (default: all cores)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub fn execute(&self, options: &GlobalOptions) -> Result<()> {
        log::info!("Starting analysis");
        log::debug!("Arguments: {:?}", self);
        let config = &options.config;

        let pipeline_config = match &self.pipeline_config {
            Some(path) => Some(PipelineConfig::from_file(path).with_context(|| {
                format!("Failed to load pipeline configuration: {}", path.display())
            })?),
            None => None,
        };
        let language = self
            .language
            .clone()
            .or_else(|| pipeline_config.as_ref().map(|c| c.language.clone()))
            .unwrap_or_else(|| config.analysis.default_language.clone());

        let nlp = build_nlp(
            &language,
            pipeline_config.as_ref(),
            self.strict || config.analysis.strict,
        )?;
        log::info!("Pipeline: {}", nlp.pipeline());

        let sources = self.sources(&language)?;
        let documents = self.analyze_sources(&nlp, &sources, options)?;

        let format = self.format.unwrap_or(config.output.default_format);
        let pretty = config.output.pretty_json;
        let headers = documents.len() > 1;
        let mut formatter = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                create_formatter(format, BufWriter::new(file), pretty, headers)
            }
            None => create_formatter(format, io::stdout(), pretty, headers),
        };

        for (source, document) in &documents {
            formatter.format_document(source, document)?;
        }
        formatter.finish()?;

        log::info!("Analyzed {} input(s)", documents.len());
        Ok(())
    }

    fn sources(&self, language: &str) -> Result<Vec<InputSource>> {
        if let Some(text) = &self.text {
            return Ok(vec![InputSource::Inline(text.clone())]);
        }
        if self.example {
            return Ok(vec![InputSource::Example(language.to_string())]);
        }
        Ok(resolve_patterns(&self.input)?
            .into_iter()
            .map(InputSource::File)
            .collect())
    }

    fn analyze_sources(
        &self,
        nlp: &Nlp,
        sources: &[InputSource],
        options: &GlobalOptions,
    ) -> Result<Vec<(String, Document)>> {
        if let [source] = sources {
            return Ok(vec![analyze_one(nlp, source)?]);
        }

        let threads = self
            .threads
            .unwrap_or_else(|| options.config.worker_threads());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to create thread pool")?;
        log::info!("Analyzing {} files on {threads} thread(s)", sources.len());

        let mut progress = ProgressReporter::new(options.quiet);
        progress.init_files(sources.len() as u64);
        let results = pool.install(|| {
            sources
                .par_iter()
                .map(|source| {
                    let result = analyze_one(nlp, source);
                    progress.file_completed(&source.label());
                    result
                })
                .collect::<Result<Vec<_>>>()
        });
        progress.finish();
        results
    }
}

/// Language context with the default or the configured pipeline
fn build_nlp(language: &str, pipeline: Option<&PipelineConfig>, strict: bool) -> Result<Nlp> {
    let mut builder = Nlp::builder(language);
    if let Some(config) = pipeline {
        let pipeline = config
            .build()
            .context("Failed to build pipeline from configuration")?;
        builder = builder.pipeline(Arc::new(pipeline));
    }
    if strict {
        builder = builder.strict();
    }
    Ok(builder.build()?)
}

fn analyze_one(nlp: &Nlp, source: &InputSource) -> Result<(String, Document)> {
    let label = source.label();
    let text = source.read_text()?;

    let mut timings = StepTimings::new();
    let result = nlp.analyze_observed(&text, &mut timings);
    for step in &timings.steps {
        log::debug!(
            "{label}: {} took {:.2?} ({} words)",
            step.process,
            step.elapsed,
            step.words
        );
    }
    if let Some(step) = &timings.failed {
        log::debug!("{label}: step '{step}' failed");
    }
    let document = result.with_context(|| format!("Failed to analyze {label}"))?;

    log::info!(
        "{label}: {} sentence(s), {} word(s) in {:.2?}",
        document.sentence_count(),
        document.words().len(),
        timings.total()
    );
    Ok((label, document))
}
