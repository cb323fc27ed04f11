//! Validate command implementation

use anyhow::{Context, Result};
use clap::Args;
use glossa_engine::PipelineConfig;
use std::path::PathBuf;

use crate::error::CliError;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to pipeline configuration file to validate
    #[arg(short = 'p', long, value_name = "FILE", required = true)]
    pub pipeline_config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!(
            "Validating pipeline configuration: {}",
            self.pipeline_config.display()
        );

        let config = PipelineConfig::from_file(&self.pipeline_config).with_context(|| {
            format!(
                "Failed to load pipeline configuration: {}",
                self.pipeline_config.display()
            )
        })?;

        let pipeline = match config.build() {
            Ok(pipeline) => pipeline,
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e}");
                return Err(anyhow::anyhow!("Validation failed: {}", e));
            }
        };

        let report = pipeline.validate();
        println!("  Pipeline: {pipeline}");
        for diagnostic in &report.diagnostics {
            println!("  {diagnostic}");
        }

        if report.has_errors() {
            println!("✗ Pipeline is invalid!");
            return Err(CliError::InvalidPipeline {
                errors: report.errors().count(),
            }
            .into());
        }

        println!(
            "✓ Pipeline is valid! ({} warning(s))",
            report.warnings().count()
        );
        Ok(())
    }
}
