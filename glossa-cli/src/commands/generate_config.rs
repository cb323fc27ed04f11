//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use glossa_engine::processes::PROCESS_KINDS;
use glossa_engine::{Language, LanguageRegistry, PipelineConfig, ProcessSpec};
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// ISO 639-3 code of the pipeline's language
    #[arg(short = 'l', long, value_name = "CODE", required = true)]
    pub language_code: String,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        let language = LanguageRegistry::embedded().resolve(&self.language_code)?;

        println!("Generating pipeline configuration template...");
        println!("  Language: {} ({})", language.name, language.code());
        println!("  Output file: {}", self.output.display());

        let template = generate_template(&language)?;

        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the step list to fit your pipeline");
        println!("2. Validate your configuration:");
        println!(
            "   glossa validate --pipeline-config {}",
            self.output.display()
        );
        println!("3. Use it for analysis:");
        println!(
            "   glossa analyze -i input.txt --pipeline-config {}",
            self.output.display()
        );

        Ok(())
    }
}

/// Commented template with the three rule-based steps
fn generate_template(language: &Language) -> Result<String> {
    let config = PipelineConfig::new(language.code())
        .with_description(format!("Custom pipeline for {}", language.name))
        .with_process(ProcessSpec::Tokenization { rules: None })
        .with_process(ProcessSpec::Tagging { rules: None })
        .with_process(ProcessSpec::Lemmatization { rules: None });

    let mut template = format!(
        "# Pipeline configuration for {} ({})\n#\n# Steps run in the order listed. Available steps:\n",
        language.name,
        language.code()
    );
    for kind in PROCESS_KINDS {
        template.push_str(&format!("#   {:<14} {}\n", kind.name, kind.description));
    }
    template.push_str(
        "#\n\
         # tokenization, tagging and lemmatization take an optional `rules = \"<code>\"`;\n\
         # \"und\" selects the generic rules. conllu needs `path = \"<file>.conllu\"`,\n\
         # relative to this file.\n\n",
    );
    template.push_str(&config.to_toml_string()?);
    Ok(template)
}
