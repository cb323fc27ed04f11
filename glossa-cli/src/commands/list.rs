//! List command implementation

use std::io::Write;

use anyhow::Result;
use glossa_engine::processes::PROCESS_KINDS;
use glossa_engine::{registered_codes, DefaultPipeline, LanguageRegistry};

use super::ListCommands;
use crate::output::OutputFormat;

/// Write the requested listing to `out`
pub fn execute(subcommand: ListCommands, out: &mut dyn Write) -> Result<()> {
    match subcommand {
        ListCommands::Languages => languages(out),
        ListCommands::Pipelines => pipelines(out),
        ListCommands::Processes => processes(out),
        ListCommands::Formats => formats(out),
    }
}

fn languages(out: &mut dyn Write) -> Result<()> {
    let defaults = registered_codes();
    writeln!(out, "Known languages (* = default pipeline):")?;
    for language in LanguageRegistry::embedded().languages() {
        let marker = if defaults.iter().any(|code| *code == language.code()) {
            '*'
        } else {
            ' '
        };
        writeln!(
            out,
            "{marker} {:<5} {:<28} {}",
            language.code(),
            language.name,
            language.kind.as_str()
        )?;
    }
    Ok(())
}

fn pipelines(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Default pipelines:")?;
    for default in DefaultPipeline::ALL {
        let steps = default.steps()?;
        let names: Vec<&str> = steps.iter().map(|step| step.name()).collect();
        writeln!(out, "  {:<5} {}", default.code(), default.description())?;
        writeln!(out, "        {}", names.join(" -> "))?;
    }
    Ok(())
}

fn processes(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Process kinds for pipeline configurations:")?;
    for kind in PROCESS_KINDS {
        writeln!(out, "  {:<14} {}", kind.name, kind.description)?;
    }
    Ok(())
}

fn formats(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Available output formats:")?;
    for format in OutputFormat::ALL {
        writeln!(out, "  {:<7} {}", format.as_str(), format.description())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(subcommand: ListCommands) -> String {
        let mut buffer = Vec::new();
        execute(subcommand, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_languages_mark_defaults() {
        let out = listing(ListCommands::Languages);
        let latin = out.lines().find(|l| l.contains(" lat ")).unwrap();
        assert!(latin.starts_with('*'));
        let armenian = out.lines().find(|l| l.contains(" axm ")).unwrap();
        assert!(armenian.starts_with(' '));
    }

    #[test]
    fn test_pipelines_show_steps() {
        let out = listing(ListCommands::Pipelines);
        assert!(out.contains("Pipeline for the Latin language"));
        assert!(out.contains("latin_tokenization -> latin_tagging -> latin_lemmatization"));
        assert!(out.contains("ocs_tokenization"));
    }

    #[test]
    fn test_processes_and_formats() {
        let processes = listing(ListCommands::Processes);
        for name in ["tokenization", "tagging", "lemmatization", "conllu"] {
            assert!(processes.contains(name), "{name}");
        }
        let formats = listing(ListCommands::Formats);
        assert!(formats.contains("conllu"));
        assert!(formats.contains("json"));
    }
}
