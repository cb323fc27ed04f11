//! Custom pipelines described in TOML
//!
//! ```toml
//! language = "lat"
//! description = "Latin with an external parse"
//!
//! [[processes]]
//! name = "tokenization"
//!
//! [[processes]]
//! name = "conllu"
//! path = "caesar.conllu"
//!
//! [[processes]]
//! name = "lemmatization"
//! ```
//!
//! Relative CoNLL-U paths are resolved against the directory of the
//! configuration file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use glossa_core::{LanguageRegistry, Process};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pipeline::Pipeline;
use crate::processes::{
    rules, ConlluProcess, LemmatizationProcess, Rules, TaggingProcess, TokenizationProcess,
};

/// One step of a configured pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case", deny_unknown_fields)]
pub enum ProcessSpec {
    Tokenization {
        /// Code whose built-in rules to use; `und` forces the generic rules
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rules: Option<String>,
    },
    Tagging {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rules: Option<String>,
    },
    Lemmatization {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rules: Option<String>,
    },
    Conllu {
        path: PathBuf,
    },
}

impl ProcessSpec {
    /// Kind name as written in the configuration
    pub fn kind(&self) -> &'static str {
        match self {
            ProcessSpec::Tokenization { .. } => "tokenization",
            ProcessSpec::Tagging { .. } => "tagging",
            ProcessSpec::Lemmatization { .. } => "lemmatization",
            ProcessSpec::Conllu { .. } => "conllu",
        }
    }

    /// Instantiate the step for a pipeline in `language`
    pub fn build(
        &self,
        language: &str,
        base_dir: Option<&Path>,
    ) -> Result<Arc<dyn Process>, ConfigError> {
        let process: Arc<dyn Process> = match self {
            ProcessSpec::Tokenization { rules } => {
                Arc::new(TokenizationProcess::with_rules(select_rules(rules, language)?))
            }
            ProcessSpec::Tagging { rules } => {
                Arc::new(TaggingProcess::with_rules(select_rules(rules, language)?))
            }
            ProcessSpec::Lemmatization { rules } => {
                Arc::new(LemmatizationProcess::with_rules(select_rules(rules, language)?))
            }
            ProcessSpec::Conllu { path } => {
                let path = match base_dir {
                    Some(dir) if path.is_relative() => dir.join(path),
                    _ => path.clone(),
                };
                Arc::new(ConlluProcess::from_path(path))
            }
        };
        Ok(process)
    }
}

/// Explicit rules, else the language's own, else the generic ones
fn select_rules(requested: &Option<String>, language: &str) -> Result<Arc<Rules>, ConfigError> {
    match requested.as_deref() {
        Some(rules::GENERIC_CODE) => Ok(rules::generic_rules()),
        Some(code) => rules::rules_for(code).ok_or_else(|| {
            ConfigError::Invalid(format!("no built-in tokenizer rules for '{code}'"))
        }),
        None => Ok(rules::rules_for(language).unwrap_or_else(rules::generic_rules)),
    }
}

/// A pipeline as written in a configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub processes: Vec<ProcessSpec>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl PipelineConfig {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            description: None,
            processes: Vec::new(),
            base_dir: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_process(mut self, spec: ProcessSpec) -> Self {
        self.processes.push(spec);
        self
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Description used when the configuration gives none
    pub fn effective_description(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| format!("Custom pipeline for '{}'", self.language))
    }

    /// Build against the embedded language registry
    pub fn build(&self) -> Result<Pipeline, ConfigError> {
        self.build_with(LanguageRegistry::embedded())
    }

    pub fn build_with(&self, registry: &LanguageRegistry) -> Result<Pipeline, ConfigError> {
        let language = registry.resolve(&self.language)?;
        let mut pipeline = Pipeline::new(self.effective_description(), language);
        for spec in &self.processes {
            pipeline.push(spec.build(&self.language, self.base_dir.as_deref())?);
        }
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CONFIG: &str = r#"
        language = "lat"
        description = "Latin with external parse"

        [[processes]]
        name = "tokenization"

        [[processes]]
        name = "conllu"
        path = "caesar.conllu"

        [[processes]]
        name = "lemmatization"
        rules = "und"
    "#;

    #[test]
    fn test_parse_and_build() {
        let config = PipelineConfig::from_toml_str(CONFIG).unwrap();
        assert_eq!(config.language, "lat");
        assert_eq!(config.processes.len(), 3);
        assert_eq!(
            config.processes[1],
            ProcessSpec::Conllu {
                path: PathBuf::from("caesar.conllu")
            }
        );

        let pipeline = config.build().unwrap();
        assert_eq!(pipeline.description(), "Latin with external parse");
        assert_eq!(
            pipeline.process_names(),
            vec!["latin_tokenization", "conllu", "generic_lemmatization"]
        );
    }

    #[test]
    fn test_language_without_rules_uses_generic_steps() {
        let config = PipelineConfig::new("ang")
            .with_process(ProcessSpec::Tokenization { rules: None })
            .with_process(ProcessSpec::Tagging { rules: None });
        let pipeline = config.build().unwrap();
        assert_eq!(pipeline.description(), "Custom pipeline for 'ang'");
        assert_eq!(
            pipeline.process_names(),
            vec!["generic_tokenization", "generic_tagging"]
        );
    }

    #[test]
    fn test_unknown_language() {
        let err = PipelineConfig::new("xxx").build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown language 'xxx'. Use ISO 639-3 languages."
        );
    }

    #[test]
    fn test_unknown_rules() {
        let config = PipelineConfig::new("lat").with_process(ProcessSpec::Tagging {
            rules: Some("ang".into()),
        });
        assert!(matches!(config.build(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_step_and_field_rejected() {
        let unknown_step = "language = \"lat\"\n[[processes]]\nname = \"parsing\"\n";
        assert!(matches!(
            PipelineConfig::from_toml_str(unknown_step),
            Err(ConfigError::Parse(_))
        ));

        let unknown_field = "language = \"lat\"\nmodel = \"x\"\n";
        assert!(PipelineConfig::from_toml_str(unknown_field).is_err());
    }

    #[test]
    fn test_relative_conllu_path_follows_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();

        let config = PipelineConfig::from_file(&path).unwrap();
        let step = config.processes[1]
            .build("lat", config.base_dir.as_deref())
            .unwrap();
        assert_eq!(step.name(), "conllu");
        assert_eq!(config.base_dir.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_missing_file() {
        let err = PipelineConfig::from_file(Path::new("/nonexistent/pipeline.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PipelineConfig::new("got")
            .with_description("Gothic")
            .with_process(ProcessSpec::Tokenization { rules: None })
            .with_process(ProcessSpec::Lemmatization { rules: None });
        let written = config.to_toml_string().unwrap();
        assert!(written.contains("name = \"tokenization\""));
        assert_eq!(PipelineConfig::from_toml_str(&written).unwrap(), config);
    }
}
