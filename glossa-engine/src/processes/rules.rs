//! Per-language tokenizer rules and lexicons
//!
//! Each language with a default pipeline ships a TOML file under
//! `configs/tokenizers/`. The files are compiled in and parsed once; the
//! `und` file holds the language-neutral rules used by the generic steps.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use glossa_core::{Features, LanguageSupport, PosTag};
use serde::{Deserialize, Serialize};

/// Code of the language-neutral rule set
pub const GENERIC_CODE: &str = "und";

/// Characters treated as an apostrophe inside or at the end of a word
pub const APOSTROPHES: [char; 4] = ['\'', '\u{2019}', '\u{02BC}', '\u{1FBD}'];

static EMBEDDED_RULES: OnceLock<HashMap<String, Arc<Rules>>> = OnceLock::new();
static GENERIC_RULES: OnceLock<Arc<Rules>> = OnceLock::new();

const GENERIC_TABLE: &str = include_str!("../../configs/tokenizers/und.toml");

macro_rules! embed_rules {
    ($code:expr, $path:expr) => {
        ($code, include_str!($path))
    };
}

/// Raw rule file as written in TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    pub metadata: MetadataConfig,
    pub sentences: SentenceConfig,
    #[serde(default)]
    pub enclitics: Option<EncliticConfig>,
    #[serde(default)]
    pub elision: Option<ElisionConfig>,
    #[serde(default)]
    pub lexicon: LexiconConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub code: String,
    pub name: String,
    /// Prefix of the step names, e.g. `latin` for `latin_tokenization`
    pub prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceConfig {
    pub terminators: Vec<char>,
    /// Punctuation that stays with the sentence it closes
    #[serde(default = "default_closers")]
    pub closers: Vec<char>,
    /// Words after which `.` does not end a sentence
    #[serde(default)]
    pub abbreviations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncliticConfig {
    pub suffixes: Vec<String>,
    #[serde(default = "default_min_host_chars")]
    pub min_host_chars: usize,
    /// Word endings that are never split, e.g. the `-ine` of `multitudine`
    #[serde(default)]
    pub protected_endings: Vec<String>,
    #[serde(default)]
    pub exceptions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElisionConfig {
    /// Elided forms including their apostrophe, e.g. `l'`
    pub prefixes: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconConfig {
    #[serde(default)]
    pub entries: Vec<LexiconEntry>,
}

/// Closed-class knowledge about one surface form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub form: String,
    pub lemma: String,
    #[serde(default)]
    pub upos: Option<PosTag>,
    #[serde(default)]
    pub xpos: Option<String>,
    #[serde(default)]
    pub feats: Option<Features>,
}

fn default_closers() -> Vec<char> {
    vec![')', ']', '}', '»', '\u{201D}', '\u{2019}', '"', '\'']
}

fn default_min_host_chars() -> usize {
    2
}

/// Rules ready for lookup
#[derive(Debug, Clone)]
pub struct Rules {
    config: RulesConfig,
    lexicon: HashMap<String, LexiconEntry>,
    enclitic_exceptions: HashSet<String>,
    elisions: HashSet<String>,
    abbreviations: HashSet<String>,
}

impl Rules {
    /// Parse and validate a rule file
    pub fn from_toml_str(toml_str: &str) -> Result<Self, String> {
        let config: RulesConfig =
            toml::from_str(toml_str).map_err(|e| format!("failed to parse tokenizer rules: {e}"))?;
        Self::from_config(config)
    }

    pub fn from_config(config: RulesConfig) -> Result<Self, String> {
        let code = &config.metadata.code;
        if config.sentences.terminators.is_empty() {
            return Err(format!("rules for '{code}' define no sentence terminators"));
        }

        let mut lexicon = HashMap::with_capacity(config.lexicon.entries.len());
        for entry in &config.lexicon.entries {
            if entry.form.is_empty() || entry.lemma.is_empty() {
                return Err(format!("rules for '{code}' contain an empty lexicon entry"));
            }
            let key = normalize(&entry.form);
            if lexicon.insert(key, entry.clone()).is_some() {
                return Err(format!(
                    "rules for '{code}' list the form '{}' more than once",
                    entry.form
                ));
            }
        }

        let mut enclitic_exceptions = HashSet::new();
        if let Some(enclitics) = &config.enclitics {
            for word in &enclitics.exceptions {
                let key = normalize(word);
                if !enclitics.suffixes.iter().any(|s| key.ends_with(&normalize(s))) {
                    return Err(format!(
                        "rules for '{code}' list the enclitic exception '{word}' which ends in no suffix"
                    ));
                }
                if !enclitic_exceptions.insert(key) {
                    return Err(format!(
                        "rules for '{code}' list the enclitic exception '{word}' more than once"
                    ));
                }
            }
        }
        let elisions = config
            .elision
            .iter()
            .flat_map(|e| e.prefixes.iter())
            .map(|p| normalize(p))
            .collect();
        let abbreviations = config.sentences.abbreviations.iter().cloned().collect();

        Ok(Self {
            config,
            lexicon,
            enclitic_exceptions,
            elisions,
            abbreviations,
        })
    }

    pub fn code(&self) -> &str {
        &self.config.metadata.code
    }

    pub fn name(&self) -> &str {
        &self.config.metadata.name
    }

    /// Name of a step built from these rules, e.g. `latin_tagging`
    pub fn step_name(&self, step: &str) -> String {
        format!("{}_{step}", self.config.metadata.prefix)
    }

    pub fn is_generic(&self) -> bool {
        self.code() == GENERIC_CODE
    }

    /// Languages steps built from these rules accept
    pub fn support(&self) -> LanguageSupport {
        if self.is_generic() {
            LanguageSupport::Any
        } else {
            LanguageSupport::only([self.code()])
        }
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn is_terminator(&self, c: char) -> bool {
        self.config.sentences.terminators.contains(&c)
    }

    pub fn is_closer(&self, c: char) -> bool {
        self.config.sentences.closers.contains(&c)
    }

    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(word)
    }

    pub fn enclitics(&self) -> Option<&EncliticConfig> {
        self.config.enclitics.as_ref()
    }

    /// Whether a word must never lose an enclitic, as listed or by its ending
    pub fn is_enclitic_exception(&self, word: &str) -> bool {
        let key = normalize(word);
        if self.enclitic_exceptions.contains(&key) {
            return true;
        }
        self.enclitics().is_some_and(|e| {
            e.protected_endings
                .iter()
                .any(|ending| key.ends_with(&normalize(ending)))
        })
    }

    pub fn is_elision(&self, prefix: &str) -> bool {
        self.elisions.contains(&normalize(prefix))
    }

    /// Lexicon entry for a surface form, ignoring case and apostrophe style
    pub fn lookup(&self, form: &str) -> Option<&LexiconEntry> {
        self.lexicon.get(&normalize(form))
    }
}

/// Lowercase and fold every apostrophe to `'`
pub fn normalize(form: &str) -> String {
    form.chars()
        .flat_map(char::to_lowercase)
        .map(|c| if APOSTROPHES.contains(&c) { '\'' } else { c })
        .collect()
}

fn load_embedded_rules() -> Result<HashMap<String, Arc<Rules>>, String> {
    let embedded = [
        embed_rules!("chu", "../../configs/tokenizers/chu.toml"),
        embed_rules!("fro", "../../configs/tokenizers/fro.toml"),
        embed_rules!("got", "../../configs/tokenizers/got.toml"),
        embed_rules!("grc", "../../configs/tokenizers/grc.toml"),
        embed_rules!("lat", "../../configs/tokenizers/lat.toml"),
    ];

    let mut rules = HashMap::new();
    for (code, toml_content) in embedded {
        let parsed = Rules::from_toml_str(toml_content).map_err(|e| format!("{code}: {e}"))?;
        if parsed.code() != code {
            return Err(format!(
                "rules code mismatch: expected {code}, got {}",
                parsed.code()
            ));
        }
        rules.insert(code.to_string(), Arc::new(parsed));
    }
    Ok(rules)
}

fn embedded() -> &'static HashMap<String, Arc<Rules>> {
    EMBEDDED_RULES
        .get_or_init(|| load_embedded_rules().expect("Failed to load embedded tokenizer rules"))
}

/// Built-in rules for a language, if it has any
pub fn rules_for(code: &str) -> Option<Arc<Rules>> {
    embedded().get(code).cloned()
}

/// The language-neutral rules
pub fn generic_rules() -> Arc<Rules> {
    let rules = GENERIC_RULES.get_or_init(|| {
        Arc::new(Rules::from_toml_str(GENERIC_TABLE).expect("Failed to load generic tokenizer rules"))
    });
    Arc::clone(rules)
}

/// Codes with built-in rules, sorted
pub fn languages_with_rules() -> Vec<&'static str> {
    let mut codes: Vec<&str> = embedded().keys().map(String::as_str).collect();
    codes.sort_unstable();
    codes
}
