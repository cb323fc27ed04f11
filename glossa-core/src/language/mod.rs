//! Language descriptors and the ISO 639-3 language registry
//!
//! A [`Language`] is an immutable value identified by its ISO 639-3 code.
//! Languages are owned by a [`LanguageRegistry`] and shared out as
//! `Arc<Language>`; nothing mutates them after the registry is built.

pub mod config;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

pub use config::LanguageTable;
pub use loader::{resolve, LanguageRegistry};

/// Broad period classification of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageKind {
    /// Attested in antiquity (e.g. Latin, Ancient Greek)
    #[default]
    Ancient,
    /// Medieval or early-modern stage of a language (e.g. Old French)
    Historical,
    /// Still spoken today
    Living,
}

impl LanguageKind {
    /// Lowercase name as used in the language table
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageKind::Ancient => "ancient",
            LanguageKind::Historical => "historical",
            LanguageKind::Living => "living",
        }
    }
}

/// Writing direction of the language's usual script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptDirection {
    /// Left to right
    #[default]
    Ltr,
    /// Right to left
    Rtl,
}

/// A natural language known to the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    /// ISO 639-3 code, e.g. `lat`
    pub iso_639_3_code: String,
    /// Display name, e.g. `Latin`
    pub name: String,
    /// Language family, when known
    #[serde(default)]
    pub family: Option<String>,
    /// Period classification
    #[serde(default)]
    pub kind: LanguageKind,
    /// Script direction
    #[serde(default)]
    pub direction: ScriptDirection,
}

impl Language {
    /// Create a language descriptor with default metadata
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            iso_639_3_code: code.into(),
            name: name.into(),
            family: None,
            kind: LanguageKind::default(),
            direction: ScriptDirection::default(),
        }
    }

    /// The ISO 639-3 code
    pub fn code(&self) -> &str {
        &self.iso_639_3_code
    }
}

// Identity is the code alone.
impl PartialEq for Language {
    fn eq(&self, other: &Self) -> bool {
        self.iso_639_3_code == other.iso_639_3_code
    }
}

impl Eq for Language {}

impl Hash for Language {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.iso_639_3_code.hash(state);
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.iso_639_3_code)
    }
}
