//! Annotation value types
//!
//! [`Field`] names a kind of annotation a process can require or provide,
//! [`Annotation`] carries a value for one of those fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A kind of annotation carried by a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// The word sequence itself, with sentence and token indices
    Tokens,
    /// Character offsets of each word in the raw text
    CharOffsets,
    /// Dictionary form
    Lemma,
    /// Universal part-of-speech tag
    Upos,
    /// Language-specific part-of-speech tag
    Xpos,
    /// Morphological features
    Features,
    /// Dependency governor and relation label
    Dependencies,
    /// Metrical scansion
    Scansion,
}

impl Field {
    /// Every field, in pipeline order
    pub const ALL: [Field; 8] = [
        Field::Tokens,
        Field::CharOffsets,
        Field::Lemma,
        Field::Upos,
        Field::Xpos,
        Field::Features,
        Field::Dependencies,
        Field::Scansion,
    ];

    /// Human readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Tokens => "tokens",
            Field::CharOffsets => "character offsets",
            Field::Lemma => "lemma",
            Field::Upos => "upos",
            Field::Xpos => "xpos",
            Field::Features => "features",
            Field::Dependencies => "dependencies",
            Field::Scansion => "scansion",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Universal Dependencies part-of-speech tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    /// Adjective
    Adj,
    /// Adposition
    Adp,
    /// Adverb
    Adv,
    /// Auxiliary
    Aux,
    /// Coordinating conjunction
    Cconj,
    /// Determiner
    Det,
    /// Interjection
    Intj,
    /// Noun
    Noun,
    /// Numeral
    Num,
    /// Particle
    Part,
    /// Pronoun
    Pron,
    /// Proper noun
    Propn,
    /// Punctuation
    Punct,
    /// Subordinating conjunction
    Sconj,
    /// Symbol
    Sym,
    /// Verb
    Verb,
    /// Anything else
    X,
}

impl PosTag {
    /// The tag as written in CoNLL-U files
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Adj => "ADJ",
            PosTag::Adp => "ADP",
            PosTag::Adv => "ADV",
            PosTag::Aux => "AUX",
            PosTag::Cconj => "CCONJ",
            PosTag::Det => "DET",
            PosTag::Intj => "INTJ",
            PosTag::Noun => "NOUN",
            PosTag::Num => "NUM",
            PosTag::Part => "PART",
            PosTag::Pron => "PRON",
            PosTag::Propn => "PROPN",
            PosTag::Punct => "PUNCT",
            PosTag::Sconj => "SCONJ",
            PosTag::Sym => "SYM",
            PosTag::Verb => "VERB",
            PosTag::X => "X",
        }
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PosTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = match s {
            "ADJ" => PosTag::Adj,
            "ADP" => PosTag::Adp,
            "ADV" => PosTag::Adv,
            "AUX" => PosTag::Aux,
            "CCONJ" => PosTag::Cconj,
            "DET" => PosTag::Det,
            "INTJ" => PosTag::Intj,
            "NOUN" => PosTag::Noun,
            "NUM" => PosTag::Num,
            "PART" => PosTag::Part,
            "PRON" => PosTag::Pron,
            "PROPN" => PosTag::Propn,
            "PUNCT" => PosTag::Punct,
            "SCONJ" => PosTag::Sconj,
            "SYM" => PosTag::Sym,
            "VERB" => PosTag::Verb,
            "X" => PosTag::X,
            other => return Err(format!("unknown universal POS tag '{other}'")),
        };
        Ok(tag)
    }
}

/// Morphological features, e.g. `Case=Nom|Gender=Fem|Number=Sing`
///
/// Stored sorted by feature name, which is also the CoNLL-U convention.
/// The empty set is written as `_`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Features(BTreeMap<String, String>);

impl Features {
    /// An empty feature set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a feature, returning the builder
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Value of a single feature
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Iterate over `(name, value)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Features {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("_");
        }
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

impl FromStr for Features {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "_" {
            return Ok(Self::new());
        }

        let mut map = BTreeMap::new();
        for item in s.split('|') {
            let (name, value) = item
                .split_once('=')
                .ok_or_else(|| format!("feature '{item}' is not of the form Name=Value"))?;
            if name.is_empty() || value.is_empty() {
                return Err(format!("feature '{item}' has an empty name or value"));
            }
            map.insert(name.to_string(), value.to_string());
        }
        Ok(Self(map))
    }
}

impl From<Features> for String {
    fn from(features: Features) -> Self {
        features.to_string()
    }
}

impl TryFrom<String> for Features {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A value for one annotation field of a word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    /// Character span `[start, stop)` in the raw text
    CharSpan {
        /// Offset of the first character
        start: usize,
        /// Offset one past the last character
        stop: usize,
    },
    /// Dictionary form
    Lemma(String),
    /// Universal part-of-speech tag
    Upos(PosTag),
    /// Language-specific part-of-speech tag
    Xpos(String),
    /// Morphological features
    Features(Features),
    /// Dependency attachment; `governor` is the `index_token` of the head, 0 for root
    Dependency {
        /// Head token index within the sentence
        governor: usize,
        /// Relation label, e.g. `nsubj`
        relation: String,
    },
    /// Metrical scansion
    Scansion(String),
}

impl Annotation {
    /// The field this annotation fills
    pub fn field(&self) -> Field {
        match self {
            Annotation::CharSpan { .. } => Field::CharOffsets,
            Annotation::Lemma(_) => Field::Lemma,
            Annotation::Upos(_) => Field::Upos,
            Annotation::Xpos(_) => Field::Xpos,
            Annotation::Features(_) => Field::Features,
            Annotation::Dependency { .. } => Field::Dependencies,
            Annotation::Scansion(_) => Field::Scansion,
        }
    }
}
