//! Built-in annotation steps
//!
//! The rule-driven steps come in two flavours: one per language with an
//! embedded rule file (`latin_tokenization`, `gothic_tagging`, ...) and a
//! generic one usable for any language. [`ConlluProcess`] imports
//! annotations produced elsewhere.

mod conllu;
mod lemmatizer;
pub mod rules;
mod tagger;
mod tokenizer;

pub use conllu::{parse_conllu, write_conllu, ConlluProcess, ConlluRow};
pub use lemmatizer::LemmatizationProcess;
pub use rules::{languages_with_rules, LexiconEntry, Rules};
pub use tagger::TaggingProcess;
pub use tokenizer::TokenizationProcess;

/// A built-in step kind, as named in pipeline configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessKind {
    pub name: &'static str,
    pub description: &'static str,
}

/// Every step kind a pipeline configuration can name
pub const PROCESS_KINDS: [ProcessKind; 4] = [
    ProcessKind {
        name: "tokenization",
        description: "split text into sentences and words (language rules, or generic)",
    },
    ProcessKind {
        name: "tagging",
        description: "UPOS, XPOS and features from the lexicon; PUNCT and NUM heuristics",
    },
    ProcessKind {
        name: "lemmatization",
        description: "lemma from the lexicon, otherwise the lower-cased form",
    },
    ProcessKind {
        name: "conllu",
        description: "merge annotations from an external CoNLL-U file",
    },
];
