//! Language registry, document model and process contract
//!
//! This crate is the leaf layer of glossa. It knows nothing about pipelines
//! or how they are chosen; it defines the values every other layer passes
//! around:
//!
//! - **Languages**: an ISO 639-3 keyed registry of [`Language`] descriptors,
//!   compiled in from a TOML table.
//! - **Documents**: the [`Document`] accumulator with its [`Word`]s, and the
//!   rule that populated annotations are never silently overwritten.
//! - **Processes**: the [`Process`] trait every annotation step implements.
//!
//! # Example
//!
//! ```rust
//! use glossa_core::{language, Annotation, Document, Word};
//!
//! let latin = language::resolve("lat").unwrap();
//! let mut doc = Document::new(latin.code(), "Gallia est");
//! doc.set_words(vec![Word::new("Gallia", 0, 1), Word::new("est", 0, 2)])
//!     .unwrap();
//! doc.annotate(1, Annotation::Lemma("sum".into())).unwrap();
//!
//! assert_eq!(doc.sentences().len(), 1);
//! assert!(doc.annotate(1, Annotation::Lemma("esse".into())).is_err());
//! ```

pub mod document;
pub mod error;
pub mod language;
pub mod process;

pub use document::{Annotation, Document, Features, Field, PosTag, Sentence, Word};
pub use error::{LanguageError, ProcessError, ProcessResult};
pub use language::{Language, LanguageKind, LanguageRegistry, ScriptDirection};
pub use process::{FnProcess, LanguageSupport, Process};
