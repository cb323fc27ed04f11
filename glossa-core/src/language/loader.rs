//! Language registry
//!
//! Manages the embedded language table and any table loaded at run time.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use super::{config::LanguageTable, Language};
use crate::error::LanguageError;

/// Embedded language table
static EMBEDDED: OnceLock<LanguageRegistry> = OnceLock::new();

const EMBEDDED_TABLE: &str = include_str!("../../configs/languages.toml");

/// Read-only mapping from ISO 639-3 code to [`Language`]
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    by_code: BTreeMap<String, Arc<Language>>,
}

impl LanguageRegistry {
    /// The registry built from the table compiled into the crate
    pub fn embedded() -> &'static LanguageRegistry {
        EMBEDDED.get_or_init(|| {
            Self::from_toml_str(EMBEDDED_TABLE).expect("Failed to load embedded language table")
        })
    }

    /// Build a registry from a validated table
    pub fn from_table(table: LanguageTable) -> Result<Self, LanguageError> {
        table.validate().map_err(LanguageError::InvalidTable)?;

        let by_code = table
            .languages
            .into_iter()
            .map(|lang| (lang.iso_639_3_code.clone(), Arc::new(lang)))
            .collect();

        Ok(Self { by_code })
    }

    /// Parse and validate a TOML language table
    pub fn from_toml_str(toml_str: &str) -> Result<Self, LanguageError> {
        let table = LanguageTable::parse(toml_str).map_err(LanguageError::InvalidTable)?;
        Self::from_table(table)
    }

    /// Load a TOML language table from disk
    pub fn from_file(path: &Path) -> Result<Self, LanguageError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LanguageError::InvalidTable(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Look up a language by its exact ISO 639-3 code
    pub fn resolve(&self, code: &str) -> Result<Arc<Language>, LanguageError> {
        self.by_code
            .get(code)
            .cloned()
            .ok_or_else(|| LanguageError::Unknown {
                code: code.to_string(),
            })
    }

    /// Whether the code is present
    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// All languages, ordered by code
    pub fn languages(&self) -> impl Iterator<Item = &Arc<Language>> {
        self.by_code.values()
    }

    /// Number of languages in the registry
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

/// Resolve a code against the embedded registry
pub fn resolve(code: &str) -> Result<Arc<Language>, LanguageError> {
    LanguageRegistry::embedded().resolve(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{LanguageKind, ScriptDirection};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_embedded_table_loads() {
        let registry = LanguageRegistry::embedded();
        assert!(registry.len() >= 5);
        for code in ["lat", "grc", "chu", "fro", "got", "axm"] {
            assert!(registry.contains(code), "missing {code}");
        }
    }

    #[test]
    fn test_resolve_known_language() {
        let latin = resolve("lat").unwrap();
        assert_eq!(latin.name, "Latin");
        assert_eq!(latin.family.as_deref(), Some("Indo-European"));
        assert_eq!(latin.kind, LanguageKind::Ancient);

        let fro = resolve("fro").unwrap();
        assert_eq!(fro.kind, LanguageKind::Historical);

        let hbo = resolve("hbo").unwrap();
        assert_eq!(hbo.direction, ScriptDirection::Rtl);
    }

    #[test]
    fn test_resolve_unknown_language() {
        match resolve("xxx") {
            Err(LanguageError::Unknown { code }) => assert_eq!(code, "xxx"),
            other => panic!("Expected Unknown error, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_is_exact() {
        assert!(resolve("LAT").is_err());
        assert!(resolve("latin").is_err());
        assert!(resolve(" lat").is_err());
    }

    #[test]
    fn test_resolve_shares_the_same_value() {
        let a = resolve("grc").unwrap();
        let b = resolve("grc").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_languages_are_ordered_by_code() {
        let codes: Vec<_> = LanguageRegistry::embedded()
            .languages()
            .map(|l| l.iso_639_3_code.clone())
            .collect();
        let mut sorted = codes.clone();
        sorted.sort();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[language]]
iso_639_3_code = "sga"
name = "Old Irish"
kind = "historical"
"#
        )
        .unwrap();

        let registry = LanguageRegistry::from_file(file.path()).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolve("sga").unwrap().name, "Old Irish");
        assert!(registry.resolve("lat").is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let err = LanguageRegistry::from_file(Path::new("/nonexistent/langs.toml")).unwrap_err();
        assert!(matches!(err, LanguageError::InvalidTable(_)));
    }

    #[test]
    fn test_invalid_table_is_rejected() {
        let err = LanguageRegistry::from_toml_str(
            r#"
[[language]]
iso_639_3_code = "latin"
name = "Latin"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, LanguageError::InvalidTable(_)));
    }
}
