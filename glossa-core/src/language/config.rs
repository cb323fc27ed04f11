//! TOML schema for language tables
//!
//! ```toml
//! [[language]]
//! iso_639_3_code = "lat"
//! name = "Latin"
//! family = "Indo-European"
//! kind = "ancient"
//! direction = "ltr"
//! ```

use super::Language;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Root of a language table document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageTable {
    /// Table entries, one per `[[language]]` block
    #[serde(rename = "language", default)]
    pub languages: Vec<Language>,
}

impl LanguageTable {
    /// Parse a table from TOML text without validating it
    pub fn parse(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("failed to parse language table: {e}"))
    }

    /// Validate the table
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.languages.is_empty() {
            return Err("language table defines no languages".to_string());
        }

        let mut seen = HashSet::new();
        for lang in &self.languages {
            let code = lang.iso_639_3_code.as_str();
            if !is_iso_639_3(code) {
                return Err(format!(
                    "'{code}' is not an ISO 639-3 code (three lowercase ASCII letters)"
                ));
            }
            if lang.name.trim().is_empty() {
                return Err(format!("language '{code}' has an empty name"));
            }
            if !seen.insert(code) {
                return Err(format!("language '{code}' is defined more than once"));
            }
        }

        Ok(())
    }
}

fn is_iso_639_3(code: &str) -> bool {
    code.len() == 3 && code.bytes().all(|b| b.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{LanguageKind, ScriptDirection};

    #[test]
    fn test_parse_minimal_entry() {
        let table = LanguageTable::parse(
            r#"
[[language]]
iso_639_3_code = "hbo"
name = "Ancient Hebrew"
direction = "rtl"
"#,
        )
        .unwrap();

        assert_eq!(table.languages.len(), 1);
        let hbo = &table.languages[0];
        assert_eq!(hbo.family, None);
        assert_eq!(hbo.kind, LanguageKind::Ancient);
        assert_eq!(hbo.direction, ScriptDirection::Rtl);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_codes() {
        let table = LanguageTable {
            languages: vec![Language::new("la", "Latin")],
        };
        assert!(table.validate().unwrap_err().contains("ISO 639-3"));

        let table = LanguageTable {
            languages: vec![Language::new("LAT", "Latin")],
        };
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicates_and_empty() {
        let table = LanguageTable {
            languages: vec![Language::new("lat", "Latin"), Language::new("lat", "Latin")],
        };
        assert!(table.validate().unwrap_err().contains("more than once"));

        assert!(LanguageTable::default().validate().is_err());

        let table = LanguageTable {
            languages: vec![Language::new("lat", "  ")],
        };
        assert!(table.validate().unwrap_err().contains("empty name"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = LanguageTable::parse("[[language]]\nname = 3").unwrap_err();
        assert!(err.contains("failed to parse language table"));
    }
}
