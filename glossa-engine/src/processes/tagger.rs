//! Lexicon-driven part-of-speech and morphology tagging

use std::sync::Arc;

use glossa_core::{Annotation, Document, Field, LanguageSupport, PosTag, Process, ProcessResult};

use super::rules::{self, Rules};

/// Tags closed-class words from the language lexicon
///
/// Lexicon entries supply UPOS, XPOS and features. Words made only of
/// punctuation become `PUNCT`, digit runs become `NUM`; anything else is
/// left untagged for a statistical tagger further down the pipeline.
#[derive(Debug, Clone)]
pub struct TaggingProcess {
    name: String,
    rules: Arc<Rules>,
}

impl TaggingProcess {
    pub fn for_language(code: &str) -> Option<Self> {
        rules::rules_for(code).map(Self::with_rules)
    }

    /// Punctuation and numeral tagging only, for any language
    pub fn generic() -> Self {
        Self::with_rules(rules::generic_rules())
    }

    pub fn with_rules(rules: Arc<Rules>) -> Self {
        Self {
            name: rules.step_name("tagging"),
            rules,
        }
    }

    /// Annotations for one surface form
    pub fn tags_for(&self, form: &str) -> Vec<Annotation> {
        if let Some(entry) = self.rules.lookup(form) {
            let mut tags = Vec::with_capacity(3);
            if let Some(upos) = entry.upos {
                tags.push(Annotation::Upos(upos));
            }
            if let Some(xpos) = &entry.xpos {
                tags.push(Annotation::Xpos(xpos.clone()));
            }
            if let Some(feats) = &entry.feats {
                tags.push(Annotation::Features(feats.clone()));
            }
            return tags;
        }

        match heuristic_tag(form) {
            Some(tag) => vec![Annotation::Upos(tag)],
            None => Vec::new(),
        }
    }
}

/// `PUNCT` for punctuation-only forms, `NUM` for digit runs
pub(crate) fn heuristic_tag(form: &str) -> Option<PosTag> {
    if form.is_empty() {
        None
    } else if form.chars().all(char::is_numeric) {
        Some(PosTag::Num)
    } else if form.chars().all(|c| !c.is_alphanumeric() && !c.is_whitespace()) {
        Some(PosTag::Punct)
    } else {
        None
    }
}

impl Process for TaggingProcess {
    fn name(&self) -> &str {
        &self.name
    }

    fn languages(&self) -> LanguageSupport {
        self.rules.support()
    }

    fn requires(&self) -> &[Field] {
        &[Field::Tokens]
    }

    fn provides(&self) -> &[Field] {
        &[Field::Upos, Field::Xpos, Field::Features]
    }

    fn run(&self, mut input: Document, language: &str) -> ProcessResult<Document> {
        self.check_language(language)?;
        input.require(&self.name, Field::Tokens)?;

        let mut tagged = 0;
        for position in 0..input.words().len() {
            let tags = self.tags_for(&input.words()[position].string);
            if !tags.is_empty() {
                tagged += 1;
            }
            for tag in tags {
                input.annotate(position, tag)?;
            }
        }
        log::trace!(
            "{}: tagged {tagged} of {} words",
            self.name,
            input.words().len()
        );
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processes::TokenizationProcess;
    use glossa_core::ProcessError;

    fn tokenized(code: &str, text: &str) -> Document {
        TokenizationProcess::for_language(code)
            .unwrap()
            .run(Document::new(code, text), code)
            .unwrap()
    }

    #[test]
    fn test_lexicon_and_heuristics() {
        let tagger = TaggingProcess::for_language("lat").unwrap();
        let doc = tagger
            .run(tokenized("lat", "Gallia est 3 ignotum."), "lat")
            .unwrap();
        let words = doc.words();

        assert_eq!(words[0].upos, Some(PosTag::Propn));
        assert_eq!(words[1].upos, Some(PosTag::Aux));
        assert_eq!(
            words[1].features.as_ref().unwrap().get("Number"),
            Some("Sing")
        );
        assert_eq!(words[2].upos, Some(PosTag::Num));
        assert_eq!(words[3].upos, None);
        assert_eq!(words[4].upos, Some(PosTag::Punct));
    }

    #[test]
    fn test_enclitic_is_tagged() {
        let tagger = TaggingProcess::for_language("lat").unwrap();
        let doc = tagger.run(tokenized("lat", "minimeque"), "lat").unwrap();
        assert_eq!(doc.words()[1].string, "-que");
        assert_eq!(doc.words()[1].upos, Some(PosTag::Cconj));
    }

    #[test]
    fn test_requires_tokens() {
        let tagger = TaggingProcess::for_language("got").unwrap();
        match tagger.run(Document::new("got", "swa"), "got") {
            Err(ProcessError::MissingField { process, field }) => {
                assert_eq!(process, "gothic_tagging");
                assert_eq!(field, Field::Tokens);
            }
            other => panic!("Expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_conflicting_earlier_tag_fails() {
        let mut doc = tokenized("got", "swa");
        doc.annotate(0, Annotation::Upos(PosTag::Sconj)).unwrap();

        let tagger = TaggingProcess::for_language("got").unwrap();
        assert!(matches!(
            tagger.run(doc, "got"),
            Err(ProcessError::AnnotationConflict { position: 0, field: Field::Upos })
        ));
    }

    #[test]
    fn test_heuristic_tag() {
        assert_eq!(heuristic_tag("1066"), Some(PosTag::Num));
        assert_eq!(heuristic_tag("·"), Some(PosTag::Punct));
        assert_eq!(heuristic_tag("«"), Some(PosTag::Punct));
        assert_eq!(heuristic_tag("rex"), None);
        assert_eq!(heuristic_tag(""), None);
    }

    #[test]
    fn test_generic_supports_any_language() {
        let tagger = TaggingProcess::generic();
        assert!(tagger.check_language("ang").is_ok());
        let doc = TokenizationProcess::generic()
            .run(Document::new("ang", "Hwæt !"), "ang")
            .unwrap();
        let doc = tagger.run(doc, "ang").unwrap();
        assert_eq!(doc.words()[0].upos, None);
        assert_eq!(doc.words()[1].upos, Some(PosTag::Punct));
    }
}
