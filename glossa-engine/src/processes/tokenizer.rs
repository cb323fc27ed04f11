//! Rule-based sentence and word tokenization

use std::sync::{Arc, OnceLock};

use glossa_core::{Document, Field, LanguageSupport, Process, ProcessResult, Word};
use regex::Regex;

use super::rules::{self, Rules, APOSTROPHES};

static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Letter runs (with inner or trailing apostrophes), digit runs, or one
/// character of anything else that is not whitespace
fn token_pattern() -> &'static Regex {
    TOKEN_PATTERN.get_or_init(|| {
        Regex::new(
            r"[\p{L}\p{M}]+(?:['\x{2019}\x{02BC}\x{1FBD}][\p{L}\p{M}]+)*['\x{2019}\x{02BC}\x{1FBD}]?|\p{N}+|[^\s\p{L}\p{M}\p{N}]",
        )
        .expect("token pattern is a valid regex")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Word,
    Number,
    Punct,
}

#[derive(Debug, Clone)]
struct Piece {
    text: String,
    start: usize,
    stop: usize,
    kind: Kind,
}

impl Piece {
    fn single_char(&self) -> Option<char> {
        let mut chars = self.text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

/// Splits raw text into sentences and words
///
/// Produces `string`, `index_token`, `index_sentence` and character offsets
/// for every word. Punctuation marks are words of their own; Latin-style
/// enclitics and French-style elisions are split off according to the
/// language rules.
#[derive(Debug, Clone)]
pub struct TokenizationProcess {
    name: String,
    rules: Arc<Rules>,
}

impl TokenizationProcess {
    /// Tokenizer using the built-in rules of `code`
    pub fn for_language(code: &str) -> Option<Self> {
        rules::rules_for(code).map(Self::with_rules)
    }

    /// Tokenizer for any language, without enclitic or elision handling
    pub fn generic() -> Self {
        Self::with_rules(rules::generic_rules())
    }

    pub fn with_rules(rules: Arc<Rules>) -> Self {
        Self {
            name: rules.step_name("tokenization"),
            rules,
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Tokenize without touching a document
    pub fn tokenize(&self, text: &str) -> Vec<Word> {
        let pieces = self.split(text);
        self.assign_sentences(pieces)
    }

    fn split(&self, text: &str) -> Vec<Piece> {
        let mut pieces = Vec::new();
        let mut chars_seen = 0;
        let mut bytes_seen = 0;

        for m in token_pattern().find_iter(text) {
            chars_seen += text[bytes_seen..m.start()].chars().count();
            let start = chars_seen;
            let len = m.as_str().chars().count();
            chars_seen += len;
            bytes_seen = m.end();

            let kind = if m.as_str().chars().any(char::is_alphabetic) {
                Kind::Word
            } else if m.as_str().chars().all(char::is_numeric) {
                Kind::Number
            } else {
                Kind::Punct
            };
            let piece = Piece {
                text: m.as_str().to_string(),
                start,
                stop: start + len,
                kind,
            };

            if kind == Kind::Word {
                self.split_word(piece, &mut pieces);
            } else {
                pieces.push(piece);
            }
        }

        pieces
    }

    fn split_word(&self, mut piece: Piece, out: &mut Vec<Piece>) {
        while let Some((elided, rest)) = self.split_elision(&piece) {
            out.push(elided);
            piece = rest;
        }
        match self.split_enclitic(&piece) {
            Some((host, enclitic)) => {
                out.push(host);
                out.push(enclitic);
            }
            None => out.push(piece),
        }
    }

    /// `l'enfant` into `l'` and `enfant`
    fn split_elision(&self, piece: &Piece) -> Option<(Piece, Piece)> {
        let chars: Vec<char> = piece.text.chars().collect();
        let apostrophe = chars.iter().position(|c| APOSTROPHES.contains(c))?;
        if apostrophe + 1 >= chars.len() {
            return None;
        }

        let prefix: String = chars[..=apostrophe].iter().collect();
        if !self.rules.is_elision(&prefix) {
            return None;
        }
        let rest: String = chars[apostrophe + 1..].iter().collect();
        let split_at = piece.start + apostrophe + 1;

        Some((
            Piece {
                text: prefix,
                start: piece.start,
                stop: split_at,
                kind: Kind::Word,
            },
            Piece {
                text: rest,
                start: split_at,
                stop: piece.stop,
                kind: Kind::Word,
            },
        ))
    }

    /// `virumque` into `virum` and `-que`
    fn split_enclitic(&self, piece: &Piece) -> Option<(Piece, Piece)> {
        let enclitics = self.rules.enclitics()?;
        if self.rules.is_enclitic_exception(&piece.text) {
            return None;
        }

        let chars: Vec<char> = piece.text.chars().collect();
        for suffix in &enclitics.suffixes {
            let suffix_len = suffix.chars().count();
            if chars.len() < suffix_len + enclitics.min_host_chars {
                continue;
            }
            let host_len = chars.len() - suffix_len;
            let tail: String = chars[host_len..].iter().collect();
            if tail.to_lowercase() != *suffix {
                continue;
            }

            let host: String = chars[..host_len].iter().collect();
            let split_at = piece.start + host_len;
            return Some((
                Piece {
                    text: host,
                    start: piece.start,
                    stop: split_at,
                    kind: Kind::Word,
                },
                Piece {
                    text: format!("-{tail}"),
                    start: split_at,
                    stop: piece.stop,
                    kind: Kind::Word,
                },
            ));
        }
        None
    }

    fn assign_sentences(&self, pieces: Vec<Piece>) -> Vec<Word> {
        let mut words = Vec::with_capacity(pieces.len());
        let mut sentence = 0;
        let mut token = 0;
        let mut pending_break = false;

        for (index, piece) in pieces.iter().enumerate() {
            let mark = match piece.kind {
                Kind::Punct => piece.single_char(),
                _ => None,
            };

            if pending_break && !self.trails(mark, piece, pieces.get(index + 1)) {
                sentence += 1;
                token = 0;
                pending_break = false;
            }

            token += 1;
            words.push(Word::new(piece.text.clone(), sentence, token).with_span(piece.start, piece.stop));

            if let Some(c) = mark {
                let previous = index.checked_sub(1).and_then(|i| pieces.get(i));
                if self.rules.is_terminator(c)
                    && !self.follows_abbreviation(c, piece, previous)
                    && !is_decimal_point(c, piece, previous, pieces.get(index + 1))
                {
                    pending_break = true;
                }
            }
        }

        words
    }

    /// Whether a mark after a terminator still belongs to the ended sentence.
    /// A closer glued to the next word opens the next sentence instead.
    fn trails(&self, mark: Option<char>, piece: &Piece, next: Option<&Piece>) -> bool {
        let Some(c) = mark else {
            return false;
        };
        if self.rules.is_terminator(c) {
            return true;
        }
        let opens_next = next.is_some_and(|n| n.kind == Kind::Word && n.start == piece.stop);
        self.rules.is_closer(c) && !opens_next
    }

    fn follows_abbreviation(&self, mark: char, piece: &Piece, previous: Option<&Piece>) -> bool {
        match previous {
            Some(prev) if mark == '.' && prev.kind == Kind::Word && prev.stop == piece.start => {
                self.rules.is_abbreviation(&prev.text)
            }
            _ => false,
        }
    }
}

/// `.` glued between two digit runs, as in `3.5`
fn is_decimal_point(mark: char, piece: &Piece, previous: Option<&Piece>, next: Option<&Piece>) -> bool {
    let glued_before = previous.is_some_and(|p| p.kind == Kind::Number && p.stop == piece.start);
    let glued_after = next.is_some_and(|n| n.kind == Kind::Number && n.start == piece.stop);
    mark == '.' && glued_before && glued_after
}

impl Process for TokenizationProcess {
    fn name(&self) -> &str {
        &self.name
    }

    fn languages(&self) -> LanguageSupport {
        self.rules.support()
    }

    fn provides(&self) -> &[Field] {
        &[Field::Tokens, Field::CharOffsets]
    }

    fn run(&self, mut input: Document, language: &str) -> ProcessResult<Document> {
        self.check_language(language)?;
        let words = self.tokenize(input.raw());
        log::trace!(
            "{}: {} words from {} characters",
            self.name,
            words.len(),
            input.raw().chars().count()
        );
        input.set_words(words)?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_core::ProcessError;

    fn strings(words: &[Word]) -> Vec<&str> {
        words.iter().map(|w| w.string.as_str()).collect()
    }

    #[test]
    fn test_punctuation_and_numbers_are_tokens() {
        let tokenizer = TokenizationProcess::generic();
        let words = tokenizer.tokenize("anno 1066, rex (vetus) venit.");
        assert_eq!(
            strings(&words),
            vec!["anno", "1066", ",", "rex", "(", "vetus", ")", "venit", "."]
        );
    }

    #[test]
    fn test_char_offsets_count_characters() {
        let tokenizer = TokenizationProcess::for_language("grc").unwrap();
        let text = "ὅτι μὲν ὑμεῖς";
        let words = tokenizer.tokenize(text);
        assert_eq!(strings(&words), vec!["ὅτι", "μὲν", "ὑμεῖς"]);
        assert_eq!(words[1].index_char_start, Some(4));
        assert_eq!(words[1].index_char_stop, Some(7));

        let chars: Vec<char> = text.chars().collect();
        for word in &words {
            let start = word.index_char_start.unwrap();
            let stop = word.index_char_stop.unwrap();
            let slice: String = chars[start..stop].iter().collect();
            assert_eq!(slice, word.string);
        }
    }

    #[test]
    fn test_sentence_indices() {
        let tokenizer = TokenizationProcess::for_language("lat").unwrap();
        let words = tokenizer.tokenize("Gallia est. Belgae sunt!");
        assert_eq!(words[0].index_sentence, 0);
        assert_eq!(words[0].index_token, 1);
        assert_eq!(words[2].string, ".");
        assert_eq!(words[2].index_sentence, 0);
        assert_eq!(words[3].string, "Belgae");
        assert_eq!(words[3].index_sentence, 1);
        assert_eq!(words[3].index_token, 1);
    }

    #[test]
    fn test_trailing_marks_stay_in_sentence() {
        let tokenizer = TokenizationProcess::for_language("lat").unwrap();
        let words = tokenizer.tokenize("\"Quid agis?!\" inquit.");
        let last_of_first: Vec<_> = words.iter().filter(|w| w.index_sentence == 0).collect();
        assert_eq!(strings(&words[..5]), vec!["\"", "Quid", "agis", "?", "!"]);
        assert_eq!(last_of_first.last().unwrap().string, "\"");
        assert_eq!(words.last().unwrap().index_sentence, 1);
    }

    #[test]
    fn test_greek_question_mark_and_high_stop() {
        let tokenizer = TokenizationProcess::for_language("grc").unwrap();
        let words = tokenizer.tokenize("τί ἐστιν; οὐκ οἶδα· καὶ σύ.");
        let sentences: Vec<usize> = words.iter().map(|w| w.index_sentence).collect();
        assert_eq!(sentences, vec![0, 0, 0, 1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn test_greek_elided_forms_keep_apostrophe() {
        let tokenizer = TokenizationProcess::for_language("grc").unwrap();
        let words = tokenizer.tokenize("ἐγὼ δ᾽ οὖν");
        assert_eq!(strings(&words), vec!["ἐγὼ", "δ᾽", "οὖν"]);
    }

    #[test]
    fn test_latin_enclitics() {
        let tokenizer = TokenizationProcess::for_language("lat").unwrap();
        let words = tokenizer.tokenize("arma virumque cano atque bene");
        assert_eq!(
            strings(&words),
            vec!["arma", "virum", "-que", "cano", "atque", "bene"]
        );
        assert_eq!(words[2].index_char_start, Some(10));
        assert_eq!(words[2].index_char_stop, Some(13));
        assert_eq!(words[2].index_token, 3);
    }

    #[test]
    fn test_latin_abbreviations_do_not_end_sentences() {
        let tokenizer = TokenizationProcess::for_language("lat").unwrap();
        let words = tokenizer.tokenize("C. Iulius Caesar venit. Vicit.");
        let sentences: Vec<usize> = words.iter().map(|w| w.index_sentence).collect();
        assert_eq!(sentences, vec![0, 0, 0, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_latin_ablatives_in_ine_keep_their_ending() {
        let tokenizer = TokenizationProcess::for_language("lat").unwrap();
        let words = tokenizer.tokenize("multitudine magnitudine Carthagine legione videsne virumque");
        assert_eq!(
            strings(&words),
            vec![
                "multitudine",
                "magnitudine",
                "Carthagine",
                "legione",
                "vides",
                "-ne",
                "virum",
                "-que"
            ]
        );
    }

    #[test]
    fn test_latin_pronoun_id_ends_sentence() {
        let tokenizer = TokenizationProcess::for_language("lat").unwrap();
        let words = tokenizer.tokenize("Caesar id dixit, quod vidit id. Belgae fugerunt.");
        let sentences: Vec<usize> = words.iter().map(|w| w.index_sentence).collect();
        assert_eq!(sentences, vec![0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1]);
        assert_eq!(words[8].string, "Belgae");
        assert_eq!(words[8].index_token, 1);
    }

    #[test]
    fn test_opening_quote_starts_next_sentence() {
        let tokenizer = TokenizationProcess::for_language("lat").unwrap();
        let words = tokenizer.tokenize("Venit. \"Quid agis?\" inquit.");
        let pairs: Vec<(&str, usize)> = words
            .iter()
            .map(|w| (w.string.as_str(), w.index_sentence))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("Venit", 0),
                (".", 0),
                ("\"", 1),
                ("Quid", 1),
                ("agis", 1),
                ("?", 1),
                ("\"", 1),
                ("inquit", 2),
                (".", 2),
            ]
        );
        assert_eq!(words[2].index_token, 1);
    }

    #[test]
    fn test_decimal_point_does_not_end_sentence() {
        let tokenizer = TokenizationProcess::for_language("lat").unwrap();
        let words = tokenizer.tokenize("anno 3.5 venit. Vicit.");
        assert_eq!(
            strings(&words[..6]),
            vec!["anno", "3", ".", "5", "venit", "."]
        );
        let sentences: Vec<usize> = words.iter().map(|w| w.index_sentence).collect();
        assert_eq!(sentences, vec![0, 0, 0, 0, 0, 0, 1, 1]);

        let words = tokenizer.tokenize("anno 3. Vicit.");
        assert_eq!(words[2].string, ".");
        assert_eq!(words[3].index_sentence, 1);
    }

    #[test]
    fn test_old_french_elision() {
        let tokenizer = TokenizationProcess::for_language("fro").unwrap();
        let words = tokenizer.tokenize("Por ce l'ai mise qu'il");
        assert_eq!(
            strings(&words),
            vec!["Por", "ce", "l'", "ai", "mise", "qu'", "il"]
        );
        assert_eq!(words[2].index_char_stop, words[3].index_char_start);
    }

    #[test]
    fn test_run_sets_words_once() {
        let tokenizer = TokenizationProcess::for_language("got").unwrap();
        let doc = tokenizer
            .run(Document::new("got", "swa liuhtjai."), "got")
            .unwrap();
        assert!(doc.is_tokenized());
        assert_eq!(doc.words().len(), 3);

        match tokenizer.run(doc, "got") {
            Err(ProcessError::AlreadyTokenized { words }) => assert_eq!(words, 3),
            other => panic!("Expected AlreadyTokenized, got {other:?}"),
        }
    }

    #[test]
    fn test_run_rejects_other_language() {
        let tokenizer = TokenizationProcess::for_language("got").unwrap();
        assert!(matches!(
            tokenizer.run(Document::new("lat", "Gallia"), "lat"),
            Err(ProcessError::UnsupportedLanguage { .. })
        ));
    }

    #[test]
    fn test_empty_and_whitespace_text() {
        let tokenizer = TokenizationProcess::generic();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize(" \n\t ").is_empty());

        let doc = tokenizer.run(Document::new("ang", "   "), "ang").unwrap();
        assert!(doc.is_tokenized());
        assert!(doc.words().is_empty());
    }

    #[test]
    fn test_names() {
        assert_eq!(
            TokenizationProcess::for_language("lat").unwrap().name(),
            "latin_tokenization"
        );
        assert_eq!(TokenizationProcess::generic().name(), "generic_tokenization");
        assert!(TokenizationProcess::for_language("ang").is_none());
    }
}
