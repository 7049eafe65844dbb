//! Title tokenizer and stemmer.
//!
//! Keyword extraction and keyword-offset computation must agree on what a
//! word is, so both go through [`TitleTokenizer`].

use std::sync::OnceLock;

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

/// A word of a title with its stem and character offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The word as written.
    pub word: String,
    /// Lowercased, stemmed form.
    pub stem: String,
    /// Offset of the word's first character, counted in chars.
    pub offset: usize,
}

fn word_regex() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| {
        Regex::new(r"[\p{L}\p{N}]+(?:['’\-][\p{L}\p{N}]+)*").expect("word pattern is valid")
    })
}

pub struct TitleTokenizer {
    stemmer: Stemmer,
}

impl Default for TitleTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleTokenizer {
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Stem a single word (lowercased first).
    pub fn stem(&self, word: &str) -> String {
        self.stemmer.stem(&word.to_lowercase()).into_owned()
    }

    /// Split `text` into words at word boundaries.
    pub fn words<'a>(&self, text: &'a str) -> impl Iterator<Item = &'a str> {
        word_regex().find_iter(text).map(|m| m.as_str())
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut chars_before = 0;
        let mut last_byte = 0;
        for m in word_regex().find_iter(text) {
            chars_before += text[last_byte..m.start()].chars().count();
            last_byte = m.start();
            tokens.push(Token {
                word: m.as_str().to_string(),
                stem: self.stem(m.as_str()),
                offset: chars_before,
            });
        }
        tokens
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_text_tokenize.rs"]
mod tests;
