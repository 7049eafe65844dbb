//! Salient keyword extraction over a corpus of paper titles.
//!
//! Two passes: a [`CandidateExtractor`] proposes candidate words from the
//! whole corpus (stop words removed), then every title is re-tokenized and
//! occurrences are counted against the stemmed candidate set. Stems that
//! were never proposed are never salient, however often they occur.

use std::collections::HashSet;

use tracing::debug;

use super::tokenize::TitleTokenizer;
use crate::layout::types::{KeywordTable, Paper};

// ─── Candidate extraction ─────────────────────────────────────────────────────

/// Proposes candidate keywords for a corpus.
pub trait CandidateExtractor {
    /// Candidate words in order of first appearance, lowercased.
    fn candidates(&self, corpus: &str) -> Vec<String>;
}

/// English stop words never proposed as keywords.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "either",
    "even", "ever", "every", "few", "for", "from", "further", "had", "has", "have", "having",
    "he", "her", "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if",
    "in", "into", "is", "it", "its", "itself", "just", "last", "least", "less", "let", "like",
    "made", "make", "many", "may", "me", "might", "more", "most", "much", "must", "my", "myself",
    "near", "neither", "new", "no", "nor", "not", "now", "of", "off", "often", "on", "once",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "per", "rather",
    "same", "several", "she", "should", "since", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
    "through", "thus", "to", "too", "toward", "towards", "under", "until", "up", "upon", "us",
    "using", "very", "via", "was", "we", "were", "what", "when", "where", "whether", "which",
    "while", "who", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet",
    "you", "your", "yours", "yourself", "yourselves",
];

/// Stop-word filtering candidate extractor.
pub struct StopWordExtractor {
    stop_words: HashSet<String>,
    tokenizer: TitleTokenizer,
}

impl Default for StopWordExtractor {
    fn default() -> Self {
        Self::english()
    }
}

impl StopWordExtractor {
    pub fn english() -> Self {
        Self::with_stop_words(ENGLISH_STOP_WORDS.iter().copied())
    }

    pub fn with_stop_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            stop_words: words.into_iter().map(str::to_lowercase).collect(),
            tokenizer: TitleTokenizer::new(),
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }
}

impl CandidateExtractor for StopWordExtractor {
    fn candidates(&self, corpus: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        self.tokenizer
            .words(corpus)
            .map(str::to_lowercase)
            .filter(|w| !self.stop_words.contains(w))
            // Bare numbers make poor storylines.
            .filter(|w| !w.chars().all(|c| c.is_numeric()))
            .filter(|w| seen.insert(w.clone()))
            .collect()
    }
}

// ─── Keyword extraction ───────────────────────────────────────────────────────

pub struct KeywordExtractor<'a> {
    candidates: &'a dyn CandidateExtractor,
    tokenizer: TitleTokenizer,
    min_instances: usize,
}

impl<'a> KeywordExtractor<'a> {
    pub fn new(candidates: &'a dyn CandidateExtractor, min_instances: usize) -> Self {
        Self {
            candidates,
            tokenizer: TitleTokenizer::new(),
            min_instances,
        }
    }

    /// Build the salience table and tag each paper with its salient stems
    /// (title order, first occurrence only).
    pub fn extract(&self, papers: &mut [Paper]) -> KeywordTable {
        let corpus = papers
            .iter()
            .map(|p| p.title.as_str())
            .collect::<Vec<_>>()
            .join(". ");

        let mut table = KeywordTable::new();
        for word in self.candidates.candidates(&corpus) {
            table.entry(&self.tokenizer.stem(&word));
        }

        let tokenized: Vec<_> = papers
            .iter()
            .map(|p| self.tokenizer.tokenize(&p.title))
            .collect();
        for token in tokenized.iter().flatten() {
            if let Some(keyword) = table.get_mut(&token.stem) {
                keyword.count += 1;
                keyword.add_form(&token.word);
            }
        }

        let candidate_count = table.len();
        table.retain(|_, k| k.is_salient(self.min_instances));
        debug!(
            candidates = candidate_count,
            salient = table.len(),
            "extracted keywords"
        );

        for (paper, tokens) in papers.iter_mut().zip(&tokenized) {
            let mut seen = HashSet::new();
            paper.keywords = tokens
                .iter()
                .filter(|t| table.contains(&t.stem))
                .filter(|t| seen.insert(t.stem.as_str()))
                .map(|t| t.stem.clone())
                .collect();
        }
        table
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_text_keywords.rs"]
mod tests;
