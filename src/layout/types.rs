//! Layout types: Paper, Keyword, KeywordTable, EdgePoint, KeywordLine.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

// ─── Constants ────────────────────────────────────────────────────────────────

/// x-coordinate given to papers no keyword line could place.
pub const UNMAPPED_X: f64 = -250.0;

/// Display palette for keyword lines, handed out cyclically.
pub const PALETTE: &[&str] = &[
    "#82b74b", "#405d27", "#c1946a", "#92a8d1", "#034f84", "#f7786b", "#6b5b95", "#feb236",
    "#d64161", "#ff7b25", "#3e4444",
];

// ─── Abstracts ────────────────────────────────────────────────────────────────

/// An abstract stored as word → positions, as bibliographic services ship it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvertedAbstract {
    pub index_length: usize,
    pub inverted_index: BTreeMap<String, Vec<usize>>,
}

impl InvertedAbstract {
    /// Rebuild the running text. Positions nobody claims become `?`.
    pub fn reconstruct(&self) -> String {
        let mut words = vec!["?"; self.index_length];
        for (token, positions) in &self.inverted_index {
            for &pos in positions {
                if let Some(slot) = words.get_mut(pos) {
                    *slot = token.as_str();
                }
            }
        }
        words.join(" ")
    }
}

// ─── PaperLayout ──────────────────────────────────────────────────────────────

/// Geometry of one title row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperLayout {
    pub x: f64,
    pub y: f64,
    /// Characters reserved for the year column (digits + 3).
    pub year_len: usize,
    /// Characters reserved for the citation-count column (digits + 3).
    pub citation_len: usize,
    pub width: f64,
    /// The row is drawn ending at `x` rather than starting there. No pipeline
    /// stage sets it; renderers that right-align rows do, and bounds honour it.
    pub right_align: bool,
}

// ─── Excerpts ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExcerptKind {
    /// The focus paper cites this paper with these contexts.
    CitedByFocus,
    /// This paper cites the focus paper with these contexts.
    CitesFocus,
}

// ─── Paper ────────────────────────────────────────────────────────────────────

/// One paper: the fetched record plus everything the pipeline derives for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub id: String,
    pub year: i32,
    pub title: String,
    #[serde(default)]
    pub citation_count: u32,
    /// Ids this paper cites.
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cited_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverted_abstract: Option<InvertedAbstract>,
    /// Citation-context sentences keyed by the cited (or citing) paper id.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub citation_contexts: BTreeMap<String, Vec<String>>,

    // Derived by the pipeline.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Character offset of each keyword's first occurrence in the title.
    #[serde(default)]
    pub keyword_offsets: BTreeMap<String, usize>,
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub layout: PaperLayout,
    #[serde(default)]
    pub has_edge: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub unmapped: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excerpts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt_kind: Option<ExcerptKind>,
}

impl Paper {
    pub fn new(id: impl Into<String>, year: i32, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            year,
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_references<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references = refs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_citation_count(mut self, count: u32) -> Self {
        self.citation_count = count;
        self
    }

    pub fn cites(&self, other: &str) -> bool {
        self.references.iter().any(|r| r == other)
    }
}

// ─── Keyword ──────────────────────────────────────────────────────────────────

/// A stemmed keyword and what the corpus says about it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    /// Occurrences across all titles.
    pub count: usize,
    /// Surface spellings seen for this stem, in order of first appearance.
    pub forms: Vec<String>,
    /// Assigned once the keyword has at least one drawn line.
    pub color: Option<String>,
}

impl Keyword {
    pub fn is_salient(&self, min_instances: usize) -> bool {
        self.count > min_instances
    }

    /// Record a spelling unless it is already known.
    pub fn add_form(&mut self, form: &str) {
        if !self.forms.iter().any(|f| f == form) {
            self.forms.push(form.to_string());
        }
    }

    /// A representative surface form (the first one seen).
    pub fn example(&self) -> Option<&str> {
        self.forms.first().map(String::as_str)
    }
}

/// Keywords keyed by stem, iterated in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordTable {
    order: Vec<String>,
    entries: HashMap<String, Keyword>,
}

impl KeywordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `stem` if absent and return its entry.
    pub fn entry(&mut self, stem: &str) -> &mut Keyword {
        if !self.entries.contains_key(stem) {
            self.order.push(stem.to_string());
        }
        self.entries.entry(stem.to_string()).or_default()
    }

    pub fn get(&self, stem: &str) -> Option<&Keyword> {
        self.entries.get(stem)
    }

    pub fn get_mut(&mut self, stem: &str) -> Option<&mut Keyword> {
        self.entries.get_mut(stem)
    }

    pub fn contains(&self, stem: &str) -> bool {
        self.entries.contains_key(stem)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Stems in first-appearance order.
    pub fn stems(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Keyword)> {
        self.order
            .iter()
            .map(|stem| (stem.as_str(), &self.entries[stem]))
    }

    /// Keep only entries satisfying `keep`, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &Keyword) -> bool) {
        let entries = &mut self.entries;
        self.order.retain(|stem| {
            let kept = keep(stem, &entries[stem]);
            if !kept {
                entries.remove(stem);
            }
            kept
        });
    }
}

impl Serialize for KeywordTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for (stem, keyword) in self.iter() {
            map.serialize_entry(stem, keyword)?;
        }
        map.end()
    }
}

// ─── Storylines and edges ─────────────────────────────────────────────────────

/// Connected components of the citation graph restricted to one keyword.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Storyline {
    pub keyword: String,
    /// Each component lists paper ids sorted by year.
    pub components: Vec<Vec<String>>,
}

/// One stop of a drawn line: the paper and the keyword's x-offset inside its row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgePoint {
    pub x: f64,
    pub pid: String,
}

/// Every drawn segment for one keyword.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordLine {
    pub keyword: String,
    pub segments: Vec<Vec<EdgePoint>>,
}

impl KeywordLine {
    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Vec::len).sum()
    }

    pub fn touches(&self, pid: &str) -> bool {
        self.segments
            .iter()
            .any(|segment| segment.iter().any(|p| p.pid == pid))
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_types.rs"]
mod tests;
