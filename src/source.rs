//! Paper retrieval.
//!
//! A [`PaperSource`] answers three questions about a set of ids: the records
//! themselves, the papers they reference, and the papers citing them.
//! [`gather_papers`] runs the retrieval sequence for a focus paper and turns
//! every failed call into an empty result.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::LayoutError;
use crate::layout::types::Paper;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ids: Vec<String>,
    pub max_count: usize,
    pub include_abstract: bool,
    pub include_contexts: bool,
    pub include_cited_by: bool,
}

impl FetchRequest {
    pub fn new(ids: Vec<String>, max_count: usize) -> Self {
        Self {
            ids,
            max_count,
            include_abstract: true,
            include_contexts: true,
            include_cited_by: true,
        }
    }

    fn for_ids(&self, ids: Vec<String>) -> Self {
        Self { ids, ..self.clone() }
    }
}

pub trait PaperSource {
    fn get_papers(&self, request: &FetchRequest) -> Result<Vec<Paper>, LayoutError>;
    fn get_references(&self, request: &FetchRequest) -> Result<Vec<Paper>, LayoutError>;
    fn get_citations(&self, request: &FetchRequest) -> Result<Vec<Paper>, LayoutError>;
}

fn or_empty(what: &str, result: Result<Vec<Paper>, LayoutError>) -> Vec<Paper> {
    result.unwrap_or_else(|e| {
        warn!(error = %e, "fetching {what} failed, continuing without them");
        Vec::new()
    })
}

/// Focus record, its references and citations, then the same for the
/// expansion ids. The focus paper comes first; duplicate ids keep their
/// first record.
pub fn gather_papers(
    source: &dyn PaperSource,
    focus: &str,
    expansions: &[String],
    template: &FetchRequest,
) -> Vec<Paper> {
    let focus_req = template.for_ids(vec![focus.to_string()]);
    let mut papers = or_empty("focus paper", source.get_papers(&focus_req));
    papers.extend(or_empty("references", source.get_references(&focus_req)));
    papers.extend(or_empty("citations", source.get_citations(&focus_req)));

    if !expansions.is_empty() {
        let exp_req = template.for_ids(expansions.to_vec());
        papers.extend(or_empty("expansions", source.get_papers(&exp_req)));
        papers.extend(or_empty("expansion references", source.get_references(&exp_req)));
        papers.extend(or_empty("expansion citations", source.get_citations(&exp_req)));
    }

    let mut seen = HashSet::new();
    papers.retain(|p| seen.insert(p.id.clone()));
    papers
}

// ─── CorpusSource ─────────────────────────────────────────────────────────────

/// Answers fetches from an in-memory corpus of records.
pub struct CorpusSource {
    records: Vec<Paper>,
}

impl CorpusSource {
    pub fn new(records: Vec<Paper>) -> Self {
        Self { records }
    }

    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    pub fn from_path(path: &Path) -> Result<Self, LayoutError> {
        let text = fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn records(&self) -> &[Paper] {
        &self.records
    }

    fn shape(&self, record: &Paper, request: &FetchRequest) -> Paper {
        let mut paper = record.clone();
        if request.include_abstract {
            if paper.abstract_text.is_none() {
                paper.abstract_text = paper.inverted_abstract.as_ref().map(|ia| ia.reconstruct());
            }
        } else {
            paper.abstract_text = None;
        }
        paper.inverted_abstract = None;
        if !request.include_contexts {
            paper.citation_contexts.clear();
        }
        if request.include_cited_by {
            paper.cited_by = self
                .records
                .iter()
                .filter(|r| r.cites(&record.id))
                .map(|r| r.id.clone())
                .collect();
        }
        paper
    }

    fn collect<'a>(
        &self,
        matches: impl Iterator<Item = &'a Paper>,
        request: &FetchRequest,
    ) -> Vec<Paper> {
        matches
            .take(request.max_count)
            .map(|r| self.shape(r, request))
            .collect()
    }
}

impl PaperSource for CorpusSource {
    fn get_papers(&self, request: &FetchRequest) -> Result<Vec<Paper>, LayoutError> {
        let wanted: HashSet<&str> = request.ids.iter().map(String::as_str).collect();
        Ok(self.collect(
            self.records.iter().filter(|r| wanted.contains(r.id.as_str())),
            request,
        ))
    }

    fn get_references(&self, request: &FetchRequest) -> Result<Vec<Paper>, LayoutError> {
        let referenced: HashSet<&str> = self
            .records
            .iter()
            .filter(|r| request.ids.contains(&r.id))
            .flat_map(|r| r.references.iter().map(String::as_str))
            .collect();
        if referenced.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.collect(
            self.records.iter().filter(|r| referenced.contains(r.id.as_str())),
            request,
        ))
    }

    fn get_citations(&self, request: &FetchRequest) -> Result<Vec<Paper>, LayoutError> {
        Ok(self.collect(
            self.records
                .iter()
                .filter(|r| request.ids.iter().any(|id| r.cites(id))),
            request,
        ))
    }
}

#[cfg(test)]
#[path = "../tests/rust/test_source.rs"]
mod tests;
