//! Layout engine: StoryMap ties the pipeline stages together.
//!
//! keywords → citation graph → preparation → lane solver → post layout.
//! PostLayout can be re-run on its own whenever view filters change.

pub mod graph;
pub mod lanes;
pub mod post;
pub mod prepare;
pub mod types;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use graph::CitationGraph;
pub use lanes::{AnchorSet, LaneReport, LaneSolver, LayoutQuality};
pub use post::{Bounds, ViewSummary, YearBand};
pub use types::{EdgePoint, Keyword, KeywordLine, KeywordTable, Paper, Storyline};

use crate::config::{LayoutParams, ViewFilters};
use crate::solver::{SolveStatus, Solver};
use crate::text::{CandidateExtractor, KeywordExtractor, TitleTokenizer};

/// All state of one layout computation. Owned by a single request.
pub struct StoryMap {
    pub params: LayoutParams,
    /// The paper the map was retrieved around (the first paper).
    pub focus: Option<String>,
    /// Papers in input order.
    pub papers: Vec<Paper>,
    /// Maps paper id → position in `papers`.
    pub paper_index: HashMap<String, usize>,
    pub keywords: KeywordTable,
    pub graph: CitationGraph,
    pub storylines: Vec<Storyline>,
    /// Paper ids in sequence order.
    pub sequence: Vec<String>,
    pub lines: Vec<KeywordLine>,
    /// Status of the last lane-solver run.
    pub status: Option<SolveStatus>,
}

/// How keyword summaries are ordered. Selected keywords always come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordSort {
    /// Most papers first.
    #[default]
    Count,
    #[serde(rename = "az")]
    Alphabetical,
    /// Most multi-stop lines first.
    Lines,
}

impl std::str::FromStr for KeywordSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "count" => Ok(KeywordSort::Count),
            "az" | "alphabetical" => Ok(KeywordSort::Alphabetical),
            "lines" => Ok(KeywordSort::Lines),
            other => Err(format!("unknown keyword sort '{other}' (count, az, lines)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordSummary {
    pub keyword: String,
    pub example: Option<String>,
    pub papers: usize,
    /// Drawn lines with more than one stop.
    pub lines: usize,
    pub color: Option<String>,
    pub selected: bool,
}

impl StoryMap {
    /// Extract keywords, build the citation graph and prepare the layout.
    /// Duplicate paper ids keep their first record.
    pub fn build(
        papers: Vec<Paper>,
        params: LayoutParams,
        extractor: &dyn CandidateExtractor,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut papers: Vec<Paper> = papers
            .into_iter()
            .filter(|p| seen.insert(p.id.clone()))
            .collect();

        let keywords =
            KeywordExtractor::new(extractor, params.min_keyword_instances).extract(&mut papers);
        let paper_index = papers
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        let graph = CitationGraph::build(&papers);
        let storylines = graph::keyword_storylines(&papers, &graph, &keywords);
        debug!(
            papers = papers.len(),
            citations = graph.edge_count(),
            keywords = keywords.len(),
            "built citation graph"
        );

        let mut map = Self {
            params,
            focus: papers.first().map(|p| p.id.clone()),
            papers,
            paper_index,
            keywords,
            graph,
            storylines,
            sequence: Vec::new(),
            lines: Vec::new(),
            status: None,
        };
        prepare::prepare_layout(&mut map);
        map
    }

    pub fn paper(&self, id: &str) -> Option<&Paper> {
        self.paper_index.get(id).map(|&i| &self.papers[i])
    }

    /// Salient keywords of the focus paper.
    pub fn default_selection(&self) -> Vec<String> {
        self.focus
            .as_deref()
            .and_then(|id| self.paper(id))
            .map(|p| {
                p.keywords
                    .iter()
                    .filter(|k| self.keywords.contains(k))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Stem user-typed keywords and keep the salient ones.
    pub fn resolve_selection<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        let tokenizer = TitleTokenizer::new();
        let mut stems: Vec<String> = Vec::new();
        for word in words {
            let stem = tokenizer.stem(word.as_ref().trim());
            if self.keywords.contains(&stem) && !stems.contains(&stem) {
                stems.push(stem);
            }
        }
        stems
    }

    /// The keywords to lay out: the typed ones if any of them is salient,
    /// otherwise the focus paper's.
    pub fn choose_selection<S: AsRef<str>>(&self, words: Option<&[S]>) -> Vec<String> {
        let Some(words) = words else {
            return self.default_selection();
        };
        let stems = self.resolve_selection(words);
        if stems.is_empty() {
            if !words.is_empty() {
                warn!(
                    requested = words.len(),
                    "no requested keyword is salient, using the focus paper's keywords"
                );
            }
            return self.default_selection();
        }
        stems
    }

    /// Solve horizontal positions. `selection` limits which keyword lines are
    /// solved; `None` solves them all.
    pub fn solve_lanes(&mut self, solver: &dyn Solver, selection: Option<&[String]>) -> LaneReport {
        let selection: Option<HashSet<String>> = selection.map(|s| s.iter().cloned().collect());
        let report = LaneSolver::new(solver, self.params.straight_weight)
            .solve(&self.lines, selection.as_ref());
        lanes::apply_positions(self, &report.anchors, selection.as_ref());
        self.status = Some(report.status);
        report
    }

    pub fn post_layout(&mut self, filters: &ViewFilters) -> ViewSummary {
        post::post_layout(self, filters)
    }

    /// Colors of the drawn lines passing through `pid`, in keyword order.
    pub fn incident_colors(&self, pid: &str) -> Vec<String> {
        self.lines
            .iter()
            .filter(|line| line.touches(pid))
            .filter_map(|line| self.keywords.get(&line.keyword)?.color.clone())
            .collect()
    }

    /// Keywords whose drawn segment through `pid` has more than
    /// `min_keyword_highlight` stops.
    pub fn highlighted_keywords(&self, pid: &str) -> Vec<String> {
        let min = self.params.min_keyword_highlight;
        self.lines
            .iter()
            .filter(|line| {
                line.segments
                    .iter()
                    .any(|s| s.len() > min && s.iter().any(|p| p.pid == pid))
            })
            .map(|line| line.keyword.clone())
            .collect()
    }

    /// One summary per salient keyword. Stems in `selection` sort first, the
    /// rest follow `sort`.
    pub fn keyword_summaries(
        &self,
        sort: KeywordSort,
        selection: &[String],
    ) -> Vec<KeywordSummary> {
        let mut summaries: Vec<KeywordSummary> = self
            .keywords
            .iter()
            .map(|(stem, keyword)| KeywordSummary {
                keyword: stem.to_string(),
                example: keyword.example().map(str::to_string),
                papers: self
                    .papers
                    .iter()
                    .filter(|p| p.keywords.iter().any(|k| k == stem))
                    .count(),
                lines: self
                    .lines
                    .iter()
                    .find(|l| l.keyword == stem)
                    .map(|l| l.segments.iter().filter(|s| s.len() > 1).count())
                    .unwrap_or(0),
                color: keyword.color.clone(),
                selected: selection.iter().any(|s| s == stem),
            })
            .collect();
        summaries.sort_by(|a, b| {
            b.selected.cmp(&a.selected).then_with(|| match sort {
                KeywordSort::Count => b.papers.cmp(&a.papers),
                KeywordSort::Alphabetical => a.keyword.cmp(&b.keyword),
                KeywordSort::Lines => b.lines.cmp(&a.lines),
            })
        });
        summaries
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_map.rs"]
mod tests;
