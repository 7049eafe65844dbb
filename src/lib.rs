//! paper-lanes: storyline ("subway map") layout for citation graphs.
//!
//! Each paper is a row ordered by year and citation topology; each salient
//! title keyword becomes a near-straight line through the papers carrying it.
//!
//! Public API: [`compute_layout`] for a one-shot run, or [`StoryMap`] to keep
//! the solved map around and re-filter it.

pub mod config;
pub mod error;
pub mod layout;
pub mod solver;
pub mod source;
pub mod text;

#[cfg(feature = "wasm")]
pub mod wasm;

use serde::{Deserialize, Serialize};

pub use crate::config::{LayoutParams, ViewFilters};
pub use crate::error::LayoutError;
pub use crate::layout::{KeywordSort, KeywordSummary, StoryMap};
pub use crate::layout::types::{KeywordLine, Paper};
use crate::layout::{Bounds, LayoutQuality, YearBand};
use crate::solver::{SolveStatus, Solver};
use crate::text::StopWordExtractor;

/// What to solve and how to show it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutRequest {
    /// Keywords (as typed; stemmed before use) whose lines are solved.
    /// `None`, or a list where nothing resolves, selects the focus paper's
    /// keywords.
    pub keywords: Option<Vec<String>>,
    /// Solve every keyword line and ignore `keywords`.
    pub all_keywords: bool,
    pub keyword_sort: KeywordSort,
    pub filters: ViewFilters,
}

/// Per-paper result handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedPaper {
    pub id: String,
    pub year: i32,
    pub title: String,
    pub citation_count: u32,
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub hidden: bool,
    pub unmapped: bool,
    pub keyword_offsets: std::collections::BTreeMap<String, usize>,
    /// Colors of the drawn lines passing through this paper.
    pub colors: Vec<String>,
    /// Keywords with a long enough run through this paper to be emphasised.
    pub highlighted: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub excerpts: Vec<String>,
}

/// Everything a renderer needs: positions, lines, bands and bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutOutput {
    pub status: SolveStatus,
    pub quality: LayoutQuality,
    pub message: &'static str,
    pub objective: f64,
    pub selection: Vec<String>,
    pub papers: Vec<PlacedPaper>,
    pub lines: Vec<KeywordLine>,
    pub keywords: Vec<KeywordSummary>,
    pub year_bands: Vec<YearBand>,
    pub bounds: Option<Bounds>,
    pub view_box: Option<[f64; 4]>,
    pub max_citations: u32,
    pub line_thickness: f64,
}

/// Run the whole pipeline on `papers` (the first one is the focus).
pub fn compute_layout(
    papers: Vec<Paper>,
    params: LayoutParams,
    request: &LayoutRequest,
    solver: &dyn Solver,
) -> LayoutOutput {
    let extractor = StopWordExtractor::english();
    let mut map = StoryMap::build(papers, params, &extractor);

    let selection = if request.all_keywords {
        None
    } else {
        Some(map.choose_selection(request.keywords.as_deref()))
    };
    let report = map.solve_lanes(solver, selection.as_deref());
    let view = map.post_layout(&request.filters);

    let placed = map
        .sequence
        .iter()
        .filter_map(|id| map.paper(id))
        .map(|p| PlacedPaper {
            id: p.id.clone(),
            year: p.year,
            title: p.title.clone(),
            citation_count: p.citation_count,
            index: p.index,
            x: p.layout.x,
            y: p.layout.y,
            width: p.layout.width,
            hidden: p.hidden,
            unmapped: p.unmapped,
            keyword_offsets: p.keyword_offsets.clone(),
            colors: map.incident_colors(&p.id),
            highlighted: map.highlighted_keywords(&p.id),
            excerpts: p.excerpts.clone(),
        })
        .collect();

    let selection =
        selection.unwrap_or_else(|| map.keywords.stems().map(str::to_string).collect());
    let quality = report.quality();
    LayoutOutput {
        status: report.status,
        quality,
        message: quality.message(),
        objective: report.objective,
        keywords: map.keyword_summaries(request.keyword_sort, &selection),
        selection,
        papers: placed,
        lines: map.lines.clone(),
        year_bands: view.year_bands,
        bounds: view.bounds,
        view_box: view.view_box,
        max_citations: view.max_citations,
        line_thickness: map.params.line_thickness,
    }
}
