//! Layout preparation: keyword offsets, sequence order, row geometry,
//! line colors and the edge skeleton handed to the lane solver.
//!
//! Nothing is solved here.

use std::collections::HashMap;

use tracing::warn;

use super::StoryMap;
use super::graph::CitationGraph;
use super::types::{EdgePoint, KeywordLine, KeywordTable, PALETTE, Paper, Storyline};
use crate::config::LayoutParams;
use crate::text::TitleTokenizer;

// ─── Keyword offsets ──────────────────────────────────────────────────────────

/// Record, for each of a paper's keywords, the char offset of the first title
/// word with that stem. Keywords missing from the table get no offset.
pub fn compute_keyword_offsets(papers: &mut [Paper], keywords: &KeywordTable) {
    let tokenizer = TitleTokenizer::new();
    for paper in papers.iter_mut() {
        let tokens = tokenizer.tokenize(&paper.title);
        paper.keyword_offsets.clear();
        for keyword in &paper.keywords {
            if !keywords.contains(keyword) {
                warn!(paper = %paper.id, keyword = %keyword, "keyword missing from salience table");
                continue;
            }
            if let Some(token) = tokens.iter().find(|t| &t.stem == keyword) {
                paper.keyword_offsets.insert(keyword.clone(), token.offset);
            }
        }
    }
}

// ─── Sequence order ───────────────────────────────────────────────────────────

/// Total order of papers (input positions): ascending year, and within a year
/// a citing paper comes after the papers it cites. Otherwise input order holds.
pub fn sequence_order(papers: &[Paper], graph: &CitationGraph) -> Vec<usize> {
    let mut by_year: Vec<usize> = (0..papers.len()).collect();
    by_year.sort_by_key(|&i| papers[i].year);

    let mut order = Vec::with_capacity(papers.len());
    for run in by_year.chunk_by(|&a, &b| papers[a].year == papers[b].year) {
        order.extend(order_by_citation(run, papers, graph));
    }
    order
}

/// Stable topological order of one same-year run. On a citation cycle the
/// earliest remaining paper is taken.
fn order_by_citation(run: &[usize], papers: &[Paper], graph: &CitationGraph) -> Vec<usize> {
    let mut pending: Vec<usize> = run.to_vec();
    let mut placed = Vec::with_capacity(run.len());
    while !pending.is_empty() {
        let ready = pending
            .iter()
            .position(|&i| {
                !pending
                    .iter()
                    .any(|&j| j != i && graph.cites(&papers[i].id, &papers[j].id))
            })
            .unwrap_or(0);
        placed.push(pending.remove(ready));
    }
    placed
}

// ─── Row geometry ─────────────────────────────────────────────────────────────

/// Give each paper its sequence index and nominal row width.
pub fn assign_geometry(papers: &mut [Paper], order: &[usize], params: &LayoutParams) {
    for (index, &i) in order.iter().enumerate() {
        let paper = &mut papers[i];
        paper.index = index;
        let year_len = paper.year.to_string().len() + 3;
        let citation_len = paper.citation_count.to_string().len() + 3;
        paper.layout.x = 0.0;
        paper.layout.year_len = year_len;
        paper.layout.citation_len = citation_len;
        paper.layout.width =
            (year_len + paper.title.chars().count() + citation_len) as f64 * params.char_width;
    }
}

/// Re-sort every storyline component by year, then sequence index, once the
/// indices are known.
pub fn order_components(
    storylines: &mut [Storyline],
    papers: &[Paper],
    paper_index: &HashMap<String, usize>,
) {
    for component in storylines.iter_mut().flat_map(|s| s.components.iter_mut()) {
        component.sort_by_key(|id| {
            paper_index
                .get(id)
                .map(|&i| (papers[i].year, papers[i].index))
                .unwrap_or((i32::MAX, usize::MAX))
        });
    }
}

// ─── Colors ───────────────────────────────────────────────────────────────────

/// Cyclic palette cursor. Starts past the reserved slots.
pub struct ColorCycle {
    counter: usize,
}

impl ColorCycle {
    pub fn new(offset: usize) -> Self {
        Self { counter: offset }
    }

    pub fn next_color(&mut self) -> &'static str {
        let color = PALETTE[self.counter % PALETTE.len()];
        self.counter += 1;
        color
    }
}

// ─── Edge skeleton ────────────────────────────────────────────────────────────

/// Turn storylines into drawable lines. Components longer than `min_stops`
/// become segments ordered by sequence index; each keyword with at least one
/// segment takes the next palette color, and every paper on a segment is
/// marked as having an edge.
pub fn build_lines(
    papers: &mut [Paper],
    paper_index: &HashMap<String, usize>,
    storylines: &[Storyline],
    keywords: &mut KeywordTable,
    params: &LayoutParams,
) -> Vec<KeywordLine> {
    let mut colors = ColorCycle::new(params.palette_offset);
    let mut lines = Vec::with_capacity(storylines.len());

    for storyline in storylines {
        let mut segments = Vec::new();
        for component in &storyline.components {
            if component.len() <= params.min_stops {
                continue;
            }
            let mut members: Vec<usize> = component
                .iter()
                .filter_map(|id| paper_index.get(id).copied())
                .collect();
            members.sort_by_key(|&i| papers[i].index);

            let points: Vec<EdgePoint> = members
                .iter()
                .filter_map(|&i| {
                    let paper = &papers[i];
                    let offset = *paper.keyword_offsets.get(&storyline.keyword)?;
                    Some(EdgePoint {
                        x: (offset + paper.layout.year_len + 1) as f64 * params.char_width,
                        pid: paper.id.clone(),
                    })
                })
                .collect();
            if points.is_empty() {
                continue;
            }
            for point in &points {
                papers[paper_index[&point.pid]].has_edge = true;
            }
            segments.push(points);
        }

        if !segments.is_empty() {
            if let Some(keyword) = keywords.get_mut(&storyline.keyword) {
                keyword.color = Some(colors.next_color().to_string());
            }
        }
        lines.push(KeywordLine {
            keyword: storyline.keyword.clone(),
            segments,
        });
    }
    lines
}

/// Run every preparation step on a map whose keywords and storylines are set.
pub fn prepare_layout(map: &mut StoryMap) {
    compute_keyword_offsets(&mut map.papers, &map.keywords);

    let order = sequence_order(&map.papers, &map.graph);
    assign_geometry(&mut map.papers, &order, &map.params);
    map.sequence = order.iter().map(|&i| map.papers[i].id.clone()).collect();
    order_components(&mut map.storylines, &map.papers, &map.paper_index);

    for paper in map.papers.iter_mut() {
        paper.has_edge = false;
    }
    map.lines = build_lines(
        &mut map.papers,
        &map.paper_index,
        &map.storylines,
        &mut map.keywords,
        &map.params,
    );
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_prepare.rs"]
mod tests;
