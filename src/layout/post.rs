//! PostLayout: visibility, vertical stacking, bounds and year bands.
//!
//! Re-run whenever the view filters change; it never touches the solver and
//! applying it twice with the same filters gives the same result.

use serde::Serialize;

use super::StoryMap;
use super::types::{ExcerptKind, Paper};
use crate::config::{LayoutParams, ViewFilters};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// `[x, y, width, height]` with a 10% margin (both margins scale with width).
    pub fn view_box(&self) -> [f64; 4] {
        let w = self.width();
        [
            self.min_x - w * 0.1,
            self.min_y - w * 0.1,
            w * 1.2,
            self.height() * 1.2,
        ]
    }
}

/// A maximal run of visible, sequence-ordered papers from the same year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearBand {
    pub year: i32,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSummary {
    /// `None` when nothing is visible.
    pub bounds: Option<Bounds>,
    pub view_box: Option<[f64; 4]>,
    pub year_bands: Vec<YearBand>,
    pub max_citations: u32,
    pub visible: usize,
}

pub fn post_layout(map: &mut StoryMap, filters: &ViewFilters) -> ViewSummary {
    apply_visibility(map, filters);
    if filters.show_excerpts {
        attach_excerpts(map);
        stack_with_excerpts(map);
    } else {
        for paper in map.papers.iter_mut() {
            paper.excerpts.clear();
            paper.excerpt_kind = None;
        }
        stack_rows(map);
    }

    let bounds = compute_bounds(&map.papers, &map.params, filters.show_excerpts);
    ViewSummary {
        bounds,
        view_box: bounds.map(|b| b.view_box()),
        year_bands: year_bands(map),
        max_citations: map.papers.iter().map(|p| p.citation_count).max().unwrap_or(0),
        visible: map.papers.iter().filter(|p| !p.hidden).count(),
    }
}

fn apply_visibility(map: &mut StoryMap, filters: &ViewFilters) {
    let max_x = map.params.max_x;
    for paper in map.papers.iter_mut() {
        paper.hidden = (filters.hide_unmapped && paper.unmapped)
            || paper.citation_count < filters.min_citations;
        // Keep runaway layouts on the canvas.
        if paper.layout.x != 0.0 {
            paper.layout.x = paper.layout.x.min(max_x);
        }
    }
}

/// Visible rows stacked at a fixed pitch; hidden rows take no space.
fn stack_rows(map: &mut StoryMap) {
    let pitch = map.params.char_height + map.params.y_space;
    let mut row = 0;
    for id in &map.sequence {
        let paper = &mut map.papers[map.paper_index[id]];
        if !paper.hidden {
            paper.layout.y = row as f64 * pitch;
            row += 1;
        }
    }
}

/// Visible rows stacked with room below each for its excerpt lines.
fn stack_with_excerpts(map: &mut StoryMap) {
    let params = &map.params;
    let mut y = 0.0;
    for id in &map.sequence {
        let paper = &mut map.papers[map.paper_index[id]];
        if paper.hidden {
            continue;
        }
        paper.layout.y = y;
        y += params.char_height;
        if !paper.excerpts.is_empty() {
            y += params.excerpt_lead_pad + params.excerpt_char_height * paper.excerpts.len() as f64;
        }
        y += params.y_space;
    }
}

fn truncate_excerpt(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let head: String = text.chars().take(limit).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Attach citation contexts linking each visible paper to the focus paper.
fn attach_excerpts(map: &mut StoryMap) {
    let limit = map.params.excerpt_length;
    let focus = map
        .focus
        .as_ref()
        .and_then(|id| map.paper_index.get(id))
        .map(|&i| (map.papers[i].id.clone(), map.papers[i].citation_contexts.clone()));

    for paper in map.papers.iter_mut() {
        paper.excerpts.clear();
        paper.excerpt_kind = None;
        let Some((focus_id, focus_contexts)) = &focus else {
            continue;
        };
        if paper.hidden {
            continue;
        }
        let (contexts, kind) = if let Some(c) = focus_contexts.get(&paper.id) {
            (c, ExcerptKind::CitedByFocus)
        } else if let Some(c) = paper.citation_contexts.get(focus_id) {
            (c, ExcerptKind::CitesFocus)
        } else {
            continue;
        };
        let excerpts: Vec<String> = contexts.iter().map(|e| truncate_excerpt(e, limit)).collect();
        paper.excerpts = excerpts;
        paper.excerpt_kind = Some(kind);
    }
}

/// Extent of the visible papers. Right-aligned rows extend left of their x.
pub fn compute_bounds(papers: &[Paper], params: &LayoutParams, show_excerpts: bool) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;
    for paper in papers.iter().filter(|p| !p.hidden) {
        let l = &paper.layout;
        let left = l.x - if l.right_align { l.width } else { 0.0 };
        let mut right = l.x + if l.right_align { 0.0 } else { l.width };
        if show_excerpts {
            for e in &paper.excerpts {
                right = right.max(l.x + (e.chars().count() + 6) as f64 * params.excerpt_char_width);
            }
        }
        let bottom = l.y + params.y_space;
        bounds = Some(match bounds {
            None => Bounds {
                min_x: left,
                min_y: l.y,
                max_x: right,
                max_y: bottom,
            },
            Some(b) => Bounds {
                min_x: b.min_x.min(left),
                min_y: b.min_y.min(l.y),
                max_x: b.max_x.max(right),
                max_y: b.max_y.max(bottom),
            },
        });
    }
    bounds
}

pub fn year_bands(map: &StoryMap) -> Vec<YearBand> {
    let mut bands: Vec<YearBand> = Vec::new();
    for id in &map.sequence {
        let paper = &map.papers[map.paper_index[id]];
        if paper.hidden {
            continue;
        }
        match bands.last_mut() {
            Some(band) if band.year == paper.year => band.end = paper.id.clone(),
            _ => bands.push(YearBand {
                year: paper.year,
                start: paper.id.clone(),
                end: paper.id.clone(),
            }),
        }
    }
    bands
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_post.rs"]
mod tests;
