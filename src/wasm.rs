//! WASM bindings for paper-lanes.
//!
//! Exposes `layoutPapers` to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::solver::MicroLpSolver;
use crate::{LayoutParams, LayoutRequest, Paper, compute_layout};

/// Lay out a JSON array of papers.
///
/// - `papers_json`: paper records, focus paper first
/// - `request_json`: `{"keywords": [...], "all_keywords": false,
///   "keyword_sort": "count" | "az" | "lines", "filters": {...}}`, or empty
///   for defaults
///
/// Returns the layout as JSON.
#[wasm_bindgen(js_name = "layoutPapers")]
pub fn layout_papers(papers_json: &str, request_json: &str) -> Result<String, JsError> {
    let papers: Vec<Paper> = serde_json::from_str(papers_json)?;
    let request: LayoutRequest = if request_json.trim().is_empty() {
        LayoutRequest::default()
    } else {
        serde_json::from_str(request_json)?
    };
    let output = compute_layout(papers, LayoutParams::default(), &request, &MicroLpSolver);
    Ok(serde_json::to_string(&output)?)
}
