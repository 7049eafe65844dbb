//! Layout parameters and view filters.
//!
//! `LayoutParams` holds every tunable of the pipeline. Character metrics are
//! derived from a single monospace character width, see
//! [`LayoutParams::with_char_width`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Pixel width of one title character when nothing else is known
/// (12px Roboto Mono).
pub const DEFAULT_CHAR_WIDTH: f64 = 7.2;

/// Configuration for the layout pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// A component is drawn only when it has more papers than this.
    pub min_stops: usize,
    /// A paper's keyword is highlighted when one of its segments through the
    /// paper has more stops than this.
    pub min_keyword_highlight: usize,
    /// A keyword is salient when its occurrence count exceeds this.
    pub min_keyword_instances: usize,
    /// Cap on records requested from the paper source per call.
    pub max_get_count: usize,
    /// Vertical spacing between titles.
    pub y_space: f64,
    /// Positions beyond this are clamped by PostLayout.
    pub max_x: f64,
    pub char_width: f64,
    pub char_height: f64,
    pub excerpt_lead_pad: f64,
    pub excerpt_char_width: f64,
    pub excerpt_char_height: f64,
    /// Excerpts longer than this many characters are truncated.
    pub excerpt_length: usize,
    /// Stroke width handed to renderers with the layout.
    pub line_thickness: f64,
    /// Objective weight of every skew variable.
    pub straight_weight: f64,
    /// First palette slot handed out; earlier slots are reserved.
    pub palette_offset: usize,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            min_stops: 0,
            min_keyword_highlight: 1,
            min_keyword_instances: 0,
            max_get_count: 100,
            y_space: 0.0,
            max_x: 5000.0,
            char_width: 0.0,
            char_height: 0.0,
            excerpt_lead_pad: 0.0,
            excerpt_char_width: 0.0,
            excerpt_char_height: 0.0,
            excerpt_length: 150,
            line_thickness: 8.0,
            straight_weight: 1.0,
            palette_offset: 4,
        }
        .with_char_width(DEFAULT_CHAR_WIDTH)
    }
}

impl LayoutParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the character width and recompute every metric derived from it.
    pub fn with_char_width(mut self, char_width: f64) -> Self {
        self.char_width = char_width;
        self.char_height = char_width * 3.0;
        self.y_space = self.char_height / 2.0;
        self.excerpt_char_width = char_width * 10.0 / 12.0;
        self.excerpt_char_height = self.excerpt_char_width * 3.0;
        self.excerpt_lead_pad = self.excerpt_char_height / 4.0;
        self
    }

    /// Parse params from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        let params: Self = serde_json::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, LayoutError> {
        let text = fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.char_width.is_finite() && self.char_width > 0.0) {
            return Err(LayoutError::Config(format!(
                "char_width must be positive, got {}",
                self.char_width
            )));
        }
        if self.straight_weight < 0.0 {
            return Err(LayoutError::Config(
                "straight_weight must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Visibility filters applied by PostLayout. Changing them never re-solves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewFilters {
    /// Papers cited fewer times than this are hidden.
    pub min_citations: u32,
    /// Hide papers the solver could not place.
    pub hide_unmapped: bool,
    /// Attach citation-context excerpts and leave room for them.
    pub show_excerpts: bool,
}

#[cfg(test)]
#[path = "../tests/rust/test_config.rs"]
mod tests;
