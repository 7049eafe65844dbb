//! Lane solver: horizontal positions for every paper.
//!
//! Keyword lines are solved one at a time, most points first (ties keep
//! keyword order). Each line gets a fresh LP whose variables are the
//! positions of its papers that are not anchored yet; anchored papers enter
//! the constraint bounds as constants. After a line is solved, every paper it
//! placed is anchored and never moves again.
//!
//! For consecutive points `prev`, `curr` on a segment the model carries
//!
//! ```text
//!   (x_curr + off_curr) - (x_prev + off_prev) <= J
//!   (x_prev + off_prev) - (x_curr + off_curr) <= J
//! ```
//!
//! with `J >= 0` weighted into the objective, i.e. it minimises the total
//! absolute skew along the line.
//!
//! Line order is a heuristic: longer lines claim their papers first.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::StoryMap;
use super::types::{EdgePoint, KeywordLine, UNMAPPED_X};
use crate::solver::{Bound, LayoutModel, SolveStatus, Solver};

// ─── Anchors ──────────────────────────────────────────────────────────────────

/// Positions fixed by already-solved lines. Grows monotonically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorSet {
    positions: HashMap<String, f64>,
}

impl AnchorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor `pid` at `x` unless it is already anchored. Returns whether the
    /// anchor was added.
    pub fn anchor(&mut self, pid: &str, x: f64) -> bool {
        if self.positions.contains_key(pid) {
            return false;
        }
        self.positions.insert(pid.to_string(), x);
        true
    }

    pub fn get(&self, pid: &str) -> Option<f64> {
        self.positions.get(pid).copied()
    }

    pub fn contains(&self, pid: &str) -> bool {
        self.positions.contains_key(pid)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Smallest strictly positive anchored position.
    pub fn min_positive(&self) -> Option<f64> {
        self.positions
            .values()
            .copied()
            .filter(|&x| x > 0.0)
            .min_by(f64::total_cmp)
    }
}

// ─── Model construction ───────────────────────────────────────────────────────

pub fn position_var(pid: &str) -> String {
    format!("x:{pid}")
}

fn skew_var(constraint: &str) -> String {
    format!("skew:{constraint}")
}

/// Build the skew model for one keyword line against the current anchors.
/// Pairs whose papers are both anchored contribute nothing.
///
/// Position variables are bounded below by 0 in [`MicroLpSolver`], so a line
/// that would need a paper left of 0 relative to its anchors takes the skew
/// instead of going straight.
///
/// [`MicroLpSolver`]: crate::solver::MicroLpSolver
pub fn build_line_model(line: &KeywordLine, anchors: &AnchorSet, weight: f64) -> LayoutModel {
    let mut model = LayoutModel::new();
    for (j, segment) in line.segments.iter().enumerate() {
        for (i, pair) in segment.windows(2).enumerate() {
            let (prev, curr) = (&pair[0], &pair[1]);
            if anchors.contains(&prev.pid) && anchors.contains(&curr.pid) {
                continue;
            }
            let base = format!("{}[{}]:{}", line.keyword, j, i + 1);
            // pos: x_curr - x_prev - J <= off_prev - off_curr
            add_skew_row(
                &mut model,
                &format!("{base}:pos"),
                [(1.0, curr), (-1.0, prev)],
                prev.x - curr.x,
                anchors,
                weight,
            );
            // neg: x_prev - x_curr - J <= off_curr - off_prev
            add_skew_row(
                &mut model,
                &format!("{base}:neg"),
                [(1.0, prev), (-1.0, curr)],
                curr.x - prev.x,
                anchors,
                weight,
            );
        }
    }
    model
}

fn add_skew_row(
    model: &mut LayoutModel,
    name: &str,
    terms: [(f64, &EdgePoint); 2],
    rhs: f64,
    anchors: &AnchorSet,
    weight: f64,
) {
    let mut bound = rhs;
    for (coef, point) in terms {
        match anchors.get(&point.pid) {
            Some(x) => bound -= coef * x,
            None => model.add_coefficient(&position_var(&point.pid), name, coef),
        }
    }
    let skew = skew_var(name);
    model.add_coefficient(&skew, name, -1.0);
    model.add_objective_term(&skew, weight);
    model.add_constraint(name, Bound::Max(bound));
}

// ─── Solving ──────────────────────────────────────────────────────────────────

/// Overall layout quality as shown to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LayoutQuality {
    #[serde(rename = "Best Layout")]
    Best,
    #[serde(rename = "Too Complex")]
    TooComplex,
}

impl LayoutQuality {
    pub fn message(self) -> &'static str {
        match self {
            LayoutQuality::Best => "Best Layout",
            LayoutQuality::TooComplex => "Too Complex",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineReport {
    pub keyword: String,
    pub variables: usize,
    pub constraints: usize,
    pub status: Option<SolveStatus>,
    pub objective: f64,
}

/// Outcome of one lane-solver run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneReport {
    /// Optimal, or the last non-optimal status any line reported.
    pub status: SolveStatus,
    pub objective: f64,
    pub lines: Vec<LineReport>,
    #[serde(skip)]
    pub anchors: AnchorSet,
}

impl LaneReport {
    pub fn quality(&self) -> LayoutQuality {
        if self.status.is_optimal() {
            LayoutQuality::Best
        } else {
            LayoutQuality::TooComplex
        }
    }
}

/// Per-run accumulator threaded through the line fold.
struct LaneContext {
    anchors: AnchorSet,
    status: SolveStatus,
    objective: f64,
    lines: Vec<LineReport>,
}

pub struct LaneSolver<'a> {
    solver: &'a dyn Solver,
    weight: f64,
}

impl<'a> LaneSolver<'a> {
    pub fn new(solver: &'a dyn Solver, weight: f64) -> Self {
        Self { solver, weight }
    }

    /// Lines to solve, longest first. `selection` restricts to those stems.
    pub fn line_order<'l>(
        lines: &'l [KeywordLine],
        selection: Option<&HashSet<String>>,
    ) -> Vec<&'l KeywordLine> {
        let mut ordered: Vec<&KeywordLine> = lines
            .iter()
            .filter(|l| selection.is_none_or(|s| s.contains(&l.keyword)))
            .filter(|l| l.point_count() > 0)
            .collect();
        ordered.sort_by_key(|l| Reverse(l.point_count()));
        ordered
    }

    /// Solve all (selected) lines and return the anchors they produced.
    pub fn solve(
        &self,
        lines: &[KeywordLine],
        selection: Option<&HashSet<String>>,
    ) -> LaneReport {
        let ctx = Self::line_order(lines, selection).into_iter().fold(
            LaneContext {
                anchors: AnchorSet::new(),
                status: SolveStatus::Optimal,
                objective: 0.0,
                lines: Vec::new(),
            },
            |ctx, line| self.solve_line(ctx, line),
        );
        info!(
            lines = ctx.lines.len(),
            anchored = ctx.anchors.len(),
            status = %ctx.status,
            "lane layout solved"
        );
        LaneReport {
            status: ctx.status,
            objective: ctx.objective,
            lines: ctx.lines,
            anchors: ctx.anchors,
        }
    }

    fn solve_line(&self, mut ctx: LaneContext, line: &KeywordLine) -> LaneContext {
        let model = build_line_model(line, &ctx.anchors, self.weight);
        let mut report = LineReport {
            keyword: line.keyword.clone(),
            variables: model.variables.len(),
            constraints: model.constraints.len(),
            status: None,
            objective: 0.0,
        };
        if model.is_empty() {
            debug!(keyword = %line.keyword, "line has nothing left to solve");
            ctx.lines.push(report);
            return ctx;
        }

        let solution = match self.solver.solve(&model) {
            Ok(solution) => solution,
            Err(e) => {
                warn!(keyword = %line.keyword, error = %e, "solver call failed");
                ctx.status = SolveStatus::NotSolved;
                report.status = Some(SolveStatus::NotSolved);
                ctx.lines.push(report);
                return ctx;
            }
        };
        debug!(
            keyword = %line.keyword,
            variables = report.variables,
            constraints = report.constraints,
            status = %solution.status,
            "solved keyword line"
        );
        if !solution.status.is_optimal() {
            warn!(keyword = %line.keyword, status = %solution.status, "keyword line not optimal");
            ctx.status = solution.status;
        }

        report.status = Some(solution.status);
        report.objective = model.objective_value(&solution.values);
        ctx.objective += report.objective;

        for point in line.segments.iter().flatten() {
            if let Some(x) = solution.value(&position_var(&point.pid)) {
                ctx.anchors.anchor(&point.pid, x);
            }
        }
        ctx.lines.push(report);
        ctx
    }
}

/// Write solved positions back onto the map's papers.
///
/// Anchored papers are shifted so the smallest positive anchor sits at 0.
/// Unanchored papers go to [`UNMAPPED_X`]; they are flagged unmapped unless
/// they carry a selected keyword.
pub fn apply_positions(
    map: &mut StoryMap,
    anchors: &AnchorSet,
    selection: Option<&HashSet<String>>,
) {
    let shift = anchors.min_positive().unwrap_or(0.0);
    for paper in map.papers.iter_mut() {
        match anchors.get(&paper.id) {
            Some(x) => {
                paper.layout.x = x - shift;
                paper.unmapped = false;
            }
            None => {
                paper.layout.x = UNMAPPED_X;
                let selected = match selection {
                    Some(s) => paper.keywords.iter().any(|k| s.contains(k)),
                    None => !paper.keywords.is_empty(),
                };
                paper.unmapped = !selected;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_lanes.rs"]
mod tests;
