//! Solver collaborator interface.
//!
//! The lane solver only builds models; solving them is delegated to a
//! [`Solver`]. [`MicroLpSolver`] is the bundled pure-Rust implementation.

pub mod microlp;
pub mod model;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

pub use microlp::MicroLpSolver;
pub use model::{Bound, Direction, LayoutModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    Optimal,
    #[serde(rename = "Not Solved")]
    NotSolved,
    Infeasible,
    Unbounded,
    Undefined,
}

impl SolveStatus {
    pub fn is_optimal(self) -> bool {
        self == SolveStatus::Optimal
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "Optimal",
            SolveStatus::NotSolved => "Not Solved",
            SolveStatus::Infeasible => "Infeasible",
            SolveStatus::Unbounded => "Unbounded",
            SolveStatus::Undefined => "Undefined",
        };
        f.write_str(s)
    }
}

/// What a solver reports back: a status and the variables it could resolve.
/// Variables without a finite optimum are absent from `values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub status: SolveStatus,
    pub values: HashMap<String, f64>,
}

impl Solution {
    pub fn with_status(status: SolveStatus) -> Self {
        Self {
            status,
            values: HashMap::new(),
        }
    }

    pub fn value(&self, variable: &str) -> Option<f64> {
        self.values.get(variable).copied()
    }
}

/// Solves a [`LayoutModel`].
///
/// An `Err` means the solver could not be reached or crashed; an unsolvable
/// model is an `Ok` with a non-optimal status.
pub trait Solver {
    fn solve(&self, model: &LayoutModel) -> Result<Solution, LayoutError>;
}

impl<S: Solver + ?Sized> Solver for &S {
    fn solve(&self, model: &LayoutModel) -> Result<Solution, LayoutError> {
        (**self).solve(model)
    }
}
