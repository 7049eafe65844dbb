//! Pure-Rust solver backed by good_lp's microlp backend.

use std::collections::HashMap;

use good_lp::solvers::microlp::microlp;
use good_lp::{
    Expression, ProblemVariables, ResolutionError, Solution as LpSolution, SolverModel, Variable,
    constraint, variable,
};
use tracing::debug;

use super::model::{Bound, Direction, LayoutModel};
use super::{Solution, SolveStatus, Solver};
use crate::error::LayoutError;

/// Continuous variables are bounded below by zero; variables in the model's
/// integer set are binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Solver for MicroLpSolver {
    fn solve(&self, model: &LayoutModel) -> Result<Solution, LayoutError> {
        let mut vars = ProblemVariables::new();
        let mut handles: Vec<(&str, Variable)> = Vec::with_capacity(model.variables.len());
        for name in model.variables.keys() {
            let def = if model.ints.contains(name) {
                variable().binary()
            } else {
                variable().min(0.0)
            };
            handles.push((name.as_str(), vars.add(def)));
        }

        let mut objective: Expression = 0.into();
        let mut rows: HashMap<&str, Expression> = HashMap::new();
        for (name, var) in &handles {
            for (row, &coef) in &model.variables[*name] {
                if *row == model.optimize {
                    objective += coef * *var;
                } else if model.constraints.contains_key(row) {
                    *rows.entry(row.as_str()).or_insert_with(|| 0.into()) += coef * *var;
                }
            }
        }

        let mut constraints = Vec::with_capacity(model.constraints.len());
        for (name, bound) in &model.constraints {
            match rows.remove(name.as_str()) {
                Some(lhs) => constraints.push(match *bound {
                    Bound::Max(v) => constraint::leq(lhs, v),
                    Bound::Min(v) => constraint::geq(lhs, v),
                }),
                // Constant row: nothing to optimise, only to check.
                None if bound.admits(0.0) => {}
                None => {
                    debug!(constraint = %name, "constant constraint violated");
                    return Ok(Solution::with_status(SolveStatus::Infeasible));
                }
            }
        }

        let mut problem = match model.op_type {
            Direction::Min => vars.minimise(objective).using(microlp),
            Direction::Max => vars.maximise(objective).using(microlp),
        };
        for c in constraints {
            problem.add_constraint(c);
        }

        match problem.solve() {
            Ok(solution) => {
                let values = handles
                    .iter()
                    .map(|(name, var)| (name.to_string(), solution.value(*var)))
                    .filter(|(_, v)| v.is_finite())
                    .collect();
                Ok(Solution {
                    status: SolveStatus::Optimal,
                    values,
                })
            }
            Err(ResolutionError::Infeasible) => Ok(Solution::with_status(SolveStatus::Infeasible)),
            Err(ResolutionError::Unbounded) => Ok(Solution::with_status(SolveStatus::Unbounded)),
            Err(e) => Err(LayoutError::Solver(e.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_solver_microlp.rs"]
mod tests;
