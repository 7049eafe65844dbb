//! LayoutModel: the linear program handed to a solver collaborator.
//!
//! Serialized, it is the solver wire format: named constraints with a one-sided
//! bound, named variables with a sparse coefficient map into constraints (and
//! into the objective, under the objective's name), and a set of integer
//! variables.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

pub const OBJECTIVE: &str = "objective";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Min,
    Max,
}

/// One-sided bound on a constraint's left-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    /// lhs ≤ value
    Max(f64),
    /// lhs ≥ value
    Min(f64),
}

impl Bound {
    pub fn value(&self) -> f64 {
        match *self {
            Bound::Max(v) | Bound::Min(v) => v,
        }
    }

    pub fn admits(&self, lhs: f64) -> bool {
        match *self {
            Bound::Max(v) => lhs <= v,
            Bound::Min(v) => lhs >= v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutModel {
    /// Name of the objective row.
    pub optimize: String,
    #[serde(rename = "opType")]
    pub op_type: Direction,
    pub constraints: BTreeMap<String, Bound>,
    pub variables: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(default)]
    pub ints: BTreeSet<String>,
}

impl Default for LayoutModel {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutModel {
    /// An empty minimisation model.
    pub fn new() -> Self {
        Self {
            optimize: OBJECTIVE.to_string(),
            op_type: Direction::Min,
            constraints: BTreeMap::new(),
            variables: BTreeMap::new(),
            ints: BTreeSet::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn add_constraint(&mut self, name: impl Into<String>, bound: Bound) {
        self.constraints.insert(name.into(), bound);
    }

    /// Add `coefficient` to `variable`'s entry in `row` (a constraint or the
    /// objective), creating the variable if needed.
    pub fn add_coefficient(&mut self, variable: &str, row: &str, coefficient: f64) {
        *self
            .variables
            .entry(variable.to_string())
            .or_default()
            .entry(row.to_string())
            .or_insert(0.0) += coefficient;
    }

    pub fn add_objective_term(&mut self, variable: &str, weight: f64) {
        let objective = self.optimize.clone();
        self.add_coefficient(variable, &objective, weight);
    }

    pub fn mark_integer(&mut self, variable: &str) {
        self.ints.insert(variable.to_string());
    }

    pub fn has_variable(&self, variable: &str) -> bool {
        self.variables.contains_key(variable)
    }

    pub fn coefficient(&self, variable: &str, row: &str) -> Option<f64> {
        self.variables.get(variable)?.get(row).copied()
    }

    /// Terms of `row` as (variable, coefficient), in variable-name order.
    pub fn row(&self, row: &str) -> Vec<(&str, f64)> {
        self.variables
            .iter()
            .filter_map(|(var, coefs)| coefs.get(row).map(|&c| (var.as_str(), c)))
            .collect()
    }

    /// Evaluate the objective for an assignment; unassigned variables count as 0.
    pub fn objective_value(&self, values: &HashMap<String, f64>) -> f64 {
        self.row(&self.optimize)
            .into_iter()
            .map(|(var, c)| c * values.get(var).copied().unwrap_or(0.0))
            .sum()
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_solver_model.rs"]
mod tests;
