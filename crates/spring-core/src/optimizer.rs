// ─────────────────────────────────────────────────────────────────────
// Spiral Spring Core — Optimizer Contract
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Seam between the spring problem and any bounded, constrained minimizer.
//!
//! A problem exposes a box, an objective and two constraint lists over a
//! flat `&[f64]` vector. Inequalities are satisfied at `>= 0`, equalities
//! at `0` within the optimizer's own tolerance.

use serde::Serialize;
use spring_types::error::SpringResult;
use std::fmt;

/// Objective and constraint values at one point.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub objective: f64,
    pub inequalities: Vec<f64>,
    pub equalities: Vec<f64>,
}

impl Evaluation {
    pub fn is_feasible(&self, equality_tolerance: f64) -> bool {
        self.inequalities.iter().all(|&g| g >= 0.0)
            && self.equalities.iter().all(|&h| h.abs() <= equality_tolerance)
    }
}

/// A bounded minimization problem with inequality and equality constraints.
///
/// `Sync` so optimizers may evaluate a population in parallel.
pub trait ConstrainedProblem: Sync {
    fn dimension(&self) -> usize;

    /// Lower and upper box corners, each `dimension()` long.
    fn bounds(&self) -> (Vec<f64>, Vec<f64>);

    fn objective(&self, x: &[f64]) -> f64;

    fn inequality_constraints(&self, x: &[f64]) -> Vec<f64>;

    fn equality_constraints(&self, x: &[f64]) -> Vec<f64>;

    fn evaluate(&self, x: &[f64]) -> Evaluation {
        Evaluation {
            objective: self.objective(x),
            inequalities: self.inequality_constraints(x),
            equalities: self.equality_constraints(x),
        }
    }
}

/// Why an optimizer stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    MaxIterations,
    MinStep,
    MinObjectiveChange,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Termination::MaxIterations => "maximum iterations reached",
            Termination::MinStep => "best position changed less than the minimum step",
            Termination::MinObjectiveChange => {
                "best objective changed less than the minimum objective change"
            }
        };
        f.write_str(s)
    }
}

/// Best feasible point found, with diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationOutcome {
    pub x: Vec<f64>,
    pub objective: f64,
    pub termination: Termination,
    pub message: String,
    pub iterations: usize,
    pub evaluations: usize,
}

/// A minimizer. Returns `ConvergenceFailure` when no feasible point was found.
pub trait Optimizer {
    fn minimize<P: ConstrainedProblem>(&self, problem: &P) -> SpringResult<OptimizationOutcome>;
}
