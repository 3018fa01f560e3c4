// ─────────────────────────────────────────────────────────────────────
// Spiral Spring Core — Spring Problem
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The spring design task expressed as a [`ConstrainedProblem`].

use crate::bounds::SearchBounds;
use crate::constraints::{ConstraintEvaluator, ConstraintKind};
use crate::model::Candidate;
use crate::objective::negative_stiffness;
use crate::optimizer::{ConstrainedProblem, Evaluation};
use spring_types::config::{DesignInputs, SearchOptions, Variable};

/// Maximize stiffness subject to stress and geometry limits.
///
/// The optimizer vector holds the free variables in
/// [`SearchOptions::free_variables`] order; thickness and arclength always
/// lead.
#[derive(Debug, Clone)]
pub struct SpringProblem {
    inputs: DesignInputs,
    bounds: SearchBounds,
    evaluator: ConstraintEvaluator,
    variables: Vec<Variable>,
}

impl SpringProblem {
    pub fn new(inputs: DesignInputs, bounds: SearchBounds, options: &SearchOptions) -> Self {
        let evaluator = ConstraintEvaluator::new(&inputs, options);
        let variables = options
            .free_variables()
            .into_iter()
            .filter(|v| bounds.get(*v).is_some())
            .collect();
        SpringProblem {
            inputs,
            bounds,
            evaluator,
            variables,
        }
    }

    pub fn inputs(&self) -> &DesignInputs {
        &self.inputs
    }

    pub fn search_bounds(&self) -> &SearchBounds {
        &self.bounds
    }

    pub fn evaluator(&self) -> &ConstraintEvaluator {
        &self.evaluator
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Decodes an optimizer vector. Fixed variables take their input values.
    pub fn candidate(&self, x: &[f64]) -> Candidate {
        let mut c = Candidate::new(&self.inputs, 0.0, 0.0);
        for (variable, &value) in self.variables.iter().zip(x) {
            match variable {
                Variable::Thickness => c.thickness = value,
                Variable::Arclength => c.arclength = value,
                Variable::Height => c.height = value,
                Variable::RangeOfMotion => c.range_of_motion = value,
                Variable::PreloadTorque => c.preload_torque = value,
            }
        }
        c
    }
}

impl ConstrainedProblem for SpringProblem {
    fn dimension(&self) -> usize {
        self.variables.len()
    }

    fn bounds(&self) -> (Vec<f64>, Vec<f64>) {
        self.variables
            .iter()
            .filter_map(|v| self.bounds.get(*v))
            .map(|b| (b.lower, b.upper))
            .unzip()
    }

    fn objective(&self, x: &[f64]) -> f64 {
        negative_stiffness(&self.inputs, &self.candidate(x))
    }

    fn inequality_constraints(&self, x: &[f64]) -> Vec<f64> {
        self.evaluator
            .inequalities(&self.inputs, &self.candidate(x))
    }

    fn equality_constraints(&self, x: &[f64]) -> Vec<f64> {
        self.evaluator.equalities(&self.inputs, &self.candidate(x))
    }

    /// Decodes once and runs the constraint set once, split by kind.
    fn evaluate(&self, x: &[f64]) -> Evaluation {
        let c = self.candidate(x);
        let mut inequalities = Vec::new();
        let mut equalities = Vec::new();
        for v in self.evaluator.evaluate(&self.inputs, &c) {
            match v.kind {
                ConstraintKind::Inequality => inequalities.push(v.value),
                ConstraintKind::Equality => equalities.push(v.value),
            }
        }
        Evaluation {
            objective: negative_stiffness(&self.inputs, &c),
            inequalities,
            equalities,
        }
    }
}
