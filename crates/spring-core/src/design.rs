// ─────────────────────────────────────────────────────────────────────
// Spiral Spring Core — Design Record
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Immutable snapshot of the winning design, built once after convergence.

use crate::bounds::SearchBounds;
use crate::model::{Candidate, SpringState};
use crate::optimizer::{OptimizationOutcome, Termination};
use crate::problem::SpringProblem;
use serde::Serialize;
use spring_types::error::SpringResult;

/// Optimizer diagnostics carried alongside the design.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizerReport {
    pub termination: Termination,
    pub message: String,
    pub iterations: usize,
    pub evaluations: usize,
    pub objective: f64,
}

/// Every reported quantity of one spring design.
///
/// Fields are private; the record is read through accessors and serialized
/// for reporting, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpringDesign {
    design_name: String,
    height: f64,
    thickness: f64,
    arclength: f64,
    hub_radius: f64,
    range_of_motion: f64,
    preload_torque: f64,
    safety_factor: f64,
    yield_stress: f64,
    stiffness: f64,
    rest_pitch: f64,
    revolutions: f64,
    radius_at_preload: f64,
    unutilized_elasticity: f64,
    max_preload_torque: f64,
    effective_radius: f64,
    rest_radius: f64,
    rom_at_rest: f64,
    max_stress: f64,
    torque_at_max_deflection: f64,
    profile_radius: f64,
    profile_revolutions: f64,
    bounds: SearchBounds,
    optimizer: OptimizerReport,
}

impl SpringDesign {
    /// Recomputes all derived quantities at the optimizer's winning point.
    pub fn assemble(
        design_name: impl Into<String>,
        problem: &SpringProblem,
        outcome: &OptimizationOutcome,
    ) -> SpringResult<Self> {
        let inputs = problem.inputs();
        let c: Candidate = problem.candidate(&outcome.x);
        let state = SpringState::evaluate(inputs, &c)?;
        Ok(SpringDesign {
            design_name: design_name.into(),
            height: c.height,
            thickness: c.thickness,
            arclength: c.arclength,
            hub_radius: inputs.hub_radius,
            range_of_motion: c.range_of_motion,
            preload_torque: c.preload_torque,
            safety_factor: inputs.safety_factor,
            yield_stress: inputs.yield_stress,
            stiffness: state.stiffness,
            rest_pitch: state.rest_pitch,
            revolutions: state.revolutions,
            radius_at_preload: state.radius_at_preload,
            unutilized_elasticity: state.unutilized_elasticity,
            max_preload_torque: state.max_preload_torque,
            effective_radius: state.effective_radius,
            rest_radius: state.rest_radius,
            rom_at_rest: state.rom_at_rest,
            max_stress: state.max_stress,
            torque_at_max_deflection: state.torque_at_max_deflection,
            profile_radius: state.profile_radius,
            profile_revolutions: state.profile_revolutions,
            bounds: problem.search_bounds().clone(),
            optimizer: OptimizerReport {
                termination: outcome.termination,
                message: outcome.message.clone(),
                iterations: outcome.iterations,
                evaluations: outcome.evaluations,
                objective: outcome.objective,
            },
        })
    }

    pub fn design_name(&self) -> &str {
        &self.design_name
    }
    pub fn height(&self) -> f64 {
        self.height
    }
    pub fn thickness(&self) -> f64 {
        self.thickness
    }
    pub fn arclength(&self) -> f64 {
        self.arclength
    }
    pub fn hub_radius(&self) -> f64 {
        self.hub_radius
    }
    pub fn range_of_motion(&self) -> f64 {
        self.range_of_motion
    }
    pub fn preload_torque(&self) -> f64 {
        self.preload_torque
    }
    pub fn safety_factor(&self) -> f64 {
        self.safety_factor
    }
    pub fn yield_stress(&self) -> f64 {
        self.yield_stress
    }
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }
    pub fn rest_pitch(&self) -> f64 {
        self.rest_pitch
    }
    pub fn revolutions(&self) -> f64 {
        self.revolutions
    }
    pub fn radius_at_preload(&self) -> f64 {
        self.radius_at_preload
    }
    pub fn unutilized_elasticity(&self) -> f64 {
        self.unutilized_elasticity
    }
    pub fn max_preload_torque(&self) -> f64 {
        self.max_preload_torque
    }
    pub fn effective_radius(&self) -> f64 {
        self.effective_radius
    }
    pub fn rest_radius(&self) -> f64 {
        self.rest_radius
    }
    pub fn rom_at_rest(&self) -> f64 {
        self.rom_at_rest
    }
    pub fn max_stress(&self) -> f64 {
        self.max_stress
    }
    pub fn torque_at_max_deflection(&self) -> f64 {
        self.torque_at_max_deflection
    }
    pub fn profile_radius(&self) -> f64 {
        self.profile_radius
    }
    pub fn profile_revolutions(&self) -> f64 {
        self.profile_revolutions
    }
    pub fn bounds(&self) -> &SearchBounds {
        &self.bounds
    }
    pub fn optimizer(&self) -> &OptimizerReport {
        &self.optimizer
    }
}
