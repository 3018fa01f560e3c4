// ─────────────────────────────────────────────────────────────────────
// Spiral Spring Core — Constraint Evaluator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Stress, radius-ordering, max-radius and aspect-ratio constraints.
//!
//! Sign convention: an inequality is satisfied when its value is `>= 0`, an
//! equality when its value is `0` within the optimizer's tolerance. Points
//! outside the model domain evaluate to `-INFEASIBLE_PENALTY`.

use crate::model::{
    angle_at_min_distance_to_full_deflection, effective_radius, max_stress, radius_at_preload,
    rest_state_angle, rest_state_radius, rom_at_rest_angle, Candidate,
};
use spring_types::config::{DesignInputs, RadiusMode, SearchOptions};
use spring_types::constants::INFEASIBLE_PENALTY;
use spring_types::error::SpringResult;

/// Identifies one constraint of the spring problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpringConstraint {
    Stress,
    PositiveRadius,
    MaxRadius,
    AspectRatio,
}

impl SpringConstraint {
    pub fn name(self) -> &'static str {
        match self {
            SpringConstraint::Stress => "stress",
            SpringConstraint::PositiveRadius => "positive_radius",
            SpringConstraint::MaxRadius => "max_radius",
            SpringConstraint::AspectRatio => "aspect_ratio",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    /// Satisfied when `>= 0`.
    Inequality,
    /// Satisfied when `== 0`.
    Equality,
}

/// One evaluated constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintValue {
    pub constraint: SpringConstraint,
    pub kind: ConstraintKind,
    pub value: f64,
}

impl ConstraintValue {
    pub fn is_satisfied(&self, tolerance: f64) -> bool {
        match self.kind {
            ConstraintKind::Inequality => self.value >= -tolerance,
            ConstraintKind::Equality => self.value.abs() <= tolerance,
        }
    }
}

/// Maps a domain failure to a strongly negative constraint value.
pub fn penalized(value: SpringResult<f64>) -> f64 {
    value.unwrap_or(-INFEASIBLE_PENALTY)
}

/// `SF·σ_y − σ_max`, with the stress taken at maximum deformation.
pub fn try_stress_constraint(inputs: &DesignInputs, c: &Candidate) -> SpringResult<f64> {
    c.check_positive()?;
    let rom_r = rom_at_rest_angle(
        c.height,
        inputs.elastic_modulus,
        c.thickness,
        c.arclength,
        c.range_of_motion,
        c.preload_torque,
    );
    let sigma = max_stress(c.thickness, rom_r, c.arclength, inputs.elastic_modulus);
    Ok(inputs.allowable_stress() - sigma)
}

/// `r_rest − r_E`. Negative means the coil overlaps itself at rest.
pub fn try_positive_radius_constraint(inputs: &DesignInputs, c: &Candidate) -> SpringResult<f64> {
    c.check_positive()?;
    let pitch0 = inputs.min_coil_distance;
    let r_e = effective_radius(c.thickness, inputs.hub_radius, pitch0);
    let theta_emd = angle_at_min_distance_to_full_deflection(c.arclength, c.thickness, r_e, pitch0)?;
    let rom_r = rom_at_rest_angle(
        c.height,
        inputs.elastic_modulus,
        c.thickness,
        c.arclength,
        c.range_of_motion,
        c.preload_torque,
    );
    let theta_e = rest_state_angle(theta_emd, rom_r)?;
    let r_r = rest_state_radius(c.arclength, theta_e, r_e)?;
    Ok(r_r - r_e)
}

/// `R_max − r_pre`.
pub fn try_max_radius_constraint(inputs: &DesignInputs, c: &Candidate) -> SpringResult<f64> {
    c.check_positive()?;
    let pitch0 = inputs.min_coil_distance;
    let r_e = effective_radius(c.thickness, inputs.hub_radius, pitch0);
    let theta_emd = angle_at_min_distance_to_full_deflection(c.arclength, c.thickness, r_e, pitch0)?;
    let r_pre = radius_at_preload(c.arclength, theta_emd, c.range_of_motion, r_e)?;
    Ok(inputs.max_radius_at_preload - r_pre)
}

/// `max_ratio − t / h`.
pub fn aspect_ratio_constraint(max_ratio: f64, thickness: f64, height: f64) -> f64 {
    max_ratio - thickness / height
}

pub fn stress_constraint(inputs: &DesignInputs, c: &Candidate) -> f64 {
    penalized(try_stress_constraint(inputs, c))
}

pub fn positive_radius_constraint(inputs: &DesignInputs, c: &Candidate) -> f64 {
    penalized(try_positive_radius_constraint(inputs, c))
}

pub fn max_radius_constraint(inputs: &DesignInputs, c: &Candidate) -> f64 {
    penalized(try_max_radius_constraint(inputs, c))
}

/// Constraint set for one run. Each constraint is evaluated on its own so a
/// domain failure in one never masks the others.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintEvaluator {
    pub radius_mode: RadiusMode,
    /// Present when height is a free variable.
    pub max_aspect_ratio: Option<f64>,
}

impl ConstraintEvaluator {
    pub fn new(inputs: &DesignInputs, options: &SearchOptions) -> Self {
        ConstraintEvaluator {
            radius_mode: options.radius_mode,
            max_aspect_ratio: options.height_range.map(|_| inputs.max_aspect_ratio),
        }
    }

    pub fn max_radius_kind(&self) -> ConstraintKind {
        match self.radius_mode {
            RadiusMode::Cap => ConstraintKind::Inequality,
            RadiusMode::Pin => ConstraintKind::Equality,
        }
    }

    pub fn evaluate(&self, inputs: &DesignInputs, c: &Candidate) -> Vec<ConstraintValue> {
        let mut values = vec![
            ConstraintValue {
                constraint: SpringConstraint::Stress,
                kind: ConstraintKind::Inequality,
                value: stress_constraint(inputs, c),
            },
            ConstraintValue {
                constraint: SpringConstraint::PositiveRadius,
                kind: ConstraintKind::Inequality,
                value: positive_radius_constraint(inputs, c),
            },
            ConstraintValue {
                constraint: SpringConstraint::MaxRadius,
                kind: self.max_radius_kind(),
                value: max_radius_constraint(inputs, c),
            },
        ];
        if let Some(ratio) = self.max_aspect_ratio {
            values.push(ConstraintValue {
                constraint: SpringConstraint::AspectRatio,
                kind: ConstraintKind::Inequality,
                value: aspect_ratio_constraint(ratio, c.thickness, c.height),
            });
        }
        values
    }

    pub fn inequalities(&self, inputs: &DesignInputs, c: &Candidate) -> Vec<f64> {
        self.values_of(inputs, c, ConstraintKind::Inequality)
    }

    pub fn equalities(&self, inputs: &DesignInputs, c: &Candidate) -> Vec<f64> {
        self.values_of(inputs, c, ConstraintKind::Equality)
    }

    fn values_of(&self, inputs: &DesignInputs, c: &Candidate, kind: ConstraintKind) -> Vec<f64> {
        self.evaluate(inputs, c)
            .into_iter()
            .filter(|v| v.kind == kind)
            .map(|v| v.value)
            .collect()
    }

    /// Every constraint satisfied within `tolerance`.
    pub fn is_feasible(&self, inputs: &DesignInputs, c: &Candidate, tolerance: f64) -> bool {
        self.evaluate(inputs, c)
            .iter()
            .all(|v| v.is_satisfied(tolerance))
    }
}
