// ─────────────────────────────────────────────────────────────────────
// Spiral Spring Core — Search Bounds
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Analytic search box for (thickness, arclength) and any extra free variables.

use crate::model::arclength_for_stiffness;
use serde::Serialize;
use spring_types::config::{ArclengthCeiling, DesignInputs, SearchOptions, Variable};
use spring_types::constants::STRESS_OPTIMAL_COEFF;
use spring_types::error::{SpringError, SpringResult};
use std::f64::consts::PI;

/// Closed interval `[lower, upper]` for one variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VariableBounds {
    pub lower: f64,
    pub upper: f64,
}

impl VariableBounds {
    /// Fails with `InfeasibleBounds` when `lower > upper`.
    pub fn checked(variable: Variable, lower: f64, upper: f64) -> SpringResult<Self> {
        if !(lower <= upper) {
            return Err(SpringError::InfeasibleBounds {
                variable,
                lower,
                upper,
            });
        }
        Ok(VariableBounds { lower, upper })
    }

    pub fn span(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

/// Search box handed to the optimizer, plus the intermediate values a
/// report needs to explain it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchBounds {
    pub thickness: VariableBounds,
    pub arclength: VariableBounds,
    /// Unclamped thickness that minimizes arclength under the stress limit.
    pub stress_optimal_thickness: f64,
    /// Thickness the arclength floor was evaluated at (clamped to fabrication).
    pub min_arclength_thickness: f64,
    /// Bounds of free variables beyond thickness and arclength.
    pub extra: Vec<(Variable, VariableBounds)>,
}

impl SearchBounds {
    pub fn get(&self, variable: Variable) -> Option<VariableBounds> {
        match variable {
            Variable::Thickness => Some(self.thickness),
            Variable::Arclength => Some(self.arclength),
            _ => self
                .extra
                .iter()
                .find(|(v, _)| *v == variable)
                .map(|(_, b)| *b),
        }
    }
}

/// Thickness at which the required preload and ROM fit in the shortest strip.
///
/// `t* = 3·√2·√(τ_pre / (SF·h·σ_y))`.
pub fn stress_optimal_thickness(
    preload_torque: f64,
    safety_factor: f64,
    height: f64,
    yield_stress: f64,
) -> f64 {
    STRESS_OPTIMAL_COEFF * (preload_torque / (safety_factor * height * yield_stress)).sqrt()
}

/// Shortest strip at `thickness` whose peak stress stays at the allowable limit.
///
/// Solves `E·t·ROM / (2L) + 6·τ / (h·t²) = σ_allow` for `L`. Fails when the
/// preload alone already exceeds the allowable stress at this thickness.
pub fn min_arclength(
    height: f64,
    modulus: f64,
    thickness: f64,
    target_rom: f64,
    allowable_stress: f64,
    preload_torque: f64,
) -> SpringResult<f64> {
    let denominator =
        2.0 * (allowable_stress * height * thickness.powi(2) - 6.0 * preload_torque);
    if !(denominator > 0.0) {
        return Err(SpringError::domain("min arclength denominator", denominator));
    }
    Ok(modulus * height * thickness.powi(3) * target_rom / denominator)
}

/// Longest strip that fits between the hub and the maximum outer radius.
///
/// `π·(R_max − r_hub / (2·t_min))·(R_max + r_hub)`.
pub fn coil_area_arclength(max_outer_radius: f64, hub_radius: f64, min_thickness: f64) -> f64 {
    PI * (max_outer_radius - hub_radius / (2.0 * min_thickness)) * (max_outer_radius + hub_radius)
}

/// Derives the rectangular search box.
///
/// The thickness used for the arclength floor is clamped to the fabrication
/// minimum before the floor is evaluated; clamping afterwards would pair the
/// floor with the wrong binding equation.
pub fn derive_bounds(inputs: &DesignInputs, options: &SearchOptions) -> SpringResult<SearchBounds> {
    let min_thickness = inputs.min_thickness();
    let max_thickness = match (inputs.max_thickness, options.height_range) {
        (None, Some([_, h_hi])) => h_hi * inputs.max_aspect_ratio,
        _ => inputs.max_thickness(),
    };
    let thickness = VariableBounds::checked(Variable::Thickness, min_thickness, max_thickness)?;

    let t_opt = stress_optimal_thickness(
        inputs.preload_torque,
        inputs.safety_factor,
        inputs.height,
        inputs.yield_stress,
    );
    let t_floor = if t_opt < min_thickness {
        tracing::debug!(
            stress_optimal = t_opt,
            fabrication_min = min_thickness,
            "stress-optimal thickness below fabrication minimum, clamping"
        );
        min_thickness
    } else {
        t_opt
    };

    let allowable = inputs.allowable_stress();
    let l_min = min_arclength(
        inputs.height,
        inputs.elastic_modulus,
        t_floor,
        inputs.range_of_motion,
        allowable,
        inputs.preload_torque,
    )
    .unwrap_or(f64::INFINITY);

    let l_max = match options.arclength_ceiling {
        ArclengthCeiling::CoilArea => {
            coil_area_arclength(inputs.max_radius_at_preload, inputs.hub_radius, min_thickness)
        }
        ArclengthCeiling::StiffnessAtMaxThickness { min_stiffness } => arclength_for_stiffness(
            inputs.height,
            inputs.elastic_modulus,
            max_thickness,
            min_stiffness,
        ),
    };
    let arclength = VariableBounds::checked(Variable::Arclength, l_min, l_max)?;

    let mut extra = Vec::new();
    for variable in options.free_variables().into_iter().skip(2) {
        if let Some([lo, hi]) = options.range_of(variable) {
            extra.push((variable, VariableBounds::checked(variable, lo, hi)?));
        }
    }

    tracing::debug!(
        t_lo = thickness.lower,
        t_hi = thickness.upper,
        l_lo = arclength.lower,
        l_hi = arclength.upper,
        min_arclength_thickness = t_floor,
        "derived search bounds"
    );

    Ok(SearchBounds {
        thickness,
        arclength,
        stress_optimal_thickness: t_opt,
        min_arclength_thickness: t_floor,
        extra,
    })
}
