// ─────────────────────────────────────────────────────────────────────
// Spiral Spring Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{
    DEFAULT_MAX_ASPECT_RATIO, FEATURE_PASSES, NOZZLE_DIAMETER_04, PLA_ELASTIC_MODULUS,
    PLA_YIELD_STRESS,
};
use crate::error::{SpringError, SpringResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Top-level run configuration, one JSON document per optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpringConfig {
    pub design_name: String,
    pub inputs: DesignInputs,
    #[serde(default)]
    pub search: SearchOptions,
    #[serde(default)]
    pub swarm: SwarmConfig,
}

/// Fixed inputs of one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignInputs {
    /// Strip height along the hub axis [mm].
    pub height: f64,
    /// Young's modulus [MPa].
    #[serde(alias = "elasticity")]
    pub elastic_modulus: f64,
    /// Yield stress [MPa].
    pub yield_stress: f64,
    /// Fraction of the yield stress the design may use.
    pub safety_factor: f64,
    /// Radius of the central pad the spring winds around [mm].
    #[serde(alias = "center_pad_radius")]
    pub hub_radius: f64,
    /// Minimum radial gap between coils, `pitch0` [mm].
    pub min_coil_distance: f64,
    /// Desired angular range of motion [rad].
    pub range_of_motion: f64,
    /// Torque held at the rest position [N·mm].
    pub preload_torque: f64,
    /// Largest outer radius allowed at preload deformation [mm].
    pub max_radius_at_preload: f64,
    /// Smallest printable/etchable feature [mm].
    #[serde(alias = "nozzle_diameter")]
    pub min_feature_size: f64,
    /// Explicit thickness ceiling [mm]. Derived from the aspect ratio when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_thickness: Option<f64>,
    #[serde(default = "default_max_aspect_ratio")]
    pub max_aspect_ratio: f64,
}

fn default_max_aspect_ratio() -> f64 {
    DEFAULT_MAX_ASPECT_RATIO
}

impl DesignInputs {
    /// FDM-printed PLA spring on a 10 mm pad, one full turn of travel.
    pub fn pla_reference() -> Self {
        DesignInputs {
            height: 4.0,
            elastic_modulus: PLA_ELASTIC_MODULUS,
            yield_stress: PLA_YIELD_STRESS,
            safety_factor: 0.75,
            hub_radius: 10.0,
            min_coil_distance: 0.25,
            range_of_motion: 6.28,
            preload_torque: 0.1,
            max_radius_at_preload: 25.0,
            min_feature_size: NOZZLE_DIAMETER_04,
            max_thickness: None,
            max_aspect_ratio: DEFAULT_MAX_ASPECT_RATIO,
        }
    }

    /// `safety_factor · yield_stress`.
    pub fn allowable_stress(&self) -> f64 {
        self.safety_factor * self.yield_stress
    }

    /// Fabrication floor on thickness.
    pub fn min_thickness(&self) -> f64 {
        FEATURE_PASSES * self.min_feature_size
    }

    /// Explicit ceiling, or `height · max_aspect_ratio`.
    pub fn max_thickness(&self) -> f64 {
        self.max_thickness
            .unwrap_or(self.height * self.max_aspect_ratio)
    }

    /// Rejects inputs that would leave the model equations undefined.
    pub fn validate(&self) -> SpringResult<()> {
        let positive = [
            ("height", self.height),
            ("elastic_modulus", self.elastic_modulus),
            ("yield_stress", self.yield_stress),
            ("safety_factor", self.safety_factor),
            ("range_of_motion", self.range_of_motion),
            ("max_radius_at_preload", self.max_radius_at_preload),
            ("min_feature_size", self.min_feature_size),
            ("max_aspect_ratio", self.max_aspect_ratio),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SpringError::ConfigError(format!(
                    "inputs.{name} must be finite and > 0, got {value}"
                )));
            }
        }

        let non_negative = [
            ("hub_radius", self.hub_radius),
            ("min_coil_distance", self.min_coil_distance),
            ("preload_torque", self.preload_torque),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SpringError::ConfigError(format!(
                    "inputs.{name} must be finite and >= 0, got {value}"
                )));
            }
        }

        if let Some(t_max) = self.max_thickness {
            if !t_max.is_finite() || t_max <= 0.0 {
                return Err(SpringError::ConfigError(format!(
                    "inputs.max_thickness must be finite and > 0, got {t_max}"
                )));
            }
        }
        if self.max_radius_at_preload <= self.hub_radius {
            return Err(SpringError::ConfigError(format!(
                "inputs.max_radius_at_preload ({}) must exceed hub_radius ({})",
                self.max_radius_at_preload, self.hub_radius
            )));
        }
        Ok(())
    }
}

/// Design variables an optimizer may vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    Thickness,
    Arclength,
    Height,
    RangeOfMotion,
    PreloadTorque,
}

impl Variable {
    pub fn name(self) -> &'static str {
        match self {
            Variable::Thickness => "thickness",
            Variable::Arclength => "arclength",
            Variable::Height => "height",
            Variable::RangeOfMotion => "range_of_motion",
            Variable::PreloadTorque => "preload_torque",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the preload radius is held against the radius limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusMode {
    /// `max_radius − radius_at_preload ≥ 0`
    #[default]
    Cap,
    /// `max_radius − radius_at_preload = 0`
    Pin,
}

/// Formula for the arclength ceiling of the search box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArclengthCeiling {
    /// Coil-area relation at the maximum outer radius and minimum thickness.
    #[default]
    CoilArea,
    /// Longest strip at maximum thickness that still reaches `min_stiffness`.
    StiffnessAtMaxThickness { min_stiffness: f64 },
}

/// Search-space options. Every field is optional in JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(default)]
    pub radius_mode: RadiusMode,
    #[serde(default)]
    pub arclength_ceiling: ArclengthCeiling,
    /// Frees the height within `[lo, hi]` and adds the aspect-ratio constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_range: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_of_motion_range: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preload_torque_range: Option<[f64; 2]>,
}

impl SearchOptions {
    /// Free variables in optimizer-vector order.
    pub fn free_variables(&self) -> Vec<Variable> {
        let mut vars = vec![Variable::Thickness, Variable::Arclength];
        if self.height_range.is_some() {
            vars.push(Variable::Height);
        }
        if self.range_of_motion_range.is_some() {
            vars.push(Variable::RangeOfMotion);
        }
        if self.preload_torque_range.is_some() {
            vars.push(Variable::PreloadTorque);
        }
        vars
    }

    /// Configured range of an optional free variable.
    pub fn range_of(&self, variable: Variable) -> Option<[f64; 2]> {
        match variable {
            Variable::Height => self.height_range,
            Variable::RangeOfMotion => self.range_of_motion_range,
            Variable::PreloadTorque => self.preload_torque_range,
            Variable::Thickness | Variable::Arclength => None,
        }
    }

    pub fn validate(&self) -> SpringResult<()> {
        if let ArclengthCeiling::StiffnessAtMaxThickness { min_stiffness } = self.arclength_ceiling
        {
            if !min_stiffness.is_finite() || min_stiffness <= 0.0 {
                return Err(SpringError::ConfigError(format!(
                    "search.arclength_ceiling.min_stiffness must be finite and > 0, got {min_stiffness}"
                )));
            }
        }
        for variable in [
            Variable::Height,
            Variable::RangeOfMotion,
            Variable::PreloadTorque,
        ] {
            let Some([lo, hi]) = self.range_of(variable) else {
                continue;
            };
            if !lo.is_finite() || !hi.is_finite() {
                return Err(SpringError::ConfigError(format!(
                    "search range for {variable} must be finite, got [{lo}, {hi}]"
                )));
            }
            // torque may be zero, height and ROM appear in denominators
            let floor_ok = match variable {
                Variable::PreloadTorque => lo >= 0.0,
                _ => lo > 0.0,
            };
            if !floor_ok {
                return Err(SpringError::ConfigError(format!(
                    "search range for {variable} has invalid lower end {lo}"
                )));
            }
            if lo > hi {
                return Err(SpringError::InfeasibleBounds {
                    variable,
                    lower: lo,
                    upper: hi,
                });
            }
        }
        Ok(())
    }
}

/// Particle swarm settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    pub swarm_size: usize,
    pub max_iterations: usize,
    /// Velocity inertia (omega).
    pub inertia: f64,
    /// Pull towards the particle's own best (phi_p).
    pub cognitive: f64,
    /// Pull towards the swarm best (phi_g).
    pub social: f64,
    /// Stop when an improving step moves the best point less than this.
    pub min_step: f64,
    /// Stop when an improvement changes the best objective less than this.
    pub min_objective_change: f64,
    /// `|h(x)| ≤ tol` counts as satisfied for equality constraints.
    pub equality_tolerance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        SwarmConfig {
            swarm_size: 100,
            max_iterations: 100,
            inertia: 0.5,
            cognitive: 0.5,
            social: 0.5,
            min_step: 1e-8,
            min_objective_change: 1e-8,
            equality_tolerance: 1e-6,
            seed: None,
        }
    }
}

impl SwarmConfig {
    pub fn validate(&self) -> SpringResult<()> {
        if self.swarm_size == 0 {
            return Err(SpringError::ConfigError(
                "swarm.swarm_size must be >= 1".to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(SpringError::ConfigError(
                "swarm.max_iterations must be >= 1".to_string(),
            ));
        }
        let coefficients = [
            ("inertia", self.inertia),
            ("cognitive", self.cognitive),
            ("social", self.social),
            ("min_step", self.min_step),
            ("min_objective_change", self.min_objective_change),
            ("equality_tolerance", self.equality_tolerance),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(SpringError::ConfigError(format!(
                    "swarm.{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl SpringConfig {
    /// Load from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> SpringResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> SpringResult<()> {
        self.inputs.validate()?;
        self.search.validate()?;
        self.swarm.validate()
    }
}
