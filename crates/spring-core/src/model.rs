// ─────────────────────────────────────────────────────────────────────
// Spiral Spring Core — Spring Model
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Closed-form geometry and mechanics of a flat spiral torsion spring.
//!
//! The strip is modelled as an Archimedean spiral whose innermost coil sits
//! at the effective radius. Maximum deformation is the state where every
//! coil is packed at the minimum coil distance; the rest state is reached
//! by unwinding the range of motion plus the preload angle from there.
//!
//! Evaluation order follows the data dependency:
//! effective radius → max-deflection angle → preload radius and rest ROM →
//! rest angle → rest radius → pitch, revolutions, stress → margins.

use spring_types::config::DesignInputs;
use spring_types::error::{SpringError, SpringResult};
use std::f64::consts::{PI, TAU};

/// Torsional stiffness [N·mm/rad].
///
/// `k = E·h·t³ / (12·L)`.
pub fn stiffness(height: f64, modulus: f64, thickness: f64, arclength: f64) -> f64 {
    modulus * height * thickness.powi(3) / (12.0 * arclength)
}

/// Arclength giving the requested stiffness. Inverse of [`stiffness`].
pub fn arclength_for_stiffness(height: f64, modulus: f64, thickness: f64, stiffness: f64) -> f64 {
    modulus * height * thickness.powi(3) / (12.0 * stiffness)
}

/// Winding radius of the innermost coil.
pub fn effective_radius(thickness: f64, hub_radius: f64, pitch0: f64) -> f64 {
    hub_radius + thickness / 2.0 + pitch0
}

/// Radius of the printed profile's inner edge against the hub.
pub fn profile_radius(hub_radius: f64, thickness: f64) -> f64 {
    hub_radius - thickness / 2.0
}

/// Winding angle from the fully packed state back to the effective radius [rad].
///
/// With every coil at pitch `t + pitch0`, the packed spiral reaching out to
/// `r_E` spans `θ_IMD = 2π·r_E / (t + pitch0)` and consumes
/// `L_IMD = r_E·θ_IMD / 2` of virtual strip. Adding the real strip and
/// inverting the Archimedean arclength `L = (t + pitch0)·θ² / (4π)` gives the
/// outer angle `θ_MD`; the spring itself spans `θ_MD − θ_IMD`.
pub fn angle_at_min_distance_to_full_deflection(
    arclength: f64,
    thickness: f64,
    effective_radius: f64,
    pitch0: f64,
) -> SpringResult<f64> {
    let packed_pitch = thickness + pitch0;
    if !(packed_pitch > 0.0) {
        return Err(SpringError::domain("packed coil pitch", packed_pitch));
    }
    let theta_imd = TAU * effective_radius / packed_pitch;
    let arclength_imd = effective_radius * theta_imd / 2.0;
    let radicand = 4.0 * PI * (arclength + arclength_imd) / packed_pitch;
    if !(radicand >= 0.0) {
        return Err(SpringError::domain(
            "max-deflection angle radicand",
            radicand,
        ));
    }
    Ok(radicand.sqrt() - theta_imd)
}

/// Outer radius after unwinding `target_rom` from maximum deflection [mm].
///
/// Fails when the range of motion consumes the whole deflection angle.
pub fn radius_at_preload(
    arclength: f64,
    angle_at_max_deflection: f64,
    target_rom: f64,
    effective_radius: f64,
) -> SpringResult<f64> {
    let theta_pre = angle_at_max_deflection - target_rom;
    if !(theta_pre > 0.0) {
        return Err(SpringError::domain("preload winding angle", theta_pre));
    }
    let radius = 2.0 * arclength / theta_pre - effective_radius;
    if !(radius > 0.0) || !radius.is_finite() {
        return Err(SpringError::domain("radius at preload", radius));
    }
    Ok(radius)
}

/// Angle between rest and maximum deflection [rad]: target ROM plus the
/// angle the preload torque winds in, `12·L·τ / (E·h·t³)`.
pub fn rom_at_rest_angle(
    height: f64,
    modulus: f64,
    thickness: f64,
    arclength: f64,
    target_rom: f64,
    preload_torque: f64,
) -> f64 {
    let rom_pre = 2.0 * arclength * 6.0 * preload_torque / (modulus * height * thickness.powi(3));
    rom_pre + target_rom
}

/// Winding angle of the strip at rest [rad].
pub fn rest_state_angle(angle_at_max_deflection: f64, rom_at_rest: f64) -> SpringResult<f64> {
    let theta = angle_at_max_deflection - rom_at_rest;
    if !(theta > 0.0) {
        return Err(SpringError::domain("rest winding angle", theta));
    }
    Ok(theta)
}

/// Outer radius at rest [mm].
pub fn rest_state_radius(
    arclength: f64,
    rest_state_angle: f64,
    effective_radius: f64,
) -> SpringResult<f64> {
    if !(rest_state_angle > 0.0) {
        return Err(SpringError::domain("rest winding angle", rest_state_angle));
    }
    let radius = 2.0 * arclength / rest_state_angle - effective_radius;
    if !(radius > 0.0) || !radius.is_finite() {
        return Err(SpringError::domain("rest radius", radius));
    }
    Ok(radius)
}

/// Radial pitch between coils at rest [mm].
pub fn rest_pitch(rest_state_radius: f64, effective_radius: f64, rest_state_angle: f64) -> f64 {
    TAU * (rest_state_radius - effective_radius) / rest_state_angle
}

/// Full turns of the strip at rest.
pub fn revolutions(rest_state_angle: f64) -> f64 {
    rest_state_angle / TAU
}

/// Turns of the printed profile between the profile radius and the rest radius.
pub fn profile_revolutions(
    profile_radius: f64,
    rest_pitch: f64,
    rest_state_radius: f64,
) -> SpringResult<f64> {
    if !(rest_pitch > 0.0) {
        return Err(SpringError::domain("rest pitch", rest_pitch));
    }
    let theta_inner = TAU * profile_radius / rest_pitch;
    let theta_outer = TAU * rest_state_radius / rest_pitch;
    Ok((theta_outer - theta_inner) / TAU)
}

/// Peak bending stress at maximum deflection [MPa].
///
/// Maximum deformation ends at the minimum coil distance, not necessarily
/// where the spring physically stops. A generous coil distance leaves room
/// to overdrive the spring past this stress.
pub fn max_stress(thickness: f64, rom_at_rest: f64, arclength: f64, modulus: f64) -> f64 {
    modulus * thickness * rom_at_rest / (2.0 * arclength)
}

/// Allowable stress left unused. Zero for a stress-optimal design.
pub fn unutilized_elasticity(safety_factor: f64, yield_stress: f64, max_stress: f64) -> f64 {
    safety_factor * yield_stress - max_stress
}

/// Preload torque that drives [`max_stress`] exactly to the allowable limit [N·mm].
///
/// From `σ = E·t·ROM / (2L) + 6·τ / (h·t²) = SF·σ_y`.
pub fn max_preload_torque(
    height: f64,
    thickness: f64,
    arclength: f64,
    safety_factor: f64,
    yield_stress: f64,
    modulus: f64,
    target_rom: f64,
) -> f64 {
    let rom_stress = modulus * thickness * target_rom / (2.0 * arclength);
    (safety_factor * yield_stress - rom_stress) * height * thickness.powi(2) / 6.0
}

/// Torque delivered at maximum deflection [N·mm].
pub fn torque_at_max_deflection(
    thickness: f64,
    rom_at_rest: f64,
    arclength: f64,
    height: f64,
    modulus: f64,
) -> f64 {
    max_stress(thickness, rom_at_rest, arclength, modulus) * height * thickness.powi(2) / 6.0
}

/// A point in design space: the two primary variables plus the inputs
/// that may be promoted to free variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub thickness: f64,
    pub arclength: f64,
    pub height: f64,
    pub range_of_motion: f64,
    pub preload_torque: f64,
}

impl Candidate {
    /// Candidate with every optional variable fixed at its input value.
    pub fn new(inputs: &DesignInputs, thickness: f64, arclength: f64) -> Self {
        Candidate {
            thickness,
            arclength,
            height: inputs.height,
            range_of_motion: inputs.range_of_motion,
            preload_torque: inputs.preload_torque,
        }
    }

    pub(crate) fn check_positive(&self) -> SpringResult<()> {
        if !(self.thickness > 0.0) {
            return Err(SpringError::domain("thickness", self.thickness));
        }
        if !(self.arclength > 0.0) {
            return Err(SpringError::domain("arclength", self.arclength));
        }
        if !(self.height > 0.0) {
            return Err(SpringError::domain("height", self.height));
        }
        Ok(())
    }
}

/// Every derived quantity at one candidate, computed in dependency order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringState {
    pub stiffness: f64,
    pub effective_radius: f64,
    pub angle_at_max_deflection: f64,
    pub radius_at_preload: f64,
    pub rom_at_rest: f64,
    pub rest_angle: f64,
    pub rest_radius: f64,
    pub rest_pitch: f64,
    pub revolutions: f64,
    pub profile_radius: f64,
    pub profile_revolutions: f64,
    pub max_stress: f64,
    pub unutilized_elasticity: f64,
    pub max_preload_torque: f64,
    pub torque_at_max_deflection: f64,
}

impl SpringState {
    /// Runs the full equation chain. Fails on the first domain violation.
    pub fn evaluate(inputs: &DesignInputs, c: &Candidate) -> SpringResult<Self> {
        c.check_positive()?;
        let e = inputs.elastic_modulus;
        let pitch0 = inputs.min_coil_distance;

        let k = stiffness(c.height, e, c.thickness, c.arclength);
        let r_e = effective_radius(c.thickness, inputs.hub_radius, pitch0);
        let theta_emd = angle_at_min_distance_to_full_deflection(c.arclength, c.thickness, r_e, pitch0)?;
        let r_pre = radius_at_preload(c.arclength, theta_emd, c.range_of_motion, r_e)?;
        let rom_r = rom_at_rest_angle(
            c.height,
            e,
            c.thickness,
            c.arclength,
            c.range_of_motion,
            c.preload_torque,
        );
        let theta_e = rest_state_angle(theta_emd, rom_r)?;
        let r_r = rest_state_radius(c.arclength, theta_e, r_e)?;
        let pitch_r = rest_pitch(r_r, r_e, theta_e);
        let r_profile = profile_radius(inputs.hub_radius, c.thickness);
        let sigma = max_stress(c.thickness, rom_r, c.arclength, e);

        Ok(SpringState {
            stiffness: k,
            effective_radius: r_e,
            angle_at_max_deflection: theta_emd,
            radius_at_preload: r_pre,
            rom_at_rest: rom_r,
            rest_angle: theta_e,
            rest_radius: r_r,
            rest_pitch: pitch_r,
            revolutions: revolutions(theta_e),
            profile_radius: r_profile,
            profile_revolutions: profile_revolutions(r_profile, pitch_r, r_r)?,
            max_stress: sigma,
            unutilized_elasticity: unutilized_elasticity(
                inputs.safety_factor,
                inputs.yield_stress,
                sigma,
            ),
            max_preload_torque: max_preload_torque(
                c.height,
                c.thickness,
                c.arclength,
                inputs.safety_factor,
                inputs.yield_stress,
                e,
                c.range_of_motion,
            ),
            torque_at_max_deflection: torque_at_max_deflection(
                c.thickness,
                rom_r,
                c.arclength,
                c.height,
                e,
            ),
        })
    }
}
