// ─────────────────────────────────────────────────────────────────────
// Spiral Spring Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Units throughout: mm, N, MPa (N/mm²), N·mm, rad.

use std::f64::consts::SQRT_2;

/// Extrusion/etch passes per strip wall. Thinnest strip = passes × feature size.
pub const FEATURE_PASSES: f64 = 2.0;

/// Default thickness/height cap when no explicit max thickness is given.
pub const DEFAULT_MAX_ASPECT_RATIO: f64 = 0.75;

/// Coefficient of the stress-optimal (shortest arclength) thickness:
/// `t* = 3·√2·√(τ_pre / (SF·h·σ_y))`.
pub const STRESS_OPTIMAL_COEFF: f64 = 3.0 * SQRT_2;

/// Penalty magnitude reported for candidates outside the model domain.
pub const INFEASIBLE_PENALTY: f64 = 1e12;

/// PLA Young's modulus [MPa].
pub const PLA_ELASTIC_MODULUS: f64 = 3100.0;

/// PLA yield stress [MPa].
pub const PLA_YIELD_STRESS: f64 = 83.0;

/// Common FDM nozzle diameter [mm].
pub const NOZZLE_DIAMETER_04: f64 = 0.4;
