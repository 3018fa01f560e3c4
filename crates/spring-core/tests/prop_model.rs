// ─────────────────────────────────────────────────────────────────────
// Spiral Spring Core — Property-Based Tests (proptest) for spring-core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for spring-core using proptest.
//!
//! Covers: model monotonicity, stiffness inversion, bound clamping,
//! constraint sign conventions, degenerate preload handling.

use proptest::prelude::*;
use spring_core::bounds::{derive_bounds, stress_optimal_thickness};
use spring_core::constraints::{
    positive_radius_constraint, stress_constraint, try_positive_radius_constraint,
};
use spring_core::model::{
    angle_at_min_distance_to_full_deflection, arclength_for_stiffness, effective_radius,
    rest_state_angle, rom_at_rest_angle, stiffness, Candidate, SpringState,
};
use spring_core::objective::negative_stiffness;
use spring_types::config::{DesignInputs, SearchOptions};
use spring_types::constants::INFEASIBLE_PENALTY;
use spring_types::error::SpringError;

fn reference() -> DesignInputs {
    DesignInputs::pla_reference()
}

// ── Model Properties ─────────────────────────────────────────────────

proptest! {
    /// More range of motion leaves less winding angle at rest.
    #[test]
    fn rest_angle_decreases_with_rom(
        t in 0.5f64..3.0,
        l in 100.0f64..3000.0,
        rom in 0.5f64..6.0,
        extra in 0.01f64..2.0,
    ) {
        let inputs = reference();
        let r_e = effective_radius(t, inputs.hub_radius, inputs.min_coil_distance);
        let theta_emd =
            angle_at_min_distance_to_full_deflection(l, t, r_e, inputs.min_coil_distance).unwrap();
        let rom_lo = rom_at_rest_angle(4.0, inputs.elastic_modulus, t, l, rom, 0.1);
        let rom_hi = rom_at_rest_angle(4.0, inputs.elastic_modulus, t, l, rom + extra, 0.1);
        prop_assume!(theta_emd > rom_hi);
        let a_lo = rest_state_angle(theta_emd, rom_lo).unwrap();
        let a_hi = rest_state_angle(theta_emd, rom_hi).unwrap();
        prop_assert!(a_hi < a_lo, "{} !< {}", a_hi, a_lo);
    }

    /// Stiffness rises with thickness and falls with arclength.
    #[test]
    fn stiffness_monotonic(
        t in 0.1f64..5.0,
        dt in 0.01f64..1.0,
        l in 10.0f64..5000.0,
        dl in 1.0f64..500.0,
    ) {
        let k = stiffness(4.0, 3100.0, t, l);
        prop_assert!(stiffness(4.0, 3100.0, t + dt, l) > k);
        prop_assert!(stiffness(4.0, 3100.0, t, l + dl) < k);
    }

    /// Arclength recovered from the stiffness it produced.
    #[test]
    fn arclength_from_stiffness_roundtrip(
        h in 1.0f64..20.0,
        e in 500.0f64..200_000.0,
        t in 0.1f64..5.0,
        l in 10.0f64..5000.0,
    ) {
        let back = arclength_for_stiffness(h, e, t, stiffness(h, e, t, l));
        prop_assert!((back - l).abs() / l < 1e-12);
    }

    /// The objective is the negated stiffness everywhere it is defined.
    #[test]
    fn objective_negates_stiffness(t in 0.1f64..5.0, l in 10.0f64..5000.0) {
        let inputs = reference();
        let f = negative_stiffness(&inputs, &Candidate::new(&inputs, t, l));
        prop_assert!((f + stiffness(4.0, inputs.elastic_modulus, t, l)).abs() < 1e-12);
    }
}

// ── Bound Derivation ─────────────────────────────────────────────────

proptest! {
    /// Thickness floor is the fabrication minimum; the arclength floor is
    /// evaluated at the larger of that minimum and the stress optimum.
    #[test]
    fn arclength_floor_uses_clamped_thickness(
        torque in 0.0f64..10.0,
        feature in 0.2f64..0.6,
    ) {
        let inputs = DesignInputs {
            preload_torque: torque,
            min_feature_size: feature,
            ..reference()
        };
        let b = derive_bounds(&inputs, &SearchOptions::default()).unwrap();
        let t_opt = stress_optimal_thickness(torque, 0.75, 4.0, 83.0);
        prop_assert!((b.thickness.lower - 2.0 * feature).abs() < 1e-12);
        prop_assert!((b.min_arclength_thickness - t_opt.max(2.0 * feature)).abs() < 1e-12);
        prop_assert!(b.arclength.lower > 0.0 && b.arclength.upper.is_finite());
    }
}

// ── Constraint Sign Conventions ──────────────────────────────────────

proptest! {
    /// Stress margin is non-negative exactly when stress is within the limit.
    #[test]
    fn stress_sign_convention(t in 0.8f64..3.0, l in 100.0f64..2500.0) {
        let inputs = reference();
        let c = Candidate::new(&inputs, t, l);
        let state = SpringState::evaluate(&inputs, &c);
        prop_assume!(state.is_ok());
        let state = state.unwrap();
        let g = stress_constraint(&inputs, &c);
        prop_assert_eq!(g >= 0.0, state.max_stress <= inputs.allowable_stress());
    }

    /// Radius ordering is non-negative exactly when the rest radius clears
    /// the effective radius.
    #[test]
    fn positive_radius_sign_convention(t in 0.8f64..3.0, l in 100.0f64..2500.0) {
        let inputs = reference();
        let c = Candidate::new(&inputs, t, l);
        let state = SpringState::evaluate(&inputs, &c);
        prop_assume!(state.is_ok());
        let state = state.unwrap();
        let g = positive_radius_constraint(&inputs, &c);
        prop_assert_eq!(g >= 0.0, state.rest_radius >= state.effective_radius);
    }

    /// A preload that consumes the whole deflection angle is a domain error,
    /// and the constraint wrapper turns it into the penalty.
    #[test]
    fn degenerate_preload_is_domain_error(
        t in 0.8f64..2.0,
        l in 200.0f64..2000.0,
        overshoot in 0.01f64..5.0,
    ) {
        let base = reference();
        let r_e = effective_radius(t, base.hub_radius, base.min_coil_distance);
        let theta_emd =
            angle_at_min_distance_to_full_deflection(l, t, r_e, base.min_coil_distance).unwrap();
        prop_assume!(theta_emd > base.range_of_motion + 0.1);
        // Preload angle that lands the rest angle `overshoot` below zero.
        let preload_angle = theta_emd - base.range_of_motion + overshoot;
        let torque = preload_angle * base.elastic_modulus * base.height * t.powi(3) / (12.0 * l);
        let inputs = DesignInputs { preload_torque: torque, ..base };
        let c = Candidate::new(&inputs, t, l);

        match SpringState::evaluate(&inputs, &c) {
            Err(SpringError::Domain { quantity, value }) => {
                prop_assert_eq!(quantity, "rest winding angle");
                prop_assert!(value <= 0.0);
            }
            other => prop_assert!(false, "expected Domain, got {:?}", other),
        }
        prop_assert!(try_positive_radius_constraint(&inputs, &c).is_err());
        prop_assert_eq!(positive_radius_constraint(&inputs, &c), -INFEASIBLE_PENALTY);
    }
}
