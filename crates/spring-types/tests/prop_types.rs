// ─────────────────────────────────────────────────────────────────────
// Spiral Spring Core — Property-Based Tests (proptest) for spring-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for spring-types using proptest.
//!
//! Covers: derived thickness limits, input validation, configuration
//! serialization roundtrip.

use proptest::prelude::*;
use spring_types::config::{DesignInputs, SearchOptions, SpringConfig, SwarmConfig, Variable};

fn inputs_with(height: f64, ratio: f64, feature: f64) -> DesignInputs {
    DesignInputs {
        height,
        max_aspect_ratio: ratio,
        min_feature_size: feature,
        ..DesignInputs::pla_reference()
    }
}

// ── Derived Limits ───────────────────────────────────────────────────

proptest! {
    /// Without an explicit ceiling the thickness cap follows the aspect ratio.
    #[test]
    fn max_thickness_from_aspect_ratio(
        height in 0.5f64..20.0,
        ratio in 0.05f64..2.0,
    ) {
        let inputs = inputs_with(height, ratio, 0.4);
        prop_assert!((inputs.max_thickness() - height * ratio).abs() < 1e-12);
    }

    /// An explicit ceiling always wins over the aspect ratio.
    #[test]
    fn explicit_max_thickness_wins(
        height in 0.5f64..20.0,
        t_max in 0.1f64..10.0,
    ) {
        let mut inputs = inputs_with(height, 0.75, 0.4);
        inputs.max_thickness = Some(t_max);
        prop_assert_eq!(inputs.max_thickness(), t_max);
    }

    /// Thickness floor is two feature widths.
    #[test]
    fn min_thickness_two_passes(feature in 0.01f64..2.0) {
        let inputs = inputs_with(4.0, 0.75, feature);
        prop_assert!((inputs.min_thickness() - 2.0 * feature).abs() < 1e-12);
    }
}

// ── Validation ───────────────────────────────────────────────────────

proptest! {
    /// Any positive, finite geometry with room outside the hub validates.
    #[test]
    fn positive_inputs_validate(
        height in 0.5f64..20.0,
        hub in 0.0f64..30.0,
        extra_radius in 0.1f64..50.0,
        torque in 0.0f64..100.0,
    ) {
        let inputs = DesignInputs {
            height,
            hub_radius: hub,
            max_radius_at_preload: hub + extra_radius,
            preload_torque: torque,
            ..DesignInputs::pla_reference()
        };
        prop_assert!(inputs.validate().is_ok());
    }

    /// Negative modulus is always rejected.
    #[test]
    fn negative_modulus_rejected(modulus in -1e5f64..0.0) {
        let inputs = DesignInputs {
            elastic_modulus: modulus,
            ..DesignInputs::pla_reference()
        };
        prop_assert!(inputs.validate().is_err());
    }

    /// Free variables come out in a stable order with thickness and arclength first.
    #[test]
    fn free_variable_order(
        free_height in any::<bool>(),
        free_rom in any::<bool>(),
        free_torque in any::<bool>(),
    ) {
        let opts = SearchOptions {
            height_range: free_height.then_some([3.0, 5.0]),
            range_of_motion_range: free_rom.then_some([3.0, 7.0]),
            preload_torque_range: free_torque.then_some([0.0, 1.0]),
            ..Default::default()
        };
        let vars = opts.free_variables();
        prop_assert_eq!(vars[0], Variable::Thickness);
        prop_assert_eq!(vars[1], Variable::Arclength);
        prop_assert_eq!(
            vars.len(),
            2 + free_height as usize + free_rom as usize + free_torque as usize
        );
        prop_assert!(opts.validate().is_ok());
    }
}

// ── Serialization ────────────────────────────────────────────────────

proptest! {
    /// Config survives a JSON roundtrip.
    #[test]
    fn config_json_roundtrip(
        height in 1.0f64..10.0,
        torque in 0.0f64..5.0,
        seed in any::<u64>(),
    ) {
        let cfg = SpringConfig {
            design_name: "prop".to_string(),
            inputs: DesignInputs {
                height,
                preload_torque: torque,
                ..DesignInputs::pla_reference()
            },
            search: SearchOptions::default(),
            swarm: SwarmConfig {
                seed: Some(seed),
                ..Default::default()
            },
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SpringConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.inputs, cfg.inputs);
        prop_assert_eq!(back.swarm, cfg.swarm);
    }
}
