// ─────────────────────────────────────────────────────────────────────
// Spiral Spring Core — Objective
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Minimization target: the negated torsional stiffness.

use crate::model::{stiffness, Candidate};
use spring_types::config::DesignInputs;
use spring_types::constants::INFEASIBLE_PENALTY;
use spring_types::error::SpringResult;

/// `−k(t, L)`; fails outside the model domain.
pub fn try_negative_stiffness(inputs: &DesignInputs, c: &Candidate) -> SpringResult<f64> {
    c.check_positive()?;
    Ok(-stiffness(
        c.height,
        inputs.elastic_modulus,
        c.thickness,
        c.arclength,
    ))
}

/// `−k(t, L)`, or `+INFEASIBLE_PENALTY` where the stiffness is undefined.
pub fn negative_stiffness(inputs: &DesignInputs, c: &Candidate) -> f64 {
    try_negative_stiffness(inputs, c).unwrap_or(INFEASIBLE_PENALTY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objective_is_negated_stiffness() {
        let inputs = DesignInputs::pla_reference();
        let c = Candidate::new(&inputs, 1.0, 100.0);
        assert!((negative_stiffness(&inputs, &c) + 10.333_333_333).abs() < 1e-6);
    }

    #[test]
    fn test_thicker_is_better() {
        let inputs = DesignInputs::pla_reference();
        let thin = negative_stiffness(&inputs, &Candidate::new(&inputs, 0.8, 500.0));
        let thick = negative_stiffness(&inputs, &Candidate::new(&inputs, 1.2, 500.0));
        assert!(thick < thin);
    }

    #[test]
    fn test_degenerate_candidate_penalized() {
        let inputs = DesignInputs::pla_reference();
        let c = Candidate::new(&inputs, 1.0, 0.0);
        assert!(try_negative_stiffness(&inputs, &c).unwrap_err().is_domain());
        assert_eq!(negative_stiffness(&inputs, &c), INFEASIBLE_PENALTY);
    }
}
