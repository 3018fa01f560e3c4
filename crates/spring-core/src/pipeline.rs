// ─────────────────────────────────────────────────────────────────────
// Spiral Spring Core — Optimization Pipeline
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Config → bounds → problem → optimizer → design.

use crate::bounds::derive_bounds;
use crate::design::SpringDesign;
use crate::optimizer::Optimizer;
use crate::problem::SpringProblem;
use spring_types::config::SpringConfig;
use spring_types::error::SpringResult;

/// Validates the config and builds the problem. Configuration and bound
/// errors surface here, before any search.
pub fn prepare_problem(config: &SpringConfig) -> SpringResult<SpringProblem> {
    config.validate()?;
    let bounds = derive_bounds(&config.inputs, &config.search)?;
    Ok(SpringProblem::new(
        config.inputs.clone(),
        bounds,
        &config.search,
    ))
}

/// Runs one full optimization and assembles the winning design.
///
/// `ConvergenceFailure` from the optimizer is returned as-is; no design is
/// assembled and no retry is attempted.
pub fn optimize_spring<O: Optimizer>(
    config: &SpringConfig,
    optimizer: &O,
) -> SpringResult<SpringDesign> {
    let problem = prepare_problem(config)?;
    let bounds = problem.search_bounds();
    tracing::info!(
        design = %config.design_name,
        variables = problem.variables().len(),
        t_lo = bounds.thickness.lower,
        t_hi = bounds.thickness.upper,
        l_lo = bounds.arclength.lower,
        l_hi = bounds.arclength.upper,
        "starting spring optimization"
    );

    let outcome = match optimizer.minimize(&problem) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!(design = %config.design_name, "optimization failed: {}", e);
            return Err(e);
        }
    };

    let design = SpringDesign::assemble(config.design_name.clone(), &problem, &outcome)?;
    tracing::info!(
        design = %config.design_name,
        stiffness = design.stiffness(),
        thickness = design.thickness(),
        arclength = design.arclength(),
        evaluations = outcome.evaluations,
        termination = %outcome.termination,
        "spring optimization finished"
    );
    Ok(design)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::{ConstrainedProblem, OptimizationOutcome, Termination};
    use crate::surface::DesignGrid;
    use spring_types::config::{DesignInputs, SearchOptions, SwarmConfig};
    use spring_types::error::SpringError;

    /// Exhaustive scan of a 2-D box; enough to drive the pipeline in tests.
    struct GridScan {
        n: usize,
    }

    impl Optimizer for GridScan {
        fn minimize<P: ConstrainedProblem>(&self, problem: &P) -> SpringResult<OptimizationOutcome> {
            let (lo, hi) = problem.bounds();
            let grid = DesignGrid::new(self.n, self.n, lo[0], hi[0], lo[1], hi[1]);
            let mut best: Option<(Vec<f64>, f64)> = None;
            let mut evaluations = 0;
            for &l in grid.arclength.iter() {
                for &t in grid.thickness.iter() {
                    let x = vec![t, l];
                    let e = problem.evaluate(&x);
                    evaluations += 1;
                    if e.is_feasible(1e-6) && best.as_ref().map_or(true, |(_, f)| e.objective < *f) {
                        best = Some((x, e.objective));
                    }
                }
            }
            let (x, objective) = best.ok_or_else(|| SpringError::ConvergenceFailure {
                message: "no feasible grid node".to_string(),
                iterations: 1,
                evaluations,
            })?;
            Ok(OptimizationOutcome {
                x,
                objective,
                termination: Termination::MaxIterations,
                message: "grid exhausted".to_string(),
                iterations: 1,
                evaluations,
            })
        }
    }

    fn config(inputs: DesignInputs) -> SpringConfig {
        SpringConfig {
            design_name: "pipeline".to_string(),
            inputs,
            search: SearchOptions::default(),
            swarm: SwarmConfig::default(),
        }
    }

    #[test]
    fn test_pipeline_produces_feasible_design() {
        let design = optimize_spring(&config(DesignInputs::pla_reference()), &GridScan { n: 40 })
            .unwrap();
        assert!(design.max_stress() <= 62.25);
        assert!(design.radius_at_preload() <= 25.0);
        assert!(design.rest_radius() >= design.effective_radius());
        assert!(design.stiffness() > 3.0, "k = {}", design.stiffness());
        assert_eq!(design.optimizer().evaluations, 1600);
    }

    #[test]
    fn test_invalid_config_stops_before_search() {
        let mut inputs = DesignInputs::pla_reference();
        inputs.height = -1.0;
        let err = optimize_spring(&config(inputs), &GridScan { n: 3 }).unwrap_err();
        assert!(matches!(err, SpringError::ConfigError(_)));
    }

    #[test]
    fn test_infeasible_bounds_stop_before_search() {
        let mut inputs = DesignInputs::pla_reference();
        inputs.min_feature_size = 2.0;
        let err = optimize_spring(&config(inputs), &GridScan { n: 3 }).unwrap_err();
        assert!(matches!(err, SpringError::InfeasibleBounds { .. }));
    }

    #[test]
    fn test_convergence_failure_passes_through() {
        let mut inputs = DesignInputs::pla_reference();
        // Radius cap barely outside the hub: nothing fits.
        inputs.max_radius_at_preload = 10.5;
        let err = optimize_spring(&config(inputs), &GridScan { n: 5 }).unwrap_err();
        assert!(matches!(err, SpringError::ConvergenceFailure { .. }));
    }
}
