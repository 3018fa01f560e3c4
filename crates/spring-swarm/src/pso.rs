// ─────────────────────────────────────────────────────────────────────
// Spiral Spring Core — Particle Swarm Optimizer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Constrained particle swarm.
//!
//! Particles move under inertia plus random pulls towards their own best
//! and the swarm best. A best only updates at feasible points, so the
//! constraints steer the swarm without a penalty term in the objective.
//!
//! Random draws happen on one seeded generator in particle order; only the
//! problem evaluations run in parallel. A fixed seed therefore reproduces a
//! run exactly regardless of thread count.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use spring_core::optimizer::{ConstrainedProblem, OptimizationOutcome, Optimizer, Termination};
use spring_types::config::SwarmConfig;
use spring_types::error::{SpringError, SpringResult};

#[derive(Debug, Clone)]
struct Particle {
    position: Vec<f64>,
    velocity: Vec<f64>,
    best_position: Vec<f64>,
    /// `INFINITY` until the particle has visited a feasible point.
    best_objective: f64,
}

/// Swarm-best position and objective.
#[derive(Debug, Clone)]
struct SwarmBest {
    position: Vec<f64>,
    objective: f64,
}

/// Particle swarm minimizer for [`ConstrainedProblem`]s.
#[derive(Debug, Clone)]
pub struct ParticleSwarm {
    config: SwarmConfig,
}

impl ParticleSwarm {
    pub fn new(config: SwarmConfig) -> Self {
        ParticleSwarm { config }
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Objective and feasibility of every particle, in particle order.
    fn score<P: ConstrainedProblem>(&self, problem: &P, particles: &[Particle]) -> Vec<(f64, bool)> {
        let tol = self.config.equality_tolerance;
        particles
            .par_iter()
            .map(|p| {
                let e = problem.evaluate(&p.position);
                (e.objective, e.is_feasible(tol))
            })
            .collect()
    }
}

impl Default for ParticleSwarm {
    fn default() -> Self {
        ParticleSwarm::new(SwarmConfig::default())
    }
}

fn box_corners<P: ConstrainedProblem>(problem: &P) -> SpringResult<(Vec<f64>, Vec<f64>)> {
    let dim = problem.dimension();
    let (lower, upper) = problem.bounds();
    if lower.len() != dim || upper.len() != dim {
        return Err(SpringError::ConfigError(format!(
            "bounds have {} lower and {} upper entries for a {dim}-dimensional problem",
            lower.len(),
            upper.len()
        )));
    }
    for (i, (lo, hi)) in lower.iter().zip(&upper).enumerate() {
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(SpringError::ConfigError(format!(
                "bounds of dimension {i} are not a finite interval: [{lo}, {hi}]"
            )));
        }
    }
    Ok((lower, upper))
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Records feasible improvements as particle bests.
fn update_particle_bests(particles: &mut [Particle], scores: &[(f64, bool)]) {
    for (p, &(f, feasible)) in particles.iter_mut().zip(scores) {
        if feasible && f < p.best_objective {
            p.best_objective = f;
            p.best_position.clone_from(&p.position);
        }
    }
}

/// Index of the particle holding the lowest feasible best, first on ties.
fn leader(particles: &[Particle]) -> Option<usize> {
    let mut leader: Option<usize> = None;
    for (i, p) in particles.iter().enumerate() {
        if !p.best_objective.is_finite() {
            continue;
        }
        if leader.map_or(true, |j| p.best_objective < particles[j].best_objective) {
            leader = Some(i);
        }
    }
    leader
}

impl Optimizer for ParticleSwarm {
    fn minimize<P: ConstrainedProblem>(&self, problem: &P) -> SpringResult<OptimizationOutcome> {
        self.config.validate()?;
        let (lower, upper) = box_corners(problem)?;
        let span: Vec<f64> = lower.iter().zip(&upper).map(|(lo, hi)| hi - lo).collect();
        let cfg = &self.config;
        let mut rng = self.rng();

        let mut particles: Vec<Particle> = (0..cfg.swarm_size)
            .map(|_| {
                let position: Vec<f64> = lower
                    .iter()
                    .zip(&span)
                    .map(|(lo, s)| lo + rng.gen::<f64>() * s)
                    .collect();
                let velocity = span
                    .iter()
                    .map(|s| -s + rng.gen::<f64>() * 2.0 * s)
                    .collect();
                Particle {
                    best_position: position.clone(),
                    position,
                    velocity,
                    best_objective: f64::INFINITY,
                }
            })
            .collect();

        let scores = self.score(problem, &particles);
        let mut evaluations = particles.len();
        update_particle_bests(&mut particles, &scores);
        let mut best: Option<SwarmBest> = leader(&particles).map(|i| SwarmBest {
            position: particles[i].best_position.clone(),
            objective: particles[i].best_objective,
        });

        let mut termination = Termination::MaxIterations;
        let mut iterations = 0;
        for iteration in 1..=cfg.max_iterations {
            iterations = iteration;

            for p in particles.iter_mut() {
                for d in 0..span.len() {
                    let r_p: f64 = rng.gen();
                    let r_g: f64 = rng.gen();
                    let mut v = cfg.inertia * p.velocity[d]
                        + cfg.cognitive * r_p * (p.best_position[d] - p.position[d]);
                    if let Some(g) = &best {
                        v += cfg.social * r_g * (g.position[d] - p.position[d]);
                    }
                    p.velocity[d] = v.clamp(-span[d], span[d]);
                    p.position[d] = (p.position[d] + p.velocity[d]).clamp(lower[d], upper[d]);
                }
            }

            let scores = self.score(problem, &particles);
            evaluations += particles.len();
            update_particle_bests(&mut particles, &scores);

            tracing::trace!(
                iteration,
                evaluations,
                best = best.as_ref().map_or(f64::INFINITY, |g| g.objective),
                "swarm iteration"
            );
            let Some(i) = leader(&particles) else {
                continue;
            };
            let candidate = &particles[i];
            let Some(g) = &best else {
                tracing::debug!(
                    iteration,
                    objective = candidate.best_objective,
                    "first feasible point found"
                );
                best = Some(SwarmBest {
                    position: candidate.best_position.clone(),
                    objective: candidate.best_objective,
                });
                continue;
            };
            if candidate.best_objective >= g.objective {
                continue;
            }
            let step = distance(&g.position, &candidate.best_position);
            let change = g.objective - candidate.best_objective;
            tracing::debug!(
                iteration,
                objective = candidate.best_objective,
                step,
                change,
                "swarm best improved"
            );
            best = Some(SwarmBest {
                position: candidate.best_position.clone(),
                objective: candidate.best_objective,
            });
            if change <= cfg.min_objective_change {
                termination = Termination::MinObjectiveChange;
                break;
            }
            if step <= cfg.min_step {
                termination = Termination::MinStep;
                break;
            }
        }

        let Some(best) = best else {
            tracing::warn!(
                iterations,
                evaluations,
                "particle swarm found no feasible point"
            );
            return Err(SpringError::ConvergenceFailure {
                message: "no feasible point found".to_string(),
                iterations,
                evaluations,
            });
        };

        tracing::info!(
            iterations,
            evaluations,
            objective = best.objective,
            termination = %termination,
            "particle swarm finished"
        );
        Ok(OptimizationOutcome {
            x: best.position,
            objective: best.objective,
            termination,
            message: termination.to_string(),
            iterations,
            evaluations,
        })
    }
}
