//! Particle swarm optimizer for the spiral spring problem.
//!
//! Implements the [`spring_core::optimizer::Optimizer`] contract; any
//! [`spring_core::optimizer::ConstrainedProblem`] can be minimized with it.

pub mod pso;

pub use pso::ParticleSwarm;
