// ─────────────────────────────────────────────────────────────────────
// Spiral Spring Core — Errors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::config::Variable;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpringError {
    /// A model equation left its physical domain (negative radicand,
    /// non-positive angle or radius). The candidate point is invalid.
    #[error("Domain error in {quantity}: {value} is outside the physical domain")]
    Domain { quantity: &'static str, value: f64 },

    #[error("Infeasible bounds for {variable}: lower {lower} exceeds upper {upper}")]
    InfeasibleBounds {
        variable: Variable,
        lower: f64,
        upper: f64,
    },

    #[error("Optimizer found no feasible point after {iterations} iterations ({evaluations} evaluations): {message}")]
    ConvergenceFailure {
        message: String,
        iterations: usize,
        evaluations: usize,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SpringError {
    pub fn domain(quantity: &'static str, value: f64) -> Self {
        SpringError::Domain { quantity, value }
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, SpringError::Domain { .. })
    }
}

pub type SpringResult<T> = Result<T, SpringError>;
