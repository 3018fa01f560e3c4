// ─────────────────────────────────────────────────────────────────────
// Spiral Spring Core — Response Surface
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Batched evaluation of stiffness and constraints over sampled grids,
//! for plotting the design space around a result.

use crate::bounds::SearchBounds;
use crate::constraints::{max_radius_constraint, positive_radius_constraint, stress_constraint};
use crate::model::{stiffness, Candidate};
use ndarray::{Array1, Array2, Zip};
use spring_types::config::DesignInputs;
use spring_types::error::{SpringError, SpringResult};

/// Rectangular (thickness, arclength) grid.
///
/// Meshgrid arrays are `[nl, nt]`: arclength along rows, thickness along columns.
#[derive(Debug, Clone)]
pub struct DesignGrid {
    pub nt: usize,
    pub nl: usize,
    pub thickness: Array1<f64>,
    pub arclength: Array1<f64>,
    pub tt: Array2<f64>,
    pub ll: Array2<f64>,
}

impl DesignGrid {
    pub fn new(nt: usize, nl: usize, t_min: f64, t_max: f64, l_min: f64, l_max: f64) -> Self {
        let thickness = Array1::linspace(t_min, t_max, nt);
        let arclength = Array1::linspace(l_min, l_max, nl);
        let tt = Array2::from_shape_fn((nl, nt), |(_, it)| thickness[it]);
        let ll = Array2::from_shape_fn((nl, nt), |(il, _)| arclength[il]);
        DesignGrid {
            nt,
            nl,
            thickness,
            arclength,
            tt,
            ll,
        }
    }

    /// Grid spanning a derived search box.
    pub fn over_bounds(bounds: &SearchBounds, nt: usize, nl: usize) -> Self {
        DesignGrid::new(
            nt,
            nl,
            bounds.thickness.lower,
            bounds.thickness.upper,
            bounds.arclength.lower,
            bounds.arclength.upper,
        )
    }
}

/// Stiffness at paired samples. Non-positive samples give `NaN`.
pub fn stiffness_batch(
    height: f64,
    modulus: f64,
    thickness: &Array1<f64>,
    arclength: &Array1<f64>,
) -> SpringResult<Array1<f64>> {
    if thickness.len() != arclength.len() {
        return Err(SpringError::ConfigError(format!(
            "stiffness batch length mismatch: {} thickness vs {} arclength samples",
            thickness.len(),
            arclength.len()
        )));
    }
    let mut out = Array1::zeros(thickness.len());
    Zip::from(&mut out)
        .and(thickness)
        .and(arclength)
        .for_each(|k, &t, &l| {
            *k = if t > 0.0 && l > 0.0 {
                stiffness(height, modulus, t, l)
            } else {
                f64::NAN
            };
        });
    Ok(out)
}

/// Stiffness and constraint values over a [`DesignGrid`].
///
/// Constraint surfaces carry the penalty value where the model is undefined.
#[derive(Debug, Clone)]
pub struct ResponseSurface {
    pub stiffness: Array2<f64>,
    pub stress: Array2<f64>,
    pub positive_radius: Array2<f64>,
    pub max_radius: Array2<f64>,
}

impl ResponseSurface {
    pub fn evaluate(inputs: &DesignInputs, grid: &DesignGrid) -> Self {
        let candidate = |il: usize, it: usize| {
            Candidate::new(inputs, grid.thickness[it], grid.arclength[il])
        };
        let mut stiffness_map = Array2::zeros((grid.nl, grid.nt));
        Zip::from(&mut stiffness_map)
            .and(&grid.tt)
            .and(&grid.ll)
            .for_each(|k, &t, &l| {
                *k = stiffness(inputs.height, inputs.elastic_modulus, t, l);
            });
        ResponseSurface {
            stiffness: stiffness_map,
            stress: Array2::from_shape_fn((grid.nl, grid.nt), |(il, it)| {
                stress_constraint(inputs, &candidate(il, it))
            }),
            positive_radius: Array2::from_shape_fn((grid.nl, grid.nt), |(il, it)| {
                positive_radius_constraint(inputs, &candidate(il, it))
            }),
            max_radius: Array2::from_shape_fn((grid.nl, grid.nt), |(il, it)| {
                max_radius_constraint(inputs, &candidate(il, it))
            }),
        }
    }

    /// `true` where the stress, ordering and radius-cap constraints all hold.
    pub fn feasible_mask(&self) -> Array2<bool> {
        let mut mask = Array2::from_elem(self.stiffness.raw_dim(), false);
        Zip::from(&mut mask)
            .and(&self.stress)
            .and(&self.positive_radius)
            .and(&self.max_radius)
            .for_each(|m, &s, &p, &r| *m = s >= 0.0 && p >= 0.0 && r >= 0.0);
        mask
    }

    /// Stiffest feasible grid node as `(thickness, arclength, stiffness)`.
    pub fn best_feasible(&self, grid: &DesignGrid) -> Option<(f64, f64, f64)> {
        let mask = self.feasible_mask();
        let mut best: Option<(f64, f64, f64)> = None;
        for ((il, it), &ok) in mask.indexed_iter() {
            if !ok {
                continue;
            }
            let k = self.stiffness[[il, it]];
            if best.map_or(true, |(_, _, b)| k > b) {
                best = Some((grid.thickness[it], grid.arclength[il], k));
            }
        }
        best
    }
}
