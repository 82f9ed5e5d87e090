//! Least-squares polynomial model of an order's row position versus column.
//!
//! Columns are mapped to `t ∈ [-1, 1]` over the fitting domain before the
//! Vandermonde system is built; with detector widths in the thousands, raw
//! powers of the column index would make a quartic design matrix
//! ill-conditioned. The system is solved through an SVD.

use super::error::TraceError;
use log::warn;
use nalgebra::{DMatrix, DVector};
use serde::Serialize;

/// Ratio of smallest to largest singular value below which the design matrix
/// is treated as rank deficient.
const RCOND: f64 = 1e-12;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Polynomial {
    /// Coefficients in ascending powers of the normalised column `t`.
    coeffs: Vec<f64>,
    x_offset: f64,
    x_scale: f64,
}

impl Polynomial {
    /// Fit `ys ≈ p(xs)` with a polynomial of `degree`.
    ///
    /// `domain` is the closed column interval used for normalisation, usually
    /// `(0, width - 1)`. At least `degree + 1` samples are needed.
    pub fn fit(
        xs: &[f64],
        ys: &[f64],
        degree: usize,
        domain: (f64, f64),
    ) -> Result<Self, TraceError> {
        debug_assert_eq!(xs.len(), ys.len());
        let n = xs.len();
        let required = degree + 1;
        if n < required {
            return Err(TraceError::InsufficientData { found: n, required });
        }

        let x_offset = 0.5 * (domain.0 + domain.1);
        let half = 0.5 * (domain.1 - domain.0);
        let x_scale = if half > 0.0 { half } else { 1.0 };

        let a = DMatrix::from_fn(n, required, |i, j| {
            ((xs[i] - x_offset) / x_scale).powi(j as i32)
        });
        let b = DVector::from_column_slice(ys);

        let svd = a.svd(true, true);
        let s = &svd.singular_values;
        let s_max = s.max();
        if s_max <= 0.0 || s.min() / s_max < RCOND {
            warn!("polynomial fit: design matrix is rank deficient ({n} points, degree {degree})");
            return Err(TraceError::SingularFit { points: n, degree });
        }
        let sol = svd
            .solve(&b, RCOND * s_max)
            .map_err(|_| TraceError::SingularFit { points: n, degree })?;

        Ok(Self {
            coeffs: sol.iter().copied().collect(),
            x_offset,
            x_scale,
        })
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Coefficients in ascending powers of `(x - offset) / scale`.
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    /// Evaluate at column `x` (Horner scheme).
    pub fn eval(&self, x: f64) -> f64 {
        let t = (x - self.x_offset) / self.x_scale;
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * t + c)
    }

    pub fn rms_residual(&self, xs: &[f64], ys: &[f64]) -> f64 {
        if xs.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| (self.eval(x) - y).powi(2))
            .sum();
        (sum_sq / xs.len() as f64).sqrt()
    }
}
