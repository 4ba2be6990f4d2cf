//! Gaussian smoothing for the generated field.
//!
//! The field is blurred once with a 3x3 Gaussian kernel. Near the border
//! some kernel taps fall outside the grid; instead of treating them as zero
//! (which would darken edges and corners) each output cell is divided by
//! the sum of the weights that were actually applied.

use scout_types::{CellPos, Grid};

/// Kernel radius; the kernel spans `2 * RADIUS + 1` cells per axis.
const RADIUS: isize = 1;

/// Kernel width.
const SIZE: usize = 3;

/// A normalized 3x3 Gaussian kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    /// Weights indexed `[row offset + 1][col offset + 1]`, summing to 1.
    weights: [[f64; SIZE]; SIZE],
}

impl GaussianKernel {
    /// Build a kernel with standard deviation `sigma` (in cells).
    ///
    /// `sigma` must be finite and positive; callers validate it up front.
    pub fn new(sigma: f64) -> Self {
        let two_sigma_sq = 2.0 * sigma * sigma;
        let norm = 1.0 / (std::f64::consts::PI * two_sigma_sq);

        let mut weights = [[0.0; SIZE]; SIZE];
        let mut sum = 0.0;
        for (dr, row) in (-RADIUS..=RADIUS).zip(weights.iter_mut()) {
            for (dc, w) in (-RADIUS..=RADIUS).zip(row.iter_mut()) {
                #[allow(clippy::cast_precision_loss)]
                let dist_sq = (dr * dr + dc * dc) as f64;
                *w = norm * (-dist_sq / two_sigma_sq).exp();
                sum += *w;
            }
        }
        if sum > 0.0 {
            for w in weights.iter_mut().flatten() {
                *w /= sum;
            }
        }
        Self { weights }
    }

    /// The weight applied to the neighbour at `(dr, dc)`, each in `-1..=1`.
    pub fn weight(&self, dr: isize, dc: isize) -> Option<f64> {
        let r = usize::try_from(dr.checked_add(RADIUS)?).ok()?;
        let c = usize::try_from(dc.checked_add(RADIUS)?).ok()?;
        self.weights.get(r)?.get(c).copied()
    }

    /// Convolve `grid` with the kernel, renormalizing over the neighbours
    /// present at each position. Returns a new grid of the same shape.
    pub fn apply(&self, grid: &Grid) -> Grid {
        let mut out = grid.clone();
        for (pos, slot) in grid.iter().map(|(p, _)| p).zip(out.values_mut().iter_mut()) {
            *slot = self.smoothed_value(grid, pos);
        }
        out
    }

    fn smoothed_value(&self, grid: &Grid, pos: CellPos) -> f64 {
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;

        for (dr, row) in (-RADIUS..=RADIUS).zip(self.weights.iter()) {
            for (dc, &weight) in (-RADIUS..=RADIUS).zip(row.iter()) {
                let neighbour = pos
                    .row
                    .checked_add_signed(dr)
                    .zip(pos.col.checked_add_signed(dc))
                    .map(|(r, c)| CellPos::new(r, c));
                if let Some(value) = neighbour.and_then(|n| grid.get(n)) {
                    weighted_sum += value * weight;
                    weight_total += weight;
                }
            }
        }

        if weight_total > 0.0 {
            weighted_sum / weight_total
        } else {
            grid.get(pos).unwrap_or(0.0)
        }
    }
}
