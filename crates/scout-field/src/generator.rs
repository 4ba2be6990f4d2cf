//! Synthetic stand-count field generation.
//!
//! A field is built in seven passes, in this exact order:
//!
//! 1. Base draw: every cell from `Normal(base_mean, base_std_dev)`.
//! 2. Perturbation: add `Normal(perturbation_mean, perturbation_std_dev)`
//!    to every cell (drags the field slightly low and widens the spread).
//! 3. Clamp to `[0, max_stand]`.
//! 4. One 3x3 Gaussian smoothing pass (see [`crate::smoothing`]).
//! 5. Anomalies: each cell independently, with `anomaly_probability`,
//!    becomes a uniform integer in `[0, anomaly_ceiling)` (isolated
//!    emergence failures).
//! 6. Low patches: `patch_count` square blocks of `patch_size` cells are
//!    scaled by `patch_factor`.
//! 7. Round every cell to the nearest integer.
//!
//! Each pass finishes over the whole grid before the next begins, so the
//! order of random draws is fixed for a given seed.
//!
//! Replanting uses [`FieldGenerator::generate_single_value`], which is only
//! the base draw, clamped and rounded: no perturbation, no smoothing, no
//! anomalies or patches. Replanted acres are therefore statistically
//! different from original ones.

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use scout_types::{CellPos, Grid};

use crate::error::FieldError;
use crate::smoothing::GaussianKernel;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Tunable parameters for field generation.
///
/// Defaults reproduce the reference corn field: mean stand of 31k plants
/// per acre, capped at 35k.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldParams {
    /// Mean of the base normal draw.
    #[serde(default = "default_base_mean")]
    pub base_mean: f64,

    /// Standard deviation of the base normal draw.
    #[serde(default = "default_base_std_dev")]
    pub base_std_dev: f64,

    /// Mean of the additive perturbation.
    #[serde(default = "default_perturbation_mean")]
    pub perturbation_mean: f64,

    /// Standard deviation of the additive perturbation.
    #[serde(default = "default_perturbation_std_dev")]
    pub perturbation_std_dev: f64,

    /// Upper clamp for every stand count.
    #[serde(default = "default_max_stand")]
    pub max_stand: f64,

    /// Standard deviation of the smoothing kernel, in cells.
    #[serde(default = "default_smoothing_sigma")]
    pub smoothing_sigma: f64,

    /// Per-cell probability of an emergence-failure anomaly.
    #[serde(default = "default_anomaly_probability")]
    pub anomaly_probability: f64,

    /// Anomalous cells take a uniform integer in `[0, anomaly_ceiling)`.
    #[serde(default = "default_anomaly_ceiling")]
    pub anomaly_ceiling: u32,

    /// Number of low-yield patches.
    #[serde(default = "default_patch_count")]
    pub patch_count: u32,

    /// Side length of each square patch, in cells.
    #[serde(default = "default_patch_size")]
    pub patch_size: usize,

    /// Multiplier applied to every cell of a patch.
    #[serde(default = "default_patch_factor")]
    pub patch_factor: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            base_mean: default_base_mean(),
            base_std_dev: default_base_std_dev(),
            perturbation_mean: default_perturbation_mean(),
            perturbation_std_dev: default_perturbation_std_dev(),
            max_stand: default_max_stand(),
            smoothing_sigma: default_smoothing_sigma(),
            anomaly_probability: default_anomaly_probability(),
            anomaly_ceiling: default_anomaly_ceiling(),
            patch_count: default_patch_count(),
            patch_size: default_patch_size(),
            patch_factor: default_patch_factor(),
        }
    }
}

impl FieldParams {
    /// Check every parameter against its valid range.
    pub fn validate(&self) -> Result<(), FieldError> {
        check_finite("base_mean", self.base_mean)?;
        check_non_negative("base_std_dev", self.base_std_dev)?;
        check_finite("perturbation_mean", self.perturbation_mean)?;
        check_non_negative("perturbation_std_dev", self.perturbation_std_dev)?;
        check_positive("max_stand", self.max_stand)?;
        check_positive("smoothing_sigma", self.smoothing_sigma)?;
        check_non_negative("patch_factor", self.patch_factor)?;

        if !(0.0..=1.0).contains(&self.anomaly_probability) {
            return Err(FieldError::InvalidParameter {
                name: "anomaly_probability",
                reason: format!("must be within [0, 1], got {}", self.anomaly_probability),
            });
        }
        if self.anomaly_ceiling == 0 {
            return Err(FieldError::InvalidParameter {
                name: "anomaly_ceiling",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.patch_size == 0 {
            return Err(FieldError::InvalidParameter {
                name: "patch_size",
                reason: "must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), FieldError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FieldError::InvalidParameter {
            name,
            reason: format!("must be finite, got {value}"),
        })
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), FieldError> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(FieldError::InvalidParameter {
            name,
            reason: format!("must not be negative, got {value}"),
        });
    }
    Ok(())
}

fn check_positive(name: &'static str, value: f64) -> Result<(), FieldError> {
    check_finite(name, value)?;
    if value <= 0.0 {
        return Err(FieldError::InvalidParameter {
            name,
            reason: format!("must be positive, got {value}"),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Produces stand-count fields and single replacement values.
///
/// The generator holds only validated parameters and the precomputed
/// smoothing kernel; all randomness comes from the caller's RNG.
#[derive(Debug, Clone)]
pub struct FieldGenerator {
    /// Validated generation parameters.
    params: FieldParams,
    /// Smoothing kernel built from `params.smoothing_sigma`.
    kernel: GaussianKernel,
}

impl FieldGenerator {
    /// Create a generator after validating `params`.
    pub fn new(params: FieldParams) -> Result<Self, FieldError> {
        params.validate()?;
        let kernel = GaussianKernel::new(params.smoothing_sigma);
        Ok(Self { params, kernel })
    }

    /// The parameters this generator was built with.
    pub const fn params(&self) -> &FieldParams {
        &self.params
    }

    /// Generate a `rows x cols` field.
    ///
    /// Every cell of the result is a whole number in `[0, max_stand]`.
    pub fn generate_field(
        &self,
        rows: usize,
        cols: usize,
        rng: &mut impl Rng,
    ) -> Result<Grid, FieldError> {
        if rows == 0 || cols == 0 {
            return Err(FieldError::EmptyField { rows, cols });
        }
        let mut grid =
            Grid::filled(rows, cols, 0.0).ok_or(FieldError::TooLarge { rows, cols })?;
        let p = &self.params;

        for cell in grid.values_mut() {
            *cell = sample_normal(rng, p.base_mean, p.base_std_dev);
        }
        for cell in grid.values_mut() {
            *cell += sample_normal(rng, p.perturbation_mean, p.perturbation_std_dev);
        }
        for cell in grid.values_mut() {
            *cell = self.clamp(*cell);
        }

        let mut grid = self.kernel.apply(&grid);

        let anomalies = self.inject_anomalies(&mut grid, rng);
        let patches = self.apply_patches(&mut grid, rng);

        for cell in grid.values_mut() {
            *cell = cell.round();
        }

        debug!(
            rows,
            cols,
            anomalies,
            patches,
            mean = grid.mean().unwrap_or(0.0),
            "Field generated"
        );
        Ok(grid)
    }

    /// Draw one replacement stand count for a replanted acre.
    ///
    /// Base normal draw, clamped to `[0, max_stand]` and rounded. None of
    /// the later passes of [`generate_field`](Self::generate_field) apply.
    pub fn generate_single_value(&self, rng: &mut impl Rng) -> f64 {
        let p = &self.params;
        self.clamp(sample_normal(rng, p.base_mean, p.base_std_dev)).round()
    }

    fn clamp(&self, value: f64) -> f64 {
        value.clamp(0.0, self.params.max_stand)
    }

    /// Pass 5. Returns the number of anomalous cells.
    fn inject_anomalies(&self, grid: &mut Grid, rng: &mut impl Rng) -> usize {
        let mut count: usize = 0;
        for cell in grid.values_mut() {
            if rng.random::<f64>() < self.params.anomaly_probability {
                *cell = f64::from(rng.random_range(0..self.params.anomaly_ceiling));
                count = count.saturating_add(1);
            }
        }
        count
    }

    /// Pass 6. Returns the number of patches applied.
    ///
    /// The top-left corner is drawn from `[0, rows - size)` x
    /// `[0, cols - size)` (at least one choice per axis); fields smaller
    /// than a patch get none.
    fn apply_patches(&self, grid: &mut Grid, rng: &mut impl Rng) -> u32 {
        let size = self.params.patch_size;
        if grid.rows() < size || grid.cols() < size {
            return 0;
        }
        let row_span = grid.rows().saturating_sub(size).max(1);
        let col_span = grid.cols().saturating_sub(size).max(1);

        // Exclusive upper bound: a patch never starts at `rows - size` or
        // `cols - size`, so the last row and column stay unpatched. Seeded
        // fields depend on this range.
        for _ in 0..self.params.patch_count {
            let start_row = rng.random_range(0..row_span);
            let start_col = rng.random_range(0..col_span);
            for r in start_row..start_row.saturating_add(size) {
                for c in start_col..start_col.saturating_add(size) {
                    if let Some(cell) = grid.get_mut(CellPos::new(r, c)) {
                        *cell *= self.params.patch_factor;
                    }
                }
            }
        }
        self.params.patch_count
    }
}

/// One draw from `Normal(mean, std_dev)`.
fn sample_normal(rng: &mut impl Rng, mean: f64, std_dev: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    std_dev.mul_add(z, mean)
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_base_mean() -> f64 {
    31.0
}

const fn default_base_std_dev() -> f64 {
    5.0
}

const fn default_perturbation_mean() -> f64 {
    -2.0
}

const fn default_perturbation_std_dev() -> f64 {
    2.0
}

const fn default_max_stand() -> f64 {
    35.0
}

const fn default_smoothing_sigma() -> f64 {
    0.5
}

const fn default_anomaly_probability() -> f64 {
    0.02
}

const fn default_anomaly_ceiling() -> u32 {
    10
}

const fn default_patch_count() -> u32 {
    2
}

const fn default_patch_size() -> usize {
    2
}

const fn default_patch_factor() -> f64 {
    0.9
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn generator() -> FieldGenerator {
        FieldGenerator::new(FieldParams::default()).unwrap()
    }

    fn assert_in_bounds(grid: &Grid) {
        for (pos, v) in grid.iter() {
            assert!((0.0..=35.0).contains(&v), "cell {pos} out of range: {v}");
            assert_eq!(v, v.round(), "cell {pos} not integral: {v}");
        }
    }

    #[test]
    fn defaults_validate() {
        assert!(FieldParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_invalid_parameters() {
        let bad = [
            FieldParams { base_std_dev: -1.0, ..FieldParams::default() },
            FieldParams { max_stand: 0.0, ..FieldParams::default() },
            FieldParams { smoothing_sigma: f64::NAN, ..FieldParams::default() },
            FieldParams { anomaly_probability: 1.5, ..FieldParams::default() },
            FieldParams { anomaly_ceiling: 0, ..FieldParams::default() },
            FieldParams { patch_size: 0, ..FieldParams::default() },
        ];
        for params in bad {
            assert!(
                matches!(FieldGenerator::new(params), Err(FieldError::InvalidParameter { .. })),
            );
        }
    }

    #[test]
    fn generated_field_is_bounded_and_integral() {
        let generator = generator();
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let grid = generator.generate_field(7, 10, &mut rng).unwrap();
            assert_eq!(grid.rows(), 7);
            assert_eq!(grid.cols(), 10);
            assert_in_bounds(&grid);
        }
    }

    #[test]
    fn same_seed_same_field() {
        let generator = generator();
        let a = generator
            .generate_field(7, 10, &mut ChaCha8Rng::seed_from_u64(2024))
            .unwrap();
        let b = generator
            .generate_field(7, 10, &mut ChaCha8Rng::seed_from_u64(2024))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let generator = generator();
        let a = generator
            .generate_field(7, 10, &mut ChaCha8Rng::seed_from_u64(1))
            .unwrap();
        let b = generator
            .generate_field(7, 10, &mut ChaCha8Rng::seed_from_u64(2))
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_dimensions_are_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            generator().generate_field(0, 10, &mut rng),
            Err(FieldError::EmptyField { rows: 0, cols: 10 })
        ));
        assert!(generator().generate_field(3, 0, &mut rng).is_err());
    }

    #[test]
    fn tiny_fields_still_generate() {
        let generator = generator();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for (rows, cols) in [(1, 1), (1, 5), (2, 2), (3, 1)] {
            let grid = generator.generate_field(rows, cols, &mut rng).unwrap();
            assert_eq!(grid.len(), rows * cols);
            assert_in_bounds(&grid);
        }
    }

    #[test]
    fn single_value_is_bounded_and_integral() {
        let generator = generator();
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        for _ in 0..2_000 {
            let v = generator.generate_single_value(&mut rng);
            assert!((0.0..=35.0).contains(&v));
            assert_eq!(v, v.round());
        }
    }

    #[test]
    fn certain_anomalies_stay_below_ceiling() {
        let params = FieldParams {
            anomaly_probability: 1.0,
            patch_count: 0,
            ..FieldParams::default()
        };
        let generator = FieldGenerator::new(params).unwrap();
        let grid = generator
            .generate_field(7, 10, &mut ChaCha8Rng::seed_from_u64(5))
            .unwrap();
        assert!(grid.values().iter().all(|&v| v < 10.0));
    }

    #[test]
    fn zero_variance_field_is_flat_after_perturbation() {
        let params = FieldParams {
            base_std_dev: 0.0,
            perturbation_std_dev: 0.0,
            anomaly_probability: 0.0,
            patch_count: 0,
            ..FieldParams::default()
        };
        let generator = FieldGenerator::new(params).unwrap();
        let grid = generator
            .generate_field(4, 4, &mut ChaCha8Rng::seed_from_u64(3))
            .unwrap();
        // 31 - 2 = 29 everywhere; smoothing a flat field is a no-op.
        assert!(grid.values().iter().all(|&v| v == 29.0));
    }

    #[test]
    fn patches_lower_a_flat_field() {
        let params = FieldParams {
            base_std_dev: 0.0,
            perturbation_std_dev: 0.0,
            anomaly_probability: 0.0,
            ..FieldParams::default()
        };
        let generator = FieldGenerator::new(params).unwrap();
        let grid = generator
            .generate_field(7, 10, &mut ChaCha8Rng::seed_from_u64(11))
            .unwrap();
        // 29 * 0.9 = 26.1 rounds to 26; overlapping patches give 29 * 0.81 = 23.49 -> 23.
        let lowered = grid.values().iter().filter(|&&v| v < 29.0).count();
        assert!((1..=8).contains(&lowered), "expected patch cells, got {lowered}");
        assert!(grid.values().iter().all(|&v| v == 29.0 || v == 26.0 || v == 23.0));
    }

    #[test]
    fn patches_never_touch_the_last_row_or_column() {
        let params = FieldParams {
            base_std_dev: 0.0,
            perturbation_std_dev: 0.0,
            anomaly_probability: 0.0,
            ..FieldParams::default()
        };
        let generator = FieldGenerator::new(params).unwrap();
        for seed in 0..100 {
            let grid = generator
                .generate_field(7, 10, &mut ChaCha8Rng::seed_from_u64(seed))
                .unwrap();
            for (pos, v) in grid.iter().filter(|(p, _)| p.row == 6 || p.col == 9) {
                assert_eq!(v, 29.0, "seed {seed}: cell {pos} was patched");
            }
        }

        // A 3x3 field leaves exactly one corner choice: the top-left block.
        let grid = generator
            .generate_field(3, 3, &mut ChaCha8Rng::seed_from_u64(0))
            .unwrap();
        assert_eq!(
            grid.to_rows(),
            vec![
                vec![23.0, 23.0, 29.0],
                vec![23.0, 23.0, 29.0],
                vec![29.0, 29.0, 29.0],
            ]
        );
    }
}
