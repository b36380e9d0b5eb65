//! Cost-of-risk curves: discount factors, a flat cost rate and an optional
//! accrual horizon.

use pricer_pricing::mc::TimeGrid;

/// Generates flat discount factors `DF(t) = exp(−r·t)` for each time point.
///
/// # Examples
///
/// ```
/// use pricer_xva::xva::generate_flat_discount_factors;
///
/// let df = generate_flat_discount_factors(0.03, &[0.0, 1.0]);
/// assert_eq!(df[0], 1.0);
/// assert!((df[1] - (-0.03_f64).exp()).abs() < 1e-15);
/// ```
pub fn generate_flat_discount_factors(rate: f64, times: &[f64]) -> Vec<f64> {
    times.iter().map(|&t| (-rate * t).exp()).collect()
}

/// Per-step cost term for one adjustment.
///
/// `cost(s)` is the flat rate up to and including the horizon step, and zero
/// after it. Without a horizon the rate applies over the whole grid.
#[derive(Clone, Debug, PartialEq)]
pub struct CostCurve {
    discount_factors: Vec<f64>,
    rate: f64,
    horizon_step: Option<usize>,
}

impl CostCurve {
    /// Cost curve over the full grid.
    pub fn new(discount_factors: Vec<f64>, rate: f64) -> Self {
        Self {
            discount_factors,
            rate,
            horizon_step: None,
        }
    }

    /// Flat-rate discounting on `grid`.
    pub fn flat(grid: &TimeGrid, discount_rate: f64, rate: f64) -> Self {
        Self::new(
            generate_flat_discount_factors(discount_rate, &grid.times()),
            rate,
        )
    }

    /// Restricts accrual to steps `0..=step`.
    pub fn with_horizon_step(mut self, step: usize) -> Self {
        self.horizon_step = Some(step);
        self
    }

    /// Number of grid points covered.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.discount_factors.len()
    }

    /// Annual cost rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Discount factors on the grid.
    #[inline]
    pub fn discount_factors(&self) -> &[f64] {
        &self.discount_factors
    }

    /// Last step that accrues cost, clamped to the grid.
    #[inline]
    pub fn horizon_step(&self) -> usize {
        let last = self.discount_factors.len().saturating_sub(1);
        self.horizon_step.map_or(last, |h| h.min(last))
    }

    /// Cost rate at `step`.
    #[inline]
    pub fn cost(&self, step: usize) -> f64 {
        if step <= self.horizon_step() {
            self.rate
        } else {
            0.0
        }
    }
}
