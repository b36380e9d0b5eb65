//! Risk-factor path generation for exposure simulation.
//!
//! This module implements single-factor Geometric Brownian Motion on the
//! daily grid using the log-space (exact) step:
//!
//! ```text
//! X(s) = X(s−1) × exp((μ − ½σ²)·dt + σ·√dt·Z)
//! ```
//!
//! with X(0) = 1. Mark-to-market is `notional × (X(s) − 1)`; counterparty
//! exposure is its positive part and own exposure the positive part of its
//! negation.

use super::grid::TimeGrid;
use crate::rng::NormalSampler;

/// Which side of the trade an exposure is measured from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExposureSide {
    /// Exposure to the counterparty: `max(0, MTM)`.
    Counterparty,
    /// Exposure of the counterparty to us: `max(0, −MTM)`.
    Own,
}

impl ExposureSide {
    /// Exposure seen from this side for a mark-to-market value.
    ///
    /// Zero MTM maps to `+0.0` on both sides.
    #[inline]
    pub fn exposure(self, mtm: f64) -> f64 {
        match self {
            Self::Counterparty => {
                if mtm > 0.0 {
                    mtm
                } else {
                    0.0
                }
            }
            Self::Own => {
                if mtm < 0.0 {
                    -mtm
                } else {
                    0.0
                }
            }
        }
    }
}

/// Parameters of the normalised GBM risk factor.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmParams;
///
/// let params = GbmParams::new(0.0, 0.2);
/// let (drift_dt, vol_sqrt_dt) = params.step_coefficients(1.0 / 252.0);
/// assert!(drift_dt < 0.0);
/// assert!(vol_sqrt_dt > 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Drift (μ) - annualised.
    pub drift: f64,
    /// Volatility (σ) - annualised.
    pub volatility: f64,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(drift: f64, volatility: f64) -> Self {
        Self { drift, volatility }
    }

    /// Returns `true` if both parameters are finite and σ ≥ 0.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.drift.is_finite() && self.volatility.is_finite() && self.volatility >= 0.0
    }

    /// Precomputed `((μ − ½σ²)·dt, σ·√dt)` for a step of size `dt`.
    #[inline]
    pub fn step_coefficients(&self, dt: f64) -> (f64, f64) {
        let drift_dt = (self.drift - 0.5 * self.volatility * self.volatility) * dt;
        let vol_sqrt_dt = self.volatility * dt.sqrt();
        (drift_dt, vol_sqrt_dt)
    }
}

/// One simulated risk-factor path and the notional it is scaled by.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatedPath {
    risk_factor: Vec<f64>,
    notional: f64,
}

impl SimulatedPath {
    /// Wraps a risk-factor sequence.
    pub fn new(risk_factor: Vec<f64>, notional: f64) -> Self {
        Self {
            risk_factor,
            notional,
        }
    }

    /// Risk-factor values X(s), `s = 0..=num_steps`.
    #[inline]
    pub fn risk_factor(&self) -> &[f64] {
        &self.risk_factor
    }

    /// Number of grid points on the path.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.risk_factor.len()
    }

    /// Notional the path is scaled by.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Mark-to-market at `step`: `notional × (X(step) − 1)`.
    #[inline]
    pub fn mtm(&self, step: usize) -> f64 {
        self.notional * (self.risk_factor[step] - 1.0)
    }

    /// Exposure from `side` at `step`.
    #[inline]
    pub fn exposure(&self, side: ExposureSide, step: usize) -> f64 {
        side.exposure(self.mtm(step))
    }

    /// Full exposure sequence from `side`.
    pub fn exposures(&self, side: ExposureSide) -> Vec<f64> {
        (0..self.risk_factor.len())
            .map(|s| self.exposure(side, s))
            .collect()
    }

    /// Exposure at the last grid point.
    #[inline]
    pub fn terminal_exposure(&self, side: ExposureSide) -> f64 {
        self.exposure(side, self.risk_factor.len() - 1)
    }
}

/// Simulates one risk-factor path on `grid`.
///
/// Draws exactly one normal variate per step, including when σ = 0, so the
/// sampler is advanced identically whatever the volatility.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{simulate_path, ExposureSide, GbmParams, TimeGrid};
/// use pricer_pricing::rng::PricerRng;
///
/// let grid = TimeGrid::from_tenor(1.0);
/// let mut rng = PricerRng::from_seed(7);
/// let path = simulate_path(&GbmParams::new(0.0, 0.2), 1_000_000.0, &grid, &mut rng);
///
/// assert_eq!(path.len(), 253);
/// assert_eq!(path.risk_factor()[0], 1.0);
/// assert_eq!(path.exposure(ExposureSide::Counterparty, 0), 0.0);
/// ```
pub fn simulate_path<S: NormalSampler>(
    params: &GbmParams,
    notional: f64,
    grid: &TimeGrid,
    sampler: &mut S,
) -> SimulatedPath {
    let (drift_dt, vol_sqrt_dt) = params.step_coefficients(grid.dt());

    let mut risk_factor = Vec::with_capacity(grid.len());
    let mut x = 1.0_f64;
    risk_factor.push(x);

    for _ in 0..grid.num_steps() {
        let z = sampler.sample();
        x *= (drift_dt + vol_sqrt_dt * z).exp();
        risk_factor.push(x);
    }

    SimulatedPath::new(risk_factor, notional)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PricerRng;
    use approx::assert_relative_eq;

    /// Sampler returning a fixed sequence, for hand-checked paths.
    struct FixedSampler {
        draws: Vec<f64>,
        next: usize,
    }

    impl NormalSampler for FixedSampler {
        fn sample(&mut self) -> f64 {
            let z = self.draws[self.next % self.draws.len()];
            self.next += 1;
            z
        }
    }

    #[test]
    fn test_exposure_side() {
        assert_eq!(ExposureSide::Counterparty.exposure(5.0), 5.0);
        assert_eq!(ExposureSide::Counterparty.exposure(-5.0), 0.0);
        assert_eq!(ExposureSide::Own.exposure(-5.0), 5.0);
        assert_eq!(ExposureSide::Own.exposure(5.0), 0.0);

        // Zero MTM is +0.0 on both sides.
        assert!(ExposureSide::Counterparty.exposure(-0.0).is_sign_positive());
        assert!(ExposureSide::Own.exposure(0.0).is_sign_positive());
    }

    #[test]
    fn test_path_matches_hand_computation() {
        let params = GbmParams::new(0.05, 0.2);
        let grid = TimeGrid::with_steps(3);
        let mut sampler = FixedSampler {
            draws: vec![1.0, -0.5, 0.25],
            next: 0,
        };

        let path = simulate_path(&params, 100.0, &grid, &mut sampler);

        let dt: f64 = 1.0 / 252.0;
        let (a, b) = ((0.05 - 0.5 * 0.04) * dt, 0.2 * dt.sqrt());
        let x1 = (a + b * 1.0).exp();
        let x2 = x1 * (a + b * -0.5).exp();
        let x3 = x2 * (a + b * 0.25).exp();

        assert_eq!(path.risk_factor(), &[1.0, x1, x2, x3]);
        assert_relative_eq!(path.mtm(1), 100.0 * (x1 - 1.0));
        assert_eq!(path.exposure(ExposureSide::Own, 1), 0.0);
        assert_eq!(sampler.next, 3);
    }

    #[test]
    fn test_zero_volatility_is_deterministic() {
        let params = GbmParams::new(0.0, 0.0);
        let grid = TimeGrid::from_tenor(1.0);
        let mut rng = PricerRng::from_seed(1);

        let path = simulate_path(&params, 1e8, &grid, &mut rng);
        assert!(path.risk_factor().iter().all(|&x| x == 1.0));
        assert!(path
            .exposures(ExposureSide::Counterparty)
            .iter()
            .all(|&e| e == 0.0));
    }

    #[test]
    fn test_zero_volatility_with_drift() {
        let params = GbmParams::new(0.03, 0.0);
        let grid = TimeGrid::from_tenor(2.0);
        let mut rng = PricerRng::from_seed(1);

        let path = simulate_path(&params, 1.0, &grid, &mut rng);
        for s in 0..grid.len() {
            let expected = (0.03 * grid.time(s)).exp();
            assert_relative_eq!(path.risk_factor()[s], expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_counterparty_and_own_are_complementary() {
        let params = GbmParams::new(0.0, 0.3);
        let grid = TimeGrid::from_tenor(0.5);
        let mut rng = PricerRng::from_seed(11);
        let path = simulate_path(&params, 1e6, &grid, &mut rng);

        for s in 0..path.len() {
            let cp = path.exposure(ExposureSide::Counterparty, s);
            let own = path.exposure(ExposureSide::Own, s);
            assert!(cp >= 0.0 && own >= 0.0);
            assert!(cp == 0.0 || own == 0.0);
            assert_relative_eq!(cp - own, path.mtm(s));
        }
        assert_eq!(
            path.terminal_exposure(ExposureSide::Counterparty),
            path.exposure(ExposureSide::Counterparty, path.len() - 1)
        );
    }

    #[test]
    fn test_gbm_params_validity() {
        assert!(GbmParams::new(0.0, 0.2).is_valid());
        assert!(!GbmParams::new(0.0, -0.2).is_valid());
        assert!(!GbmParams::new(f64::NAN, 0.2).is_valid());
    }
}
