//! Closed-form reference values for the single-factor GBM exposure.
//!
//! With X(0) = 1 and MTM = N(X(t) − 1), the counterparty exposure is a
//! call on X struck at 1, so
//!
//! ```text
//! EE(t) = N × (e^{μt} Φ(d₁) − Φ(d₂))
//! d₁ = (μt + ½σ²t) / (σ√t),  d₂ = d₁ − σ√t
//! ```

use pricer_pricing::mc::TimeGrid;
use std::f64::consts::SQRT_2;

/// Complementary error function, Abramowitz and Stegun 7.1.26
/// (max error 1.5e-7).
#[inline]
fn erfc_approx(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let abs_x = x.abs();
    let t = 1.0 / (1.0 + P * abs_x);
    let poly = A1 + t * (A2 + t * (A3 + t * (A4 + t * A5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    if x < 0.0 {
        2.0 - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// # Examples
///
/// ```
/// use pricer_xva::report::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0) < 0.01);
/// assert!(norm_cdf(3.0) > 0.99);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc_approx(-x / SQRT_2)
}

/// Closed-form counterparty EE at time `t`.
///
/// Degenerate inputs: `t ≤ 0` gives 0; `σ = 0` gives the deterministic
/// exposure `max(0, N(e^{μt} − 1))`.
pub fn analytic_expected_exposure(notional: f64, drift: f64, volatility: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    let forward = (drift * t).exp();
    if volatility == 0.0 {
        return (notional * (forward - 1.0)).max(0.0);
    }

    let vol_sqrt_t = volatility * t.sqrt();
    let d1 = (drift * t + 0.5 * volatility * volatility * t) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;
    notional * (forward * norm_cdf(d1) - norm_cdf(d2))
}

/// Closed-form EE on every point of `grid`.
pub fn analytic_ee_curve(notional: f64, drift: f64, volatility: f64, grid: &TimeGrid) -> Vec<f64> {
    grid.times()
        .into_iter()
        .map(|t| analytic_expected_exposure(notional, drift, volatility, t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_norm_cdf_symmetry() {
        for x in [0.1, 0.5, 1.0, 2.0, 3.5] {
            assert_relative_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-7);
        }
        assert_relative_eq!(norm_cdf(1.959964), 0.975, epsilon = 1e-6);
    }

    #[test]
    fn test_at_the_money_ee() {
        // μ = 0: EE = N(2Φ(σ√t/2) − 1)
        let ee = analytic_expected_exposure(1e8, 0.0, 0.2, 1.0);
        let expected = 1e8 * (2.0 * norm_cdf(0.1) - 1.0);
        assert_relative_eq!(ee, expected, max_relative = 1e-9);
        assert!(ee > 7.9e6 && ee < 8.0e6);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(analytic_expected_exposure(1e8, 0.05, 0.2, 0.0), 0.0);
        assert_eq!(analytic_expected_exposure(1e8, 0.0, 0.0, 2.0), 0.0);
        assert_relative_eq!(
            analytic_expected_exposure(100.0, 0.05, 0.0, 1.0),
            100.0 * (0.05_f64.exp() - 1.0)
        );
    }

    #[test]
    fn test_curve_starts_at_zero_and_grows() {
        let grid = TimeGrid::from_tenor(1.0);
        let curve = analytic_ee_curve(1.0, 0.0, 0.3, &grid);
        assert_eq!(curve[0], 0.0);
        for pair in curve[1..].windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }
}
