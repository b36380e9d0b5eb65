//! Exposure-curve properties on simulated ensembles.
//!
//! # Test Categories
//!
//! 1. **Boundary values**: EE(0) = PFE(0) = 0 on both sides
//! 2. **Monotonicity**: EE grows with volatility on common random numbers
//! 3. **Quantiles**: PFE at confidence 1.0 is the cross-path maximum
//! 4. **Degenerate volatility**: σ = 0 collapses EE and PFE onto the
//!    deterministic exposure

use approx::assert_relative_eq;
use pricer_pricing::mc::{simulate_ensemble, CancellationToken, ExposureSide, PathEnsemble, ScenarioConfig};
use pricer_xva::exposure::ExposureAggregator;
use proptest::prelude::*;

fn ensemble(volatility: f64, drift: f64, tenor: f64, n_paths: usize, seed: u64) -> PathEnsemble {
    let config = ScenarioConfig::builder()
        .notional(100_000_000.0)
        .tenor(tenor)
        .volatility(volatility)
        .drift(drift)
        .n_paths(n_paths)
        .seed(seed)
        .build()
        .unwrap();
    simulate_ensemble(&config, &CancellationToken::new()).unwrap()
}

#[test]
fn test_exposure_starts_at_zero() {
    let ensemble = ensemble(0.3, 0.02, 1.0, 1_000, 11);
    let bilateral = ExposureAggregator::new(0.95)
        .unwrap()
        .aggregate_bilateral(&ensemble)
        .unwrap();

    for curve in [&bilateral.counterparty, &bilateral.own] {
        assert_eq!(curve.ee[0], 0.0);
        assert_eq!(curve.pfe[0], 0.0);
        assert!(curve.ee[0].is_sign_positive());
    }
}

#[test]
fn test_ee_increases_with_volatility() {
    let aggregator = ExposureAggregator::new(0.95).unwrap();
    let curves: Vec<Vec<f64>> = [0.1, 0.2, 0.3]
        .iter()
        .map(|&vol| {
            aggregator
                .aggregate(&ensemble(vol, 0.0, 1.0, 5_000, 2024), ExposureSide::Counterparty)
                .unwrap()
                .ee
        })
        .collect();

    for step in 1..curves[0].len() {
        assert!(
            curves[0][step] < curves[1][step] && curves[1][step] < curves[2][step],
            "EE not increasing in volatility at step {}",
            step
        );
    }
}

#[test]
fn test_full_confidence_is_maximum() {
    let ensemble = ensemble(0.25, 0.0, 0.5, 500, 5);
    let curve = ExposureAggregator::new(1.0)
        .unwrap()
        .aggregate(&ensemble, ExposureSide::Own)
        .unwrap();

    for step in 0..ensemble.grid().len() {
        let max = ensemble
            .cross_section(ExposureSide::Own, step)
            .into_iter()
            .fold(0.0_f64, f64::max);
        assert_eq!(curve.pfe[step], max);
    }
}

#[test]
fn test_zero_volatility_curves_coincide() {
    let (notional, drift) = (100_000_000.0, 0.05);
    let ensemble = ensemble(0.0, drift, 2.0, 1_000, 9);
    let grid = *ensemble.grid();
    let curve = ExposureAggregator::new(0.95)
        .unwrap()
        .aggregate(&ensemble, ExposureSide::Counterparty)
        .unwrap();

    for step in 1..grid.len() {
        let deterministic = notional * ((drift * grid.time(step)).exp() - 1.0);
        assert_eq!(curve.ee[step], curve.pfe[step]);
        assert_relative_eq!(curve.pfe[step], deterministic, max_relative = 1e-9);
    }
}

#[test]
fn test_pfe_dominates_ee_at_high_confidence() {
    let ensemble = ensemble(0.2, 0.0, 1.0, 2_000, 77);
    let curve = ExposureAggregator::new(0.95)
        .unwrap()
        .aggregate(&ensemble, ExposureSide::Counterparty)
        .unwrap();

    for step in 1..curve.len() {
        assert!(curve.pfe[step] >= curve.ee[step]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// PFE at confidence 1.0 bounds every simulated exposure.
    #[test]
    fn prop_full_confidence_bounds_every_path(seed in any::<u64>(), vol in 0.0..0.6f64) {
        let ensemble = ensemble(vol, 0.0, 0.05, 100, seed);
        let curve = ExposureAggregator::new(1.0)
            .unwrap()
            .aggregate(&ensemble, ExposureSide::Counterparty)
            .unwrap();

        for path in ensemble.paths() {
            for (step, e) in path.exposures(ExposureSide::Counterparty).into_iter().enumerate() {
                prop_assert!(curve.pfe[step] >= e);
            }
        }
    }
}
