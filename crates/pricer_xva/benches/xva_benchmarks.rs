//! Criterion benchmarks for pricer_xva exposure and XVA calculations.
//!
//! Benchmarks cover:
//! - Exposure aggregation (EE, PFE) over simulated ensembles
//! - Matrix-level PFE (sorting per time step)
//! - Adjustment integration, single and all four concurrently
//! - The full engine run

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_pricing::mc::{simulate_ensemble, CancellationToken, ScenarioConfig};
use pricer_xva::exposure::{ExposureAggregator, ExposureCalculator};
use pricer_xva::xva::{compute_cva, generate_flat_discount_factors, CreditParams, XvaCalculator, XvaParams};
use pricer_xva::{run_exposure_simulation, EngineConfig};

fn scenario(n_paths: usize, tenor: f64) -> ScenarioConfig {
    ScenarioConfig::builder()
        .tenor(tenor)
        .n_paths(n_paths)
        .seed(42)
        .build()
        .unwrap()
}

/// Generate synthetic MTM scenarios for matrix benchmarks.
fn generate_value_scenarios(n_scenarios: usize, n_times: usize) -> Vec<Vec<f64>> {
    (0..n_scenarios)
        .map(|s| {
            (0..n_times)
                .map(|t| (((s * 17 + t * 13) % 100) as f64 - 50.0) * 0.3 * t as f64)
                .collect()
        })
        .collect()
}

/// Benchmark bilateral aggregation of a simulated ensemble.
fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");
    group.sample_size(20);

    for n_paths in [1_000, 5_000] {
        let ensemble = simulate_ensemble(&scenario(n_paths, 1.0), &CancellationToken::new()).unwrap();
        let aggregator = ExposureAggregator::new(0.95).unwrap();

        group.bench_with_input(BenchmarkId::new("bilateral", n_paths), &ensemble, |b, ensemble| {
            b.iter(|| aggregator.aggregate_bilateral(black_box(ensemble)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark PFE calculation (includes sorting per time step).
fn bench_potential_future_exposure(c: &mut Criterion) {
    let mut group = c.benchmark_group("potential_future_exposure");
    group.sample_size(50);

    for n_scenarios in [100, 1000, 10000] {
        let values = generate_value_scenarios(n_scenarios, 252);
        group.bench_with_input(BenchmarkId::new("pfe_95", n_scenarios), &values, |b, values| {
            b.iter(|| ExposureCalculator::potential_future_exposure(black_box(values), 0.95));
        });
    }

    group.finish();
}

/// Benchmark a single CVA integration across grid lengths.
fn bench_cva_integration(c: &mut Criterion) {
    let mut group = c.benchmark_group("cva_integration");
    let credit = CreditParams::new(0.01, 0.4).unwrap();

    for n_times in [253, 1261, 2521] {
        let pfe: Vec<f64> = (0..n_times).map(|s| (s as f64).sqrt() * 1e5).collect();
        let times: Vec<f64> = (0..n_times).map(|s| s as f64 / 252.0).collect();
        let df = generate_flat_discount_factors(0.03, &times);

        group.bench_with_input(BenchmarkId::new("cva", n_times), &(pfe, df), |b, (pfe, df)| {
            b.iter(|| compute_cva(black_box(pfe), black_box(df), &credit, 1.0 / 252.0).unwrap());
        });
    }

    group.finish();
}

/// Benchmark all four adjustments on aggregated curves.
fn bench_compute_all(c: &mut Criterion) {
    let ensemble = simulate_ensemble(&scenario(2_000, 5.0), &CancellationToken::new()).unwrap();
    let exposure = ExposureAggregator::new(0.95)
        .unwrap()
        .aggregate_bilateral(&ensemble)
        .unwrap();
    let calculator = XvaCalculator::new(XvaParams::default(), *ensemble.grid()).unwrap();

    c.bench_function("xva_compute_all_5y", |b| {
        b.iter(|| calculator.compute_all(black_box(&exposure)).unwrap());
    });
}

/// Benchmark the full engine run.
fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    group.sample_size(10);

    let config = EngineConfig::builder()
        .scenario(scenario(5_000, 5.0))
        .build()
        .unwrap();
    group.bench_function("default_5000_paths", |b| {
        b.iter(|| run_exposure_simulation(black_box(&config)).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_aggregation,
    bench_potential_future_exposure,
    bench_cva_integration,
    bench_compute_all,
    bench_engine
);
criterion_main!(benches);
