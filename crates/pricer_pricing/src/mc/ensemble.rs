//! Parallel path ensembles.
//!
//! Paths are simulated in fixed-size batches; each batch runs on the rayon
//! pool and the cancellation token is polled between batches. Every path
//! draws from its own stream derived from `(seed, path_index)`, so the
//! ensemble is identical for a given seed whatever the thread count or
//! batch size.

use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::config::ScenarioConfig;
use super::error::ConfigError;
use super::grid::TimeGrid;
use super::paths::{simulate_path, ExposureSide, GbmParams, SimulatedPath};
use crate::rng::PricerRng;

/// Default number of paths per parallel batch.
pub const DEFAULT_BATCH_SIZE: usize = 1024;

/// Cooperative cancellation flag shared between a caller and a running
/// simulation.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Takes effect at the next batch boundary.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Parallel execution settings for ensemble simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Paths per batch; cancellation is checked between batches.
    pub batch_size: usize,
    /// Run batches on the rayon pool. When `false` paths are simulated on
    /// the calling thread.
    pub parallel: bool,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel: true,
        }
    }
}

impl ParallelConfig {
    /// Single-threaded configuration.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Default::default()
        }
    }

    /// Sets the batch size (minimum 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}

/// Simulated risk-factor paths sharing one grid and notional.
///
/// Paths are stored in path order; exposures are derived on demand.
#[derive(Clone, Debug)]
pub struct PathEnsemble {
    paths: Vec<SimulatedPath>,
    grid: TimeGrid,
    seed: u64,
}

impl PathEnsemble {
    /// Assembles an ensemble from already simulated paths.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParameter`] if a path length does not
    /// match the grid.
    pub fn new(paths: Vec<SimulatedPath>, grid: TimeGrid, seed: u64) -> Result<Self, ConfigError> {
        if let Some(bad) = paths.iter().find(|p| p.len() != grid.len()) {
            return Err(ConfigError::invalid(
                "paths",
                format!("path length {} does not match grid length {}", bad.len(), grid.len()),
            ));
        }
        Ok(Self { paths, grid, seed })
    }

    /// Number of simulated paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.paths.len()
    }

    /// Simulation grid.
    #[inline]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Seed the ensemble was generated from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// All paths in path order.
    #[inline]
    pub fn paths(&self) -> &[SimulatedPath] {
        &self.paths
    }

    /// Exposures of every path at `step`, in path order.
    pub fn cross_section(&self, side: ExposureSide, step: usize) -> Vec<f64> {
        self.paths.iter().map(|p| p.exposure(side, step)).collect()
    }

    /// Path-major exposure matrix: one row per path, one column per grid point.
    pub fn exposure_matrix(&self, side: ExposureSide) -> Vec<Vec<f64>> {
        self.paths.iter().map(|p| p.exposures(side)).collect()
    }

    /// Exposures at the last grid point, in path order.
    pub fn terminal_exposures(&self, side: ExposureSide) -> Vec<f64> {
        self.cross_section(side, self.grid.num_steps())
    }
}

/// OS-entropy seed in `[0, i64::MAX]`, so it can be stored in TOML.
pub fn entropy_seed() -> u64 {
    rand::random::<u64>() >> 1
}

/// Simulates the ensemble described by `config` with default parallel
/// settings.
///
/// # Errors
///
/// - [`ConfigError`] if `config` fails validation
/// - [`ConfigError::Cancelled`] if `cancel` is triggered before the last batch
pub fn simulate_ensemble(
    config: &ScenarioConfig,
    cancel: &CancellationToken,
) -> Result<PathEnsemble, ConfigError> {
    simulate_ensemble_with(config, &ParallelConfig::default(), cancel)
}

/// Simulates the ensemble described by `config`.
///
/// Unseeded configurations draw a seed from OS entropy; the seed used is
/// available from [`PathEnsemble::seed`].
///
/// # Errors
///
/// - [`ConfigError`] if `config` fails validation
/// - [`ConfigError::Cancelled`] if `cancel` is triggered before the last batch
pub fn simulate_ensemble_with(
    config: &ScenarioConfig,
    parallel: &ParallelConfig,
    cancel: &CancellationToken,
) -> Result<PathEnsemble, ConfigError> {
    config.validate()?;

    let n_paths = config.effective_n_paths();
    if n_paths < config.n_paths() {
        tracing::warn!(
            requested = config.n_paths(),
            simulated = n_paths,
            "path count clamped to maximum"
        );
    }

    let seed = config.seed().unwrap_or_else(entropy_seed);
    let grid = config.grid();
    let params = GbmParams::new(config.drift(), config.volatility());
    let notional = config.notional();
    let method = config.normal_method();
    let batch_size = parallel.batch_size.max(1);

    tracing::debug!(
        n_paths,
        num_steps = grid.num_steps(),
        seed,
        batch_size,
        parallel = parallel.parallel,
        "simulating path ensemble"
    );
    let start = Instant::now();

    let simulate_one = |index: usize| {
        let mut rng = PricerRng::for_path(seed, index).with_method(method);
        simulate_path(&params, notional, &grid, &mut rng)
    };

    let mut paths: Vec<SimulatedPath> = Vec::with_capacity(n_paths);
    let mut batch_start = 0;
    while batch_start < n_paths {
        if cancel.is_cancelled() {
            tracing::info!(
                completed = batch_start,
                requested = n_paths,
                "path simulation cancelled"
            );
            return Err(ConfigError::Cancelled {
                completed: batch_start,
                requested: n_paths,
            });
        }

        let batch_end = (batch_start + batch_size).min(n_paths);
        if parallel.parallel {
            let batch: Vec<SimulatedPath> = (batch_start..batch_end)
                .into_par_iter()
                .map(simulate_one)
                .collect();
            paths.extend(batch);
        } else {
            paths.extend((batch_start..batch_end).map(simulate_one));
        }
        batch_start = batch_end;
    }

    tracing::debug!(
        n_paths,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "path ensemble complete"
    );

    PathEnsemble::new(paths, grid, seed)
}
