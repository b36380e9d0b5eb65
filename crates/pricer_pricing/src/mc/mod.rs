//! Monte Carlo path simulation for exposure profiles.
//!
//! # Architecture
//!
//! ```text
//! simulate_ensemble()
//! ├── ScenarioConfig     (validated scenario parameters)
//! ├── TimeGrid           (daily grid, 252 steps per year)
//! ├── PricerRng          (one stream per path, derived from the seed)
//! ├── simulate_path()    (log-space GBM step)
//! └── PathEnsemble       (paths in path order, exposures on demand)
//! ```
//!
//! The ensemble is the only input the exposure and XVA layers need; all
//! cross-sectional statistics are computed from it.

mod config;
mod ensemble;
mod error;
mod grid;
mod paths;

pub use config::{
    PathLimits, ScenarioConfig, ScenarioConfigBuilder, MAX_PATHS, MAX_TENOR, MIN_PATHS,
};
pub use ensemble::{
    entropy_seed, simulate_ensemble, simulate_ensemble_with, CancellationToken, ParallelConfig,
    PathEnsemble, DEFAULT_BATCH_SIZE,
};
pub use error::ConfigError;
pub use grid::{TimeGrid, STEPS_PER_YEAR};
pub use paths::{simulate_path, ExposureSide, GbmParams, SimulatedPath};
