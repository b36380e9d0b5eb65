//! Engine entry point: configuration in, curves and adjustments out.
//!
//! ```text
//! EngineConfig ─validate─► simulate_ensemble ─► ExposureAggregator
//!                                                   │
//!                           XvaResult ◄─ XvaCalculator
//! ```
//!
//! Every call is a pure function of the configuration and the seed; nothing
//! is cached between calls.

use pricer_pricing::mc::{
    simulate_ensemble_with, CancellationToken, ConfigError, ExposureSide, ParallelConfig,
    ScenarioConfig, TimeGrid,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;

use crate::exposure::{BilateralExposure, ExposureAggregator};
use crate::report::{ExposureSummary, Histogram, DEFAULT_BINS};
use crate::xva::{CreditParams, FundingParams, LiquidityParams, XvaCalculator, XvaError, XvaParams, XvaResult};

/// Default number of counterparty exposure paths kept for visualisation.
pub const DEFAULT_RETAINED_PATHS: usize = 100;

/// Engine error.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngineError {
    /// Invalid scenario configuration.
    #[error("Invalid scenario: {0}")]
    Scenario(ConfigError),

    /// Invalid XVA parameters or inconsistent curves.
    #[error("Invalid XVA parameters: {0}")]
    Xva(#[from] XvaError),

    /// Run stopped by a cancellation request.
    #[error("Run cancelled after {completed} of {requested} paths")]
    Cancelled {
        /// Paths simulated before the request was observed.
        completed: usize,
        /// Paths requested.
        requested: usize,
    },
}

impl EngineError {
    /// `true` for errors caused by the configuration rather than the run.
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::Scenario(_) | Self::Xva(_))
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Cancelled {
                completed,
                requested,
            } => Self::Cancelled {
                completed,
                requested,
            },
            other => Self::Scenario(other),
        }
    }
}

/// Full engine configuration.
///
/// # Examples
///
/// ```
/// use pricer_pricing::mc::ScenarioConfig;
/// use pricer_xva::{run_exposure_simulation, EngineConfig};
///
/// let scenario = ScenarioConfig::builder()
///     .tenor(0.5)
///     .n_paths(200)
///     .seed(42)
///     .build()
///     .unwrap();
/// let config = EngineConfig::builder().scenario(scenario).build().unwrap();
///
/// let result = run_exposure_simulation(&config).unwrap();
/// assert_eq!(result.profile.seed, 42);
/// assert_eq!(result.profile.times.len(), 127);
/// assert!(result.xva.net.cva >= 0.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Counterparty exposure paths kept in the result.
    pub retained_paths: usize,
    /// Bins of the terminal exposure histogram.
    pub histogram_bins: usize,
    /// Risk-factor scenario.
    pub scenario: ScenarioConfig,
    /// Credit, funding, liquidity and discounting parameters.
    pub xva: XvaParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            retained_paths: DEFAULT_RETAINED_PATHS,
            histogram_bins: DEFAULT_BINS,
            scenario: ScenarioConfig::default(),
            xva: XvaParams::default(),
        }
    }
}

impl EngineConfig {
    /// Creates a builder starting from the default configuration.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Validates the scenario and XVA parameters.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Scenario`] for an invalid scenario
    /// - [`EngineError::Xva`] for invalid credit, spread or horizon values
    pub fn validate(&self) -> Result<(), EngineError> {
        self.scenario.validate()?;
        self.xva.validate()?;
        Ok(())
    }
}

/// Builder for [`EngineConfig`].
#[derive(Clone, Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    /// Sets the scenario.
    pub fn scenario(mut self, scenario: ScenarioConfig) -> Self {
        self.config.scenario = scenario;
        self
    }

    /// Sets all XVA parameters at once.
    pub fn xva(mut self, xva: XvaParams) -> Self {
        self.config.xva = xva;
        self
    }

    /// Sets the counterparty credit parameters.
    pub fn counterparty(mut self, credit: CreditParams) -> Self {
        self.config.xva.counterparty = credit;
        self
    }

    /// Sets our own credit parameters.
    pub fn own_credit(mut self, credit: CreditParams) -> Self {
        self.config.xva.own_credit = credit;
        self
    }

    /// Sets the funding spread (decimal).
    pub fn funding_spread(mut self, spread: f64) -> Self {
        self.config.xva.funding = FundingParams::new(spread);
        self
    }

    /// Sets the liquidity spread and horizon.
    pub fn liquidity(mut self, liquidity: LiquidityParams) -> Self {
        self.config.xva.liquidity = liquidity;
        self
    }

    /// Sets the flat discount rate.
    pub fn discount_rate(mut self, rate: f64) -> Self {
        self.config.xva.discount_rate = rate;
        self
    }

    /// Sets the number of retained sample paths.
    pub fn retained_paths(mut self, n: usize) -> Self {
        self.config.retained_paths = n;
        self
    }

    /// Sets the number of histogram bins.
    pub fn histogram_bins(mut self, n: usize) -> Self {
        self.config.histogram_bins = n;
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<EngineConfig, EngineError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Exposure side of a run: curves, samples and the seed used.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExposureProfile {
    /// Seed the paths were generated from.
    pub seed: u64,
    /// Number of paths simulated.
    pub n_paths: usize,
    /// Trade tenor in years.
    pub tenor: f64,
    /// Grid times in years.
    pub times: Vec<f64>,
    /// Counterparty and own EE/PFE curves.
    pub exposure: BilateralExposure,
    /// Headline counterparty exposure statistics.
    pub summary: ExposureSummary,
    /// Counterparty exposures of the first retained paths.
    pub sample_paths: Vec<Vec<f64>>,
    /// Terminal counterparty exposures, ascending.
    pub terminal_exposures: Vec<f64>,
    /// Histogram of the terminal counterparty exposures.
    pub terminal_histogram: Histogram,
}

impl ExposureProfile {
    /// Grid the curves are defined on.
    pub fn grid(&self) -> TimeGrid {
        TimeGrid::with_steps(self.times.len().saturating_sub(1))
    }
}

/// Result of a full engine run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExposureSimulationResult {
    /// Exposure curves and samples.
    #[serde(flatten)]
    pub profile: ExposureProfile,
    /// Valuation adjustments.
    pub xva: XvaResult,
}

/// Simulates paths and aggregates them into exposure curves.
pub fn simulate_exposure_profile(
    config: &EngineConfig,
    cancel: &CancellationToken,
) -> Result<ExposureProfile, EngineError> {
    config.validate()?;
    let scenario = &config.scenario;

    let ensemble = simulate_ensemble_with(scenario, &ParallelConfig::default(), cancel)?;
    let grid = *ensemble.grid();

    let exposure = ExposureAggregator::new(scenario.confidence_level())?.aggregate_bilateral(&ensemble)?;
    let summary = ExposureSummary::from_curve(&exposure.counterparty, &grid);

    let sample_paths = ensemble
        .paths()
        .iter()
        .take(config.retained_paths)
        .map(|p| p.exposures(ExposureSide::Counterparty))
        .collect();

    let mut terminal_exposures = ensemble.terminal_exposures(ExposureSide::Counterparty);
    terminal_exposures.sort_by(f64::total_cmp);
    let terminal_histogram = Histogram::from_values(&terminal_exposures, config.histogram_bins);

    Ok(ExposureProfile {
        seed: ensemble.seed(),
        n_paths: ensemble.n_paths(),
        tenor: scenario.tenor(),
        times: grid.times(),
        exposure,
        summary,
        sample_paths,
        terminal_exposures,
        terminal_histogram,
    })
}

/// Runs the engine to completion.
///
/// # Errors
///
/// Returns [`EngineError`] for an invalid configuration. No simulation work
/// is done in that case.
pub fn run_exposure_simulation(config: &EngineConfig) -> Result<ExposureSimulationResult, EngineError> {
    run_exposure_simulation_with_cancel(config, &CancellationToken::new())
}

/// Runs the engine, polling `cancel` between path batches.
///
/// # Errors
///
/// - [`EngineError::Scenario`] / [`EngineError::Xva`] for an invalid configuration
/// - [`EngineError::Cancelled`] if `cancel` fires before the run completes
pub fn run_exposure_simulation_with_cancel(
    config: &EngineConfig,
    cancel: &CancellationToken,
) -> Result<ExposureSimulationResult, EngineError> {
    let start = Instant::now();
    tracing::info!(
        n_paths = config.scenario.effective_n_paths(),
        num_steps = config.scenario.grid().num_steps(),
        seed = ?config.scenario.seed(),
        "starting exposure simulation"
    );

    let profile = simulate_exposure_profile(config, cancel)?;
    if cancel.is_cancelled() {
        return Err(EngineError::Cancelled {
            completed: profile.n_paths,
            requested: profile.n_paths,
        });
    }

    let calculator = XvaCalculator::new(config.xva, profile.grid())?;
    let xva = calculator.compute_all(&profile.exposure)?;

    tracing::info!(
        seed = profile.seed,
        cva = xva.net.cva,
        dva = xva.net.dva,
        fva = xva.net.fva,
        lva = xva.net.lva,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "exposure simulation complete"
    );

    Ok(ExposureSimulationResult { profile, xva })
}
