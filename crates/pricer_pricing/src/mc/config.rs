//! Scenario configuration for exposure simulations.
//!
//! This module provides the immutable [`ScenarioConfig`] and its builder.
//! Validation happens at [`ScenarioConfigBuilder::build`] and again in
//! [`ScenarioConfig::validate`] for values that bypass the builder (e.g.
//! deserialised from a configuration file).

use super::error::ConfigError;
use super::grid::{TimeGrid, STEPS_PER_YEAR};
use crate::rng::NormalMethod;

/// Default minimum number of simulation paths (statistical floor).
pub const MIN_PATHS: usize = 100;

/// Default maximum number of simulation paths; larger requests are clamped.
pub const MAX_PATHS: usize = 20_000;

/// Longest accepted tenor in years.
pub const MAX_TENOR: f64 = 100.0;

/// Bounds applied to the requested path count.
///
/// Requests below `min` are rejected; requests above `max` are clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PathLimits {
    /// Minimum accepted path count.
    pub min: usize,
    /// Maximum simulated path count.
    pub max: usize,
}

impl Default for PathLimits {
    fn default() -> Self {
        Self {
            min: MIN_PATHS,
            max: MAX_PATHS,
        }
    }
}

/// Exposure simulation configuration.
///
/// The risk factor starts at X(0) = 1 and evolves as GBM with the configured
/// drift and volatility; mark-to-market is `notional × (X(t) − 1)`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::ScenarioConfig;
///
/// let config = ScenarioConfig::builder()
///     .notional(100_000_000.0)
///     .tenor(5.0)
///     .volatility(0.2)
///     .n_paths(5_000)
///     .confidence_level(0.95)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 5_000);
/// assert_eq!(config.grid().num_steps(), 1260);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScenarioConfig {
    /// Trade notional (currency amount).
    notional: f64,
    /// Tenor in years.
    tenor: f64,
    /// Annualised volatility σ.
    volatility: f64,
    /// Annualised drift μ.
    drift: f64,
    /// Requested number of simulation paths.
    n_paths: usize,
    /// PFE confidence level in (0, 1].
    confidence_level: f64,
    /// Optional seed for reproducibility.
    seed: Option<u64>,
    /// Normal variate algorithm.
    normal_method: NormalMethod,
    /// Path count bounds.
    path_limits: PathLimits,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            notional: 100_000_000.0,
            tenor: 5.0,
            volatility: 0.20,
            drift: 0.0,
            n_paths: 5_000,
            confidence_level: 0.95,
            seed: None,
            normal_method: NormalMethod::BoxMuller,
            path_limits: PathLimits::default(),
        }
    }
}

impl ScenarioConfig {
    /// Creates a new configuration builder seeded with the default scenario.
    #[inline]
    pub fn builder() -> ScenarioConfigBuilder {
        ScenarioConfigBuilder::default()
    }

    /// Returns a builder initialised from this configuration.
    pub fn to_builder(&self) -> ScenarioConfigBuilder {
        ScenarioConfigBuilder {
            config: self.clone(),
        }
    }

    /// Returns the notional.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns the tenor in years.
    #[inline]
    pub fn tenor(&self) -> f64 {
        self.tenor
    }

    /// Returns the annualised volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the annualised drift.
    #[inline]
    pub fn drift(&self) -> f64 {
        self.drift
    }

    /// Returns the requested path count.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of paths actually simulated (clamped to the maximum).
    #[inline]
    pub fn effective_n_paths(&self) -> usize {
        self.n_paths.min(self.path_limits.max)
    }

    /// Returns the PFE confidence level.
    #[inline]
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Returns the optional seed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the normal variate algorithm.
    #[inline]
    pub fn normal_method(&self) -> NormalMethod {
        self.normal_method
    }

    /// Returns the path count bounds.
    #[inline]
    pub fn path_limits(&self) -> PathLimits {
        self.path_limits
    }

    /// Steps per year of the simulation grid (fixed at 252).
    #[inline]
    pub fn steps_per_year(&self) -> usize {
        STEPS_PER_YEAR
    }

    /// Daily time grid covering the tenor.
    #[inline]
    pub fn grid(&self) -> TimeGrid {
        TimeGrid::from_tenor(self.tenor)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - notional or tenor is not a positive finite number
    /// - tenor exceeds [`MAX_TENOR`]
    /// - volatility is negative or non-finite, drift is non-finite
    /// - confidence level is outside (0, 1]
    /// - path limits are inconsistent (`min < 2` or `min > max`)
    /// - path count is below the configured minimum
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.notional.is_finite() && self.notional > 0.0) {
            return Err(ConfigError::invalid(
                "notional",
                format!("must be positive, got {}", self.notional),
            ));
        }
        if !(self.tenor.is_finite() && self.tenor > 0.0) {
            return Err(ConfigError::invalid(
                "tenor",
                format!("must be positive, got {}", self.tenor),
            ));
        }
        if self.tenor > MAX_TENOR {
            return Err(ConfigError::invalid(
                "tenor",
                format!("must not exceed {} years, got {}", MAX_TENOR, self.tenor),
            ));
        }
        if !(self.volatility.is_finite() && self.volatility >= 0.0) {
            return Err(ConfigError::invalid(
                "volatility",
                format!("must be non-negative, got {}", self.volatility),
            ));
        }
        if !self.drift.is_finite() {
            return Err(ConfigError::invalid(
                "drift",
                format!("must be finite, got {}", self.drift),
            ));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level <= 1.0) {
            return Err(ConfigError::invalid(
                "confidence_level",
                format!("must be in (0, 1], got {}", self.confidence_level),
            ));
        }
        if self.path_limits.min < 2 || self.path_limits.min > self.path_limits.max {
            return Err(ConfigError::invalid(
                "path_limits",
                format!(
                    "require 2 <= min <= max, got min={} max={}",
                    self.path_limits.min, self.path_limits.max
                ),
            ));
        }
        if self.n_paths < self.path_limits.min {
            return Err(ConfigError::InvalidPathCount {
                count: self.n_paths,
                min: self.path_limits.min,
            });
        }
        Ok(())
    }
}

/// Builder for [`ScenarioConfig`].
///
/// Unset fields keep the default scenario values (100m notional, 5y tenor,
/// 20% volatility, zero drift, 5 000 paths, 95% confidence, no seed).
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{ConfigError, ScenarioConfig};
///
/// let result = ScenarioConfig::builder().tenor(0.0).build();
/// assert!(matches!(result, Err(ConfigError::InvalidParameter { name: "tenor", .. })));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScenarioConfigBuilder {
    config: ScenarioConfig,
}

impl ScenarioConfigBuilder {
    /// Sets the notional.
    #[inline]
    pub fn notional(mut self, notional: f64) -> Self {
        self.config.notional = notional;
        self
    }

    /// Sets the tenor in years.
    #[inline]
    pub fn tenor(mut self, tenor: f64) -> Self {
        self.config.tenor = tenor;
        self
    }

    /// Sets the annualised volatility.
    #[inline]
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.config.volatility = volatility;
        self
    }

    /// Sets the annualised drift.
    #[inline]
    pub fn drift(mut self, drift: f64) -> Self {
        self.config.drift = drift;
        self
    }

    /// Sets the requested number of paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.config.n_paths = n_paths;
        self
    }

    /// Sets the PFE confidence level.
    #[inline]
    pub fn confidence_level(mut self, confidence_level: f64) -> Self {
        self.config.confidence_level = confidence_level;
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Clears the seed; the run draws one from OS entropy.
    #[inline]
    pub fn unseeded(mut self) -> Self {
        self.config.seed = None;
        self
    }

    /// Sets the normal variate algorithm.
    #[inline]
    pub fn normal_method(mut self, method: NormalMethod) -> Self {
        self.config.normal_method = method;
        self
    }

    /// Sets the path count bounds.
    #[inline]
    pub fn path_limits(mut self, min: usize, max: usize) -> Self {
        self.config.path_limits = PathLimits { min, max };
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] reported by
    /// [`ScenarioConfig::validate`].
    pub fn build(self) -> Result<ScenarioConfig, ConfigError> {
        self.config.validate()?;
        if self.config.n_paths > self.config.path_limits.max {
            tracing::warn!(
                requested = self.config.n_paths,
                max = self.config.path_limits.max,
                "path count above maximum, simulation will be clamped"
            );
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ScenarioConfig::builder().build().unwrap();

        assert_eq!(config.notional(), 100_000_000.0);
        assert_eq!(config.tenor(), 5.0);
        assert_eq!(config.volatility(), 0.2);
        assert_eq!(config.drift(), 0.0);
        assert_eq!(config.n_paths(), 5_000);
        assert_eq!(config.confidence_level(), 0.95);
        assert_eq!(config.seed(), None);
        assert_eq!(config.steps_per_year(), 252);
        assert_eq!(config.normal_method(), NormalMethod::BoxMuller);
    }

    #[test]
    fn test_builder_with_seed() {
        let config = ScenarioConfig::builder().seed(42).build().unwrap();
        assert_eq!(config.seed(), Some(42));

        let cleared = config.to_builder().unseeded().build().unwrap();
        assert_eq!(cleared.seed(), None);
    }

    #[test]
    fn test_invalid_notional() {
        for notional in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = ScenarioConfig::builder().notional(notional).build();
            assert!(matches!(
                result,
                Err(ConfigError::InvalidParameter {
                    name: "notional",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_invalid_tenor() {
        let result = ScenarioConfig::builder().tenor(-0.5).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "tenor", .. })
        ));
    }

    #[test]
    fn test_oversized_tenor_rejected() {
        for tenor in [MAX_TENOR + 1.0, 1e4, 1e300] {
            let result = ScenarioConfig::builder().tenor(tenor).n_paths(100).seed(1).build();
            assert!(matches!(
                result,
                Err(ConfigError::InvalidParameter { name: "tenor", .. })
            ));
        }
        assert!(ScenarioConfig::builder().tenor(MAX_TENOR).build().is_ok());
    }

    #[test]
    fn test_zero_volatility_is_valid() {
        assert!(ScenarioConfig::builder().volatility(0.0).build().is_ok());
    }

    #[test]
    fn test_negative_volatility_rejected() {
        let result = ScenarioConfig::builder().volatility(-0.01).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "volatility",
                ..
            })
        ));
    }

    #[test]
    fn test_confidence_bounds() {
        assert!(ScenarioConfig::builder().confidence_level(1.0).build().is_ok());
        assert!(ScenarioConfig::builder().confidence_level(0.0).build().is_err());
        assert!(ScenarioConfig::builder().confidence_level(1.01).build().is_err());
        assert!(ScenarioConfig::builder()
            .confidence_level(f64::NAN)
            .build()
            .is_err());
    }

    #[test]
    fn test_path_floor_rejected() {
        let result = ScenarioConfig::builder().n_paths(99).build();
        assert_eq!(
            result,
            Err(ConfigError::InvalidPathCount { count: 99, min: 100 })
        );
    }

    #[test]
    fn test_path_ceiling_clamped() {
        let config = ScenarioConfig::builder().n_paths(50_000).build().unwrap();
        assert_eq!(config.n_paths(), 50_000);
        assert_eq!(config.effective_n_paths(), MAX_PATHS);
    }

    #[test]
    fn test_custom_path_limits() {
        let config = ScenarioConfig::builder()
            .n_paths(10)
            .path_limits(2, 50)
            .build()
            .unwrap();
        assert_eq!(config.effective_n_paths(), 10);

        let result = ScenarioConfig::builder().path_limits(1, 50).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "path_limits",
                ..
            })
        ));
    }
}
