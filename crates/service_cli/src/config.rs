//! CLI configuration management
//!
//! Configuration is layered from defaults, an optional TOML file,
//! environment variables and command-line flags, later sources winning.

use pricer_xva::xva::{CreditParams, FundingParams, LiquidityParams};
use pricer_xva::{EngineConfig, EngineError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Log level environment variable.
pub const ENV_LOG_LEVEL: &str = "NEUTRYX_XVA_LOG_LEVEL";
/// Seed environment variable.
pub const ENV_SEED: &str = "NEUTRYX_XVA_SEED";
/// Path count environment variable.
pub const ENV_PATHS: &str = "NEUTRYX_XVA_PATHS";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] EngineError),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Complete CLI configuration: logging plus the engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is not set
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Engine configuration
    pub engine: EngineConfig,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CliConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validate the engine configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        Ok(())
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }

        let overrides = Overrides {
            seed: lookup(ENV_SEED).map(|v| parse_env(ENV_SEED, &v)).transpose()?,
            n_paths: lookup(ENV_PATHS).map(|v| parse_env(ENV_PATHS, &v)).transpose()?,
            ..Default::default()
        };
        self.apply_overrides(&overrides)
    }

    /// Merge explicit overrides into the configuration
    ///
    /// The scenario is rebuilt through its builder so every override is
    /// validated.
    pub fn apply_overrides(&mut self, overrides: &Overrides) -> Result<(), ConfigError> {
        let engine = &mut self.engine;

        let mut scenario = engine.scenario.to_builder();
        if let Some(notional) = overrides.notional {
            scenario = scenario.notional(notional);
        }
        if let Some(tenor) = overrides.tenor {
            scenario = scenario.tenor(tenor);
        }
        if let Some(volatility) = overrides.volatility {
            scenario = scenario.volatility(volatility);
        }
        if let Some(drift) = overrides.drift {
            scenario = scenario.drift(drift);
        }
        if let Some(n_paths) = overrides.n_paths {
            scenario = scenario.n_paths(n_paths);
        }
        if let Some(confidence) = overrides.confidence {
            scenario = scenario.confidence_level(confidence);
        }
        if let Some(seed) = overrides.seed {
            scenario = scenario.seed(seed);
        }
        engine.scenario = scenario.build().map_err(EngineError::from)?;

        let xva = &mut engine.xva;
        if overrides.cp_hazard.is_some() || overrides.cp_recovery.is_some() {
            xva.counterparty = CreditParams::new(
                overrides.cp_hazard.unwrap_or(xva.counterparty.hazard_rate()),
                overrides.cp_recovery.unwrap_or(xva.counterparty.recovery_rate()),
            )
            .map_err(EngineError::from)?;
        }
        if overrides.own_hazard.is_some() || overrides.own_recovery.is_some() {
            xva.own_credit = CreditParams::new(
                overrides.own_hazard.unwrap_or(xva.own_credit.hazard_rate()),
                overrides.own_recovery.unwrap_or(xva.own_credit.recovery_rate()),
            )
            .map_err(EngineError::from)?;
        }
        if let Some(spread) = overrides.funding_spread {
            xva.funding = FundingParams::new(spread);
        }
        let liquidity_spread = overrides.liquidity_spread.unwrap_or(xva.liquidity.spread);
        xva.liquidity = match overrides.liquidity_days {
            Some(days) => LiquidityParams::from_days(liquidity_spread, days),
            None => LiquidityParams::new(liquidity_spread, xva.liquidity.horizon_years),
        };
        if let Some(rate) = overrides.discount_rate {
            xva.discount_rate = rate;
        }

        if let Some(n) = overrides.retained_paths {
            engine.retained_paths = n;
        }
        if let Some(n) = overrides.histogram_bins {
            engine.histogram_bins = n;
        }
        Ok(())
    }
}

fn parse_env<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        name,
        value: value.to_string(),
    })
}

/// Per-run overrides taken from the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub notional: Option<f64>,
    pub tenor: Option<f64>,
    pub volatility: Option<f64>,
    pub drift: Option<f64>,
    pub n_paths: Option<usize>,
    pub confidence: Option<f64>,
    pub seed: Option<u64>,
    pub cp_hazard: Option<f64>,
    pub cp_recovery: Option<f64>,
    pub own_hazard: Option<f64>,
    pub own_recovery: Option<f64>,
    pub funding_spread: Option<f64>,
    pub liquidity_spread: Option<f64>,
    pub liquidity_days: Option<f64>,
    pub discount_rate: Option<f64>,
    pub retained_paths: Option<usize>,
    pub histogram_bins: Option<usize>,
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Scenario and parameter overrides
    pub overrides: Overrides,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with_env(cli, |name| std::env::var(name).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    config.apply_env(lookup)?;

    if let Some(level) = &cli.log_level {
        config.log_level = LogLevel::from_str(level)?;
    }
    config.apply_overrides(&cli.overrides)?;

    config.validate()?;
    Ok(config)
}
