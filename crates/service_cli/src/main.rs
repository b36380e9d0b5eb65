//! Neutryx XVA CLI - Counterparty exposure and valuation adjustments
//!
//! # Commands
//!
//! - `neutryx-xva run` - Simulate exposures and compute CVA, DVA, FVA and LVA
//! - `neutryx-xva pfe` - Exposure-only run: EE/PFE profile and terminal histogram
//! - `neutryx-xva init-config` - Print the default TOML configuration
//!
//! Configuration is read from `--config` (TOML), then `NEUTRYX_XVA_*`
//! environment variables, then command-line flags.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use commands::OutputFormat;
use config::{build_config, CliArgs, Overrides};
pub use error::{CliError, Result};

/// Neutryx XVA - Monte Carlo exposure and valuation adjustments
#[derive(Parser, Debug)]
#[command(name = "neutryx-xva")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE", env = "NEUTRYX_XVA_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate exposures and compute valuation adjustments
    Run {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Also write the full result as JSON to this file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Exposure-only run: EE/PFE profile and terminal exposure histogram
    Pfe {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Histogram bins for the terminal exposure distribution
        #[arg(long)]
        bins: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Print the default configuration as TOML
    InitConfig {
        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Scenario and parameter overrides shared by the simulation commands
#[derive(Args, Debug, Clone, Default)]
struct ScenarioArgs {
    /// Trade notional
    #[arg(long)]
    notional: Option<f64>,

    /// Tenor in years
    #[arg(long)]
    tenor: Option<f64>,

    /// Annualised volatility (decimal)
    #[arg(long)]
    volatility: Option<f64>,

    /// Annualised drift (decimal)
    #[arg(long)]
    drift: Option<f64>,

    /// Number of Monte Carlo paths
    #[arg(short = 'n', long)]
    paths: Option<usize>,

    /// PFE confidence level in (0, 1]
    #[arg(long)]
    confidence: Option<f64>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Counterparty hazard rate
    #[arg(long)]
    cp_hazard: Option<f64>,

    /// Counterparty recovery rate
    #[arg(long)]
    cp_recovery: Option<f64>,

    /// Own hazard rate
    #[arg(long)]
    own_hazard: Option<f64>,

    /// Own recovery rate
    #[arg(long)]
    own_recovery: Option<f64>,

    /// Funding spread (decimal)
    #[arg(long)]
    funding_spread: Option<f64>,

    /// Liquidity spread (decimal)
    #[arg(long)]
    liquidity_spread: Option<f64>,

    /// Liquidity horizon in calendar days
    #[arg(long)]
    liquidity_days: Option<f64>,

    /// Flat discount rate
    #[arg(long)]
    discount_rate: Option<f64>,

    /// Counterparty exposure paths kept in JSON output
    #[arg(long)]
    retained_paths: Option<usize>,
}

impl From<ScenarioArgs> for Overrides {
    fn from(args: ScenarioArgs) -> Self {
        Overrides {
            notional: args.notional,
            tenor: args.tenor,
            volatility: args.volatility,
            drift: args.drift,
            n_paths: args.paths,
            confidence: args.confidence,
            seed: args.seed,
            cp_hazard: args.cp_hazard,
            cp_recovery: args.cp_recovery,
            own_hazard: args.own_hazard,
            own_recovery: args.own_recovery,
            funding_spread: args.funding_spread,
            liquidity_spread: args.liquidity_spread,
            liquidity_days: args.liquidity_days,
            discount_rate: args.discount_rate,
            retained_paths: args.retained_paths,
            histogram_bins: None,
        }
    }
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        let overrides = match &self.command {
            Commands::Run { scenario, .. } => scenario.clone().into(),
            Commands::Pfe { scenario, bins, .. } => Overrides {
                histogram_bins: *bins,
                ..Overrides::from(scenario.clone())
            },
            Commands::InitConfig { .. } => Overrides::default(),
        };
        CliArgs {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            overrides,
        }
    }
}

/// Initialise tracing; `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.config_args())?;

    init_tracing(config.log_level.as_filter_str());
    tracing::debug!(log_level = %config.log_level, "configuration loaded");

    match cli.command {
        Commands::Run { format, output, .. } => {
            commands::run::run(&config, format, output.as_deref())?
        }
        Commands::Pfe { format, .. } => commands::pfe::run(&config, format)?,
        Commands::InitConfig { output, force } => {
            commands::init_config::run(output.as_deref(), force)?
        }
    }
    Ok(())
}
