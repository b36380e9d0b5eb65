//! PFE command implementation
//!
//! Exposure-only run: counterparty EE/PFE at the key tenors and the
//! terminal exposure histogram. No adjustments are computed.

use std::fmt::Write as _;

use pricer_pricing::mc::CancellationToken;
use pricer_xva::report::tenor_profile;
use pricer_xva::{simulate_exposure_profile, ExposureProfile};

use super::table::{amount, years, Table};
use super::OutputFormat;
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Run the pfe command
pub fn run(config: &CliConfig, format: OutputFormat) -> Result<()> {
    if config.engine.histogram_bins == 0 {
        return Err(CliError::InvalidArgument(
            "Histogram needs at least one bin".to_string(),
        ));
    }

    let profile = simulate_exposure_profile(&config.engine, &CancellationToken::new())?;

    match format {
        OutputFormat::Table => {
            print!("{}", render_exposure(&profile));
            print!("{}", render_histogram(&profile));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&profile)?),
    }
    Ok(())
}

/// Counterparty exposure summary and key-tenor profile.
pub(crate) fn render_exposure(profile: &ExposureProfile) -> String {
    let summary = &profile.summary;
    let grid = profile.grid();
    let mut out = String::new();

    let mut stats = Table::new(["Statistic", "Value", "Time"]);
    stats
        .row([
            "Peak PFE".to_string(),
            amount(summary.peak_pfe),
            years(summary.peak_pfe_time),
        ])
        .row(["Final PFE".to_string(), amount(summary.final_pfe), years(grid.horizon())])
        .row([
            "Peak EE".to_string(),
            amount(summary.peak_ee),
            years(summary.peak_ee_time),
        ])
        .row(["Final EE".to_string(), amount(summary.final_ee), years(grid.horizon())])
        .row(["EPE".to_string(), amount(summary.epe), String::new()]);
    let _ = write!(out, "\nCounterparty exposure\n{}", stats);

    let confidence = profile.exposure.counterparty.confidence;
    let mut tenors = Table::new([
        "Tenor".to_string(),
        "Time".to_string(),
        "EE".to_string(),
        format!("PFE {:.1}%", confidence * 100.0),
    ]);
    for row in tenor_profile(&profile.exposure.counterparty, &grid, profile.tenor) {
        tenors.row([years(row.tenor), years(row.time), amount(row.ee), amount(row.pfe)]);
    }
    let _ = write!(out, "\nExposure profile\n{}", tenors);
    out
}

fn render_histogram(profile: &ExposureProfile) -> String {
    let histogram = &profile.terminal_histogram;
    let total = histogram.total().max(1) as f64;

    let mut table = Table::new(["Terminal exposure", "Count", "Share"]);
    for bin in &histogram.bins {
        table.row([
            bin.label.clone(),
            bin.count.to_string(),
            format!("{:.1}%", bin.count as f64 / total * 100.0),
        ]);
    }
    format!("\nTerminal exposure distribution\n{}", table)
}
