//! Run command implementation
//!
//! Runs the full engine and prints exposure and adjustment tables or JSON.

use std::fmt::Write as _;
use std::path::Path;

use pricer_xva::report::adjustment_slices;
use pricer_xva::{run_exposure_simulation, AdjustmentKind, ExposureSimulationResult};
use tracing::info;

use super::pfe::render_exposure;
use super::table::{amount, years, Table};
use super::OutputFormat;
use crate::config::CliConfig;
use crate::Result;

/// Run the run command
pub fn run(config: &CliConfig, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let result = run_exposure_simulation(&config.engine)?;

    match format {
        OutputFormat::Table => print!("{}", render(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&result)?)?;
        info!(path = %path.display(), "results written");
    }
    Ok(())
}

/// Renders the run header, adjustment totals, exposure summary, key-tenor
/// profile and adjustment slices.
pub fn render(result: &ExposureSimulationResult) -> String {
    let profile = &result.profile;
    let grid = profile.grid();
    let net = &result.xva.net;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Seed {} | {} paths | tenor {} | {} steps",
        profile.seed,
        profile.n_paths,
        years(profile.tenor),
        grid.num_steps()
    );

    let mut totals = Table::new(["Adjustment", "Value"]);
    for kind in AdjustmentKind::ALL {
        totals.row([kind.label().to_string(), amount(result.xva.total(kind))]);
    }
    totals
        .row(["Bilateral CVA".to_string(), amount(net.bilateral_cva)])
        .row(["Funding net".to_string(), amount(net.funding_net)])
        .row(["Total".to_string(), amount(net.total)]);
    let _ = write!(out, "\nValuation adjustments\n{}", totals);

    out.push_str(&render_exposure(profile));

    let mut slices = Table::new([
        "Tenor", "Time", "CVA", "CVA cum", "DVA", "DVA cum", "FVA", "FVA cum", "LVA", "LVA cum",
    ]);
    for row in adjustment_slices(&result.xva, &grid, profile.tenor) {
        let mut cells = vec![years(row.tenor), years(row.time)];
        for kind in AdjustmentKind::ALL {
            let slice = row.get(kind);
            cells.push(amount(slice.increment));
            cells.push(amount(slice.cumulative));
        }
        slices.row(cells);
    }
    let _ = write!(out, "\nAdjustments by slice\n{}", slices);
    out
}
