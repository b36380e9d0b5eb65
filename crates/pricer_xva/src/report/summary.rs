//! Headline exposure statistics.

use pricer_pricing::mc::TimeGrid;
use serde::{Deserialize, Serialize};

use crate::exposure::{ExposureCalculator, ExposureCurve};

/// Peak and final exposure figures of one curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExposureSummary {
    /// Largest PFE.
    pub peak_pfe: f64,
    /// Time of the largest PFE in years.
    pub peak_pfe_time: f64,
    /// PFE at maturity.
    pub final_pfe: f64,
    /// Largest EE.
    pub peak_ee: f64,
    /// Time of the largest EE in years.
    pub peak_ee_time: f64,
    /// EE at maturity.
    pub final_ee: f64,
    /// Time-averaged EE over the tenor.
    pub epe: f64,
}

impl ExposureSummary {
    /// Summarises `curve` on `grid`.
    pub fn from_curve(curve: &ExposureCurve, grid: &TimeGrid) -> Self {
        Self {
            peak_pfe: curve.peak_pfe(),
            peak_pfe_time: grid.time(argmax(&curve.pfe)),
            final_pfe: curve.final_pfe(),
            peak_ee: curve.peak_ee(),
            peak_ee_time: grid.time(argmax(&curve.ee)),
            final_ee: curve.final_ee(),
            epe: ExposureCalculator::expected_positive_exposure(&curve.ee, grid.dt()),
        }
    }
}

/// First index of the largest value (0 when empty).
fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best_i, best), (i, &v)| {
            if v > best {
                (i, v)
            } else {
                (best_i, best)
            }
        })
        .0
}
