//! Exposure aggregation across simulated paths.
//!
//! For every grid point the aggregator takes the cross-section of exposures
//! over all paths and reduces it to:
//!
//! - Expected Exposure (EE): arithmetic mean, summed in path order
//! - Potential Future Exposure (PFE): the value at rank `floor(c × (M − 1))`
//!   of the ascending-sorted cross-section
//!
//! Each time slice is independent and is processed on the rayon pool.

mod calculator;

pub use calculator::ExposureCalculator;

use pricer_pricing::mc::{ExposureSide, PathEnsemble};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::xva::XvaError;
use calculator::{slice_mean, slice_quantile};

/// Which statistic of the exposure distribution drives an adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureMeasure {
    /// Cross-path mean (EE).
    Expected,
    /// Cross-path confidence quantile (PFE).
    Potential,
}

/// EE and PFE profiles of one exposure side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExposureCurve {
    /// Side the exposures are measured from.
    pub side: ExposureSide,
    /// PFE confidence level.
    pub confidence: f64,
    /// Expected exposure at each grid point.
    pub ee: Vec<f64>,
    /// Potential future exposure at each grid point.
    pub pfe: Vec<f64>,
}

impl ExposureCurve {
    /// Number of grid points.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.ee.len()
    }

    /// Profile for the given measure.
    #[inline]
    pub fn measure(&self, measure: ExposureMeasure) -> &[f64] {
        match measure {
            ExposureMeasure::Expected => &self.ee,
            ExposureMeasure::Potential => &self.pfe,
        }
    }

    /// Largest EE value.
    pub fn peak_ee(&self) -> f64 {
        ExposureCalculator::peak(&self.ee)
    }

    /// Largest PFE value.
    pub fn peak_pfe(&self) -> f64 {
        ExposureCalculator::peak(&self.pfe)
    }

    /// EE at the last grid point.
    pub fn final_ee(&self) -> f64 {
        self.ee.last().copied().unwrap_or(0.0)
    }

    /// PFE at the last grid point.
    pub fn final_pfe(&self) -> f64 {
        self.pfe.last().copied().unwrap_or(0.0)
    }
}

/// Counterparty-side and own-side exposure curves of one run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BilateralExposure {
    /// Exposure to the counterparty, `max(0, MTM)`.
    pub counterparty: ExposureCurve,
    /// Exposure of the counterparty to us, `max(0, −MTM)`.
    pub own: ExposureCurve,
}

impl BilateralExposure {
    /// Curve for `side`.
    #[inline]
    pub fn side(&self, side: ExposureSide) -> &ExposureCurve {
        match side {
            ExposureSide::Counterparty => &self.counterparty,
            ExposureSide::Own => &self.own,
        }
    }
}

/// Reduces a path ensemble to EE/PFE curves.
///
/// # Examples
///
/// ```
/// use pricer_pricing::mc::{simulate_ensemble, CancellationToken, ExposureSide, ScenarioConfig};
/// use pricer_xva::exposure::ExposureAggregator;
///
/// let config = ScenarioConfig::builder()
///     .tenor(0.25)
///     .n_paths(500)
///     .seed(1)
///     .build()
///     .unwrap();
/// let ensemble = simulate_ensemble(&config, &CancellationToken::new()).unwrap();
///
/// let aggregator = ExposureAggregator::new(0.95).unwrap();
/// let curve = aggregator.aggregate(&ensemble, ExposureSide::Counterparty).unwrap();
///
/// assert_eq!(curve.ee[0], 0.0);
/// assert_eq!(curve.pfe[0], 0.0);
/// assert!(curve.pfe[63] >= curve.ee[63]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExposureAggregator {
    confidence: f64,
}

impl ExposureAggregator {
    /// Creates an aggregator for PFE at `confidence`.
    ///
    /// # Errors
    ///
    /// Returns `XvaError::InvalidConfidence` unless `confidence` is in (0, 1].
    pub fn new(confidence: f64) -> Result<Self, XvaError> {
        if !(confidence > 0.0 && confidence <= 1.0) {
            return Err(XvaError::InvalidConfidence(confidence));
        }
        Ok(Self { confidence })
    }

    /// PFE confidence level.
    #[inline]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Aggregates the exposures of `side`.
    ///
    /// # Errors
    ///
    /// Returns `XvaError::InsufficientPaths` for fewer than two paths.
    pub fn aggregate(
        &self,
        ensemble: &PathEnsemble,
        side: ExposureSide,
    ) -> Result<ExposureCurve, XvaError> {
        let n_paths = ensemble.n_paths();
        if n_paths < 2 {
            return Err(XvaError::InsufficientPaths { count: n_paths });
        }

        let confidence = self.confidence;
        let (ee, pfe): (Vec<f64>, Vec<f64>) = (0..ensemble.grid().len())
            .into_par_iter()
            .map(|step| {
                let mut slice = ensemble.cross_section(side, step);
                let ee = slice_mean(&slice);
                let pfe = slice_quantile(&mut slice, confidence);
                (ee, pfe)
            })
            .unzip();

        Ok(ExposureCurve {
            side,
            confidence,
            ee,
            pfe,
        })
    }

    /// Aggregates both sides.
    pub fn aggregate_bilateral(&self, ensemble: &PathEnsemble) -> Result<BilateralExposure, XvaError> {
        let (counterparty, own) = rayon::join(
            || self.aggregate(ensemble, ExposureSide::Counterparty),
            || self.aggregate(ensemble, ExposureSide::Own),
        );
        Ok(BilateralExposure {
            counterparty: counterparty?,
            own: own?,
        })
    }
}
