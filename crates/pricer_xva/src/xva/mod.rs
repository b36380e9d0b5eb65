//! XVA calculations (CVA, DVA, FVA, LVA).
//!
//! Every adjustment integrates one exposure profile against a flat cost rate
//! and the risk-free discount curve:
//!
//! | Adjustment | Driving exposure | Cost rate | Horizon |
//! |---|---|---|---|
//! | CVA | PFE, counterparty side | λ_cp × (1 − R_cp) | tenor |
//! | DVA | PFE, own side | λ_own × (1 − R_own) | tenor |
//! | FVA | EE, counterparty side | funding spread | tenor |
//! | LVA | EE, counterparty side | liquidity spread | liquidity horizon |
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │               XvaCalculator               │
//! ├───────────────────────────────────────────┤
//! │  Inputs:                                  │
//! │    - BilateralExposure (EE/PFE per side)  │
//! │    - XvaParams (credit, funding, LVA)     │
//! │    - TimeGrid (daily, 252 per year)       │
//! ├───────────────────────────────────────────┤
//! │  Outputs:                                 │
//! │    - AdjustmentCurve per kind             │
//! │    - NetAdjustments, net curve            │
//! └───────────────────────────────────────────┘
//! ```

mod cost;
mod cva;
mod dva;
mod error;
mod fva;
mod integrator;
mod lva;
mod params;
mod result;

pub use cost::{generate_flat_discount_factors, CostCurve};
pub use cva::{compute_cva, cva_cost_curve};
pub use dva::{compute_dva, dva_cost_curve};
pub use error::XvaError;
pub use fva::{compute_fva, fva_cost_curve};
pub use integrator::{AdjustmentCurve, AdjustmentIntegrator};
pub use lva::{compute_lva, lva_cost_curve};
pub use params::{
    CreditParams, FundingParams, LiquidityParams, XvaParams, CALENDAR_DAYS_PER_YEAR,
};
pub use result::{NetAdjustments, XvaResult};

use pricer_pricing::mc::{ExposureSide, TimeGrid};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::exposure::{BilateralExposure, ExposureMeasure};

/// The four valuation adjustments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    /// Credit Valuation Adjustment.
    Cva,
    /// Debit Valuation Adjustment.
    Dva,
    /// Funding Valuation Adjustment.
    Fva,
    /// Liquidity Valuation Adjustment.
    Lva,
}

impl AdjustmentKind {
    /// All kinds in reporting order.
    pub const ALL: [AdjustmentKind; 4] = [Self::Cva, Self::Dva, Self::Fva, Self::Lva];

    /// Exposure side that drives this adjustment.
    #[inline]
    pub fn driving_side(self) -> ExposureSide {
        match self {
            Self::Dva => ExposureSide::Own,
            Self::Cva | Self::Fva | Self::Lva => ExposureSide::Counterparty,
        }
    }

    /// Exposure statistic that drives this adjustment.
    #[inline]
    pub fn driving_measure(self) -> ExposureMeasure {
        match self {
            Self::Cva | Self::Dva => ExposureMeasure::Potential,
            Self::Fva | Self::Lva => ExposureMeasure::Expected,
        }
    }

    /// Upper-case label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cva => "CVA",
            Self::Dva => "DVA",
            Self::Fva => "FVA",
            Self::Lva => "LVA",
        }
    }
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// XVA calculator for one trade on one grid.
///
/// # Examples
///
/// ```
/// use pricer_pricing::mc::{simulate_ensemble, CancellationToken, ScenarioConfig};
/// use pricer_xva::exposure::ExposureAggregator;
/// use pricer_xva::xva::{XvaCalculator, XvaParams};
///
/// let config = ScenarioConfig::builder()
///     .tenor(1.0)
///     .n_paths(500)
///     .seed(42)
///     .build()
///     .unwrap();
/// let ensemble = simulate_ensemble(&config, &CancellationToken::new()).unwrap();
/// let exposure = ExposureAggregator::new(0.95)
///     .unwrap()
///     .aggregate_bilateral(&ensemble)
///     .unwrap();
///
/// let calculator = XvaCalculator::new(XvaParams::default(), *ensemble.grid()).unwrap();
/// let result = calculator.compute_all(&exposure).unwrap();
///
/// assert!(result.net.cva > 0.0);
/// assert!(result.net.lva < result.net.fva);
/// ```
#[derive(Clone, Debug)]
pub struct XvaCalculator {
    params: XvaParams,
    grid: TimeGrid,
    discount_factors: Vec<f64>,
}

impl XvaCalculator {
    /// Creates a calculator, validating `params`.
    ///
    /// # Errors
    ///
    /// Returns the first `XvaError` reported by [`XvaParams::validate`].
    pub fn new(params: XvaParams, grid: TimeGrid) -> Result<Self, XvaError> {
        params.validate()?;
        let discount_factors = generate_flat_discount_factors(params.discount_rate, &grid.times());
        Ok(Self {
            params,
            grid,
            discount_factors,
        })
    }

    /// Parameters in use.
    #[inline]
    pub fn params(&self) -> &XvaParams {
        &self.params
    }

    /// Grid in use.
    #[inline]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Discount factors on the grid.
    #[inline]
    pub fn discount_factors(&self) -> &[f64] {
        &self.discount_factors
    }

    /// Cost curve for `kind`.
    pub fn cost_curve(&self, kind: AdjustmentKind) -> CostCurve {
        let df = &self.discount_factors;
        match kind {
            AdjustmentKind::Cva => cva_cost_curve(df, &self.params.counterparty),
            AdjustmentKind::Dva => dva_cost_curve(df, &self.params.own_credit),
            AdjustmentKind::Fva => fva_cost_curve(df, &self.params.funding),
            AdjustmentKind::Lva => lva_cost_curve(df, &self.params.liquidity, &self.grid),
        }
    }

    /// Computes one adjustment.
    ///
    /// # Errors
    ///
    /// Returns `XvaError::TimeGridMismatch` if the exposure curves were not
    /// produced on this calculator's grid.
    pub fn compute(
        &self,
        kind: AdjustmentKind,
        exposure: &BilateralExposure,
    ) -> Result<AdjustmentCurve, XvaError> {
        let driving = exposure
            .side(kind.driving_side())
            .measure(kind.driving_measure());
        let df = &self.discount_factors;
        let dt = self.grid.dt();

        let curve = match kind {
            AdjustmentKind::Cva => compute_cva(driving, df, &self.params.counterparty, dt),
            AdjustmentKind::Dva => compute_dva(driving, df, &self.params.own_credit, dt),
            AdjustmentKind::Fva => compute_fva(driving, df, &self.params.funding, dt),
            AdjustmentKind::Lva => compute_lva(driving, df, &self.params.liquidity, &self.grid),
        }?;

        tracing::debug!(adjustment = %kind, total = curve.total(), "adjustment integrated");
        Ok(curve)
    }

    /// Computes all four adjustments concurrently.
    pub fn compute_all(&self, exposure: &BilateralExposure) -> Result<XvaResult, XvaError> {
        let ((cva, dva), (fva, lva)) = rayon::join(
            || {
                rayon::join(
                    || self.compute(AdjustmentKind::Cva, exposure),
                    || self.compute(AdjustmentKind::Dva, exposure),
                )
            },
            || {
                rayon::join(
                    || self.compute(AdjustmentKind::Fva, exposure),
                    || self.compute(AdjustmentKind::Lva, exposure),
                )
            },
        );

        Ok(XvaResult::new(cva?, dva?, fva?, lva?))
    }
}
