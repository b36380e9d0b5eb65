//! XVA parameter structures.
//!
//! Provides credit, funding, liquidity and discounting parameters. Every
//! adjustment reduces its parameters to a flat annual cost rate applied to
//! the driving exposure curve.

use serde::{Deserialize, Serialize};

use super::error::XvaError;

/// Days per year used to convert a liquidity horizon given in calendar days.
pub const CALENDAR_DAYS_PER_YEAR: f64 = 365.25;

/// Credit parameters of one party: constant hazard rate and recovery rate.
///
/// Used for the counterparty (CVA) and for ourselves (DVA).
///
/// # Examples
///
/// ```
/// use pricer_xva::xva::CreditParams;
///
/// // 1% hazard rate, 40% recovery
/// let params = CreditParams::new(0.01, 0.4).unwrap();
/// assert!((params.lgd() - 0.6).abs() < 1e-12);
/// assert!((params.cost_rate() - 0.006).abs() < 1e-12);
///
/// assert!(CreditParams::new(0.01, 1.2).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreditParams {
    /// Annualised hazard rate λ.
    hazard_rate: f64,
    /// Recovery rate R in [0, 1].
    recovery_rate: f64,
}

impl CreditParams {
    /// Creates new credit parameters.
    ///
    /// # Errors
    ///
    /// Returns `XvaError::InvalidCreditParam` if the hazard rate is negative
    /// or non-finite, or the recovery rate is outside [0, 1].
    pub fn new(hazard_rate: f64, recovery_rate: f64) -> Result<Self, XvaError> {
        let params = Self {
            hazard_rate,
            recovery_rate,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validates the parameters.
    pub fn validate(&self) -> Result<(), XvaError> {
        if !(self.hazard_rate.is_finite() && self.hazard_rate >= 0.0) {
            return Err(XvaError::InvalidCreditParam(format!(
                "Hazard rate must be non-negative, got {}",
                self.hazard_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.recovery_rate) {
            return Err(XvaError::InvalidCreditParam(format!(
                "Recovery rate must be in range [0, 1], got {}",
                self.recovery_rate
            )));
        }
        Ok(())
    }

    /// Returns the hazard rate.
    #[inline]
    pub fn hazard_rate(&self) -> f64 {
        self.hazard_rate
    }

    /// Returns the recovery rate.
    #[inline]
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// Loss given default, `1 − R`.
    #[inline]
    pub fn lgd(&self) -> f64 {
        1.0 - self.recovery_rate
    }

    /// Annual cost rate `λ × (1 − R)`.
    #[inline]
    pub fn cost_rate(&self) -> f64 {
        self.hazard_rate * self.lgd()
    }
}

/// Funding spread for FVA.
///
/// # Examples
///
/// ```
/// use pricer_xva::xva::FundingParams;
///
/// let params = FundingParams::from_bps(20.0);
/// assert!((params.spread - 0.002).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FundingParams {
    /// Funding spread as annualised decimal (e.g. 0.002 = 20bp).
    pub spread: f64,
}

impl FundingParams {
    /// Creates funding parameters from a decimal spread.
    #[inline]
    pub fn new(spread: f64) -> Self {
        Self { spread }
    }

    /// Creates funding parameters from basis points.
    #[inline]
    pub fn from_bps(bps: f64) -> Self {
        Self::new(bps / 10_000.0)
    }

    /// Zero spread (no FVA impact).
    #[inline]
    pub fn zero() -> Self {
        Self::new(0.0)
    }

    /// Validates the funding parameters.
    pub fn validate(&self) -> Result<(), XvaError> {
        if !(self.spread.is_finite() && self.spread >= 0.0) {
            return Err(XvaError::InvalidFundingSpread(format!(
                "Funding spread must be non-negative, got {}",
                self.spread
            )));
        }
        Ok(())
    }
}

/// Liquidity spread and the horizon over which it accrues.
///
/// # Examples
///
/// ```
/// use pricer_xva::xva::LiquidityParams;
///
/// let params = LiquidityParams::from_days(0.005, 10.0);
/// assert!((params.horizon_years - 10.0 / 365.25).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiquidityParams {
    /// Liquidity spread as annualised decimal.
    pub spread: f64,
    /// Liquidity horizon in years.
    pub horizon_years: f64,
}

impl LiquidityParams {
    /// Creates liquidity parameters with a horizon in years.
    #[inline]
    pub fn new(spread: f64, horizon_years: f64) -> Self {
        Self {
            spread,
            horizon_years,
        }
    }

    /// Creates liquidity parameters with a horizon in calendar days.
    #[inline]
    pub fn from_days(spread: f64, horizon_days: f64) -> Self {
        Self::new(spread, horizon_days / CALENDAR_DAYS_PER_YEAR)
    }

    /// Horizon in calendar days.
    #[inline]
    pub fn horizon_days(&self) -> f64 {
        self.horizon_years * CALENDAR_DAYS_PER_YEAR
    }

    /// Validates the liquidity parameters.
    pub fn validate(&self) -> Result<(), XvaError> {
        if !(self.spread.is_finite() && self.spread >= 0.0) {
            return Err(XvaError::InvalidLiquidityParam(format!(
                "Liquidity spread must be non-negative, got {}",
                self.spread
            )));
        }
        if !(self.horizon_years.is_finite() && self.horizon_years >= 0.0) {
            return Err(XvaError::InvalidLiquidityParam(format!(
                "Liquidity horizon must be non-negative, got {}",
                self.horizon_years
            )));
        }
        Ok(())
    }
}

/// Full parameter set for the four adjustments.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XvaParams {
    /// Flat continuously-compounded discount rate.
    pub discount_rate: f64,
    /// Counterparty credit (CVA).
    pub counterparty: CreditParams,
    /// Own credit (DVA).
    pub own_credit: CreditParams,
    /// Funding spread (FVA).
    pub funding: FundingParams,
    /// Liquidity spread and horizon (LVA).
    pub liquidity: LiquidityParams,
}

impl Default for XvaParams {
    fn default() -> Self {
        Self {
            discount_rate: 0.03,
            counterparty: CreditParams {
                hazard_rate: 0.01,
                recovery_rate: 0.4,
            },
            own_credit: CreditParams {
                hazard_rate: 0.02,
                recovery_rate: 0.3,
            },
            funding: FundingParams::new(0.002),
            liquidity: LiquidityParams::from_days(0.005, 10.0),
        }
    }
}

impl XvaParams {
    /// Validates every component.
    pub fn validate(&self) -> Result<(), XvaError> {
        if !self.discount_rate.is_finite() {
            return Err(XvaError::InvalidDiscountRate(self.discount_rate));
        }
        self.counterparty.validate()?;
        self.own_credit.validate()?;
        self.funding.validate()?;
        self.liquidity.validate()
    }
}
