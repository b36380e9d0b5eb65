//! Funding Valuation Adjustment (FVA) calculation.
//!
//! FVA represents the cost of funding the expected positive exposure.
//!
//! FVA = ∫₀ᵀ EE_cp(t) × s_funding × DF(t) dt

use super::cost::CostCurve;
use super::error::XvaError;
use super::integrator::{AdjustmentCurve, AdjustmentIntegrator};
use super::params::FundingParams;
use super::AdjustmentKind;

/// Cost curve for FVA: funding spread over the full tenor.
pub fn fva_cost_curve(discount_factors: &[f64], funding: &FundingParams) -> CostCurve {
    CostCurve::new(discount_factors.to_vec(), funding.spread)
}

/// Computes the FVA curve from the counterparty-side EE profile.
///
/// # Examples
///
/// ```
/// use pricer_xva::xva::{compute_fva, FundingParams};
///
/// let ee = vec![0.0, 100.0, 150.0, 100.0, 50.0];
/// let df = vec![1.0, 0.99, 0.98, 0.97, 0.96];
///
/// let fva = compute_fva(&ee, &df, &FundingParams::from_bps(50.0), 0.25).unwrap();
/// assert!(fva.total() > 0.0);
/// ```
pub fn compute_fva(
    ee: &[f64],
    discount_factors: &[f64],
    funding: &FundingParams,
    dt: f64,
) -> Result<AdjustmentCurve, XvaError> {
    AdjustmentIntegrator::new(dt).integrate(
        AdjustmentKind::Fva,
        ee,
        &fva_cost_curve(discount_factors, funding),
    )
}
