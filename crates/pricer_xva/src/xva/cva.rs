//! Credit Valuation Adjustment (CVA) calculation.
//!
//! CVA represents the expected loss due to counterparty default.
//!
//! # Formula
//!
//! CVA = ∫₀ᵀ PFE_cp(t) × λ_cp × (1 − R_cp) × DF(t) dt
//!
//! Where:
//! - PFE_cp(t) = Potential Future Exposure to the counterparty
//! - λ_cp = Counterparty hazard rate
//! - R_cp = Counterparty recovery rate
//! - DF(t) = Risk-free discount factor

use super::cost::CostCurve;
use super::error::XvaError;
use super::integrator::{AdjustmentCurve, AdjustmentIntegrator};
use super::params::CreditParams;
use super::AdjustmentKind;

/// Cost curve for CVA: counterparty `λ(1 − R)` over the full tenor.
pub fn cva_cost_curve(discount_factors: &[f64], counterparty: &CreditParams) -> CostCurve {
    CostCurve::new(discount_factors.to_vec(), counterparty.cost_rate())
}

/// Computes the CVA curve.
///
/// # Arguments
///
/// * `pfe` - Counterparty-side PFE profile
/// * `discount_factors` - Risk-free discount factors at each grid point
/// * `counterparty` - Counterparty credit parameters
/// * `dt` - Grid step in years
///
/// # Examples
///
/// ```
/// use pricer_xva::xva::{compute_cva, CreditParams};
///
/// let pfe = vec![0.0, 100.0, 150.0, 100.0, 50.0];
/// let df = vec![1.0; 5];
/// let credit = CreditParams::new(0.02, 0.4).unwrap();
///
/// let cva = compute_cva(&pfe, &df, &credit, 0.25).unwrap();
/// assert!(cva.total() > 0.0);
/// ```
pub fn compute_cva(
    pfe: &[f64],
    discount_factors: &[f64],
    counterparty: &CreditParams,
    dt: f64,
) -> Result<AdjustmentCurve, XvaError> {
    AdjustmentIntegrator::new(dt).integrate(
        AdjustmentKind::Cva,
        pfe,
        &cva_cost_curve(discount_factors, counterparty),
    )
}
