//! Debit Valuation Adjustment (DVA) calculation.
//!
//! DVA mirrors CVA on our own default: the counterparty's exposure to us,
//! weighted by our own hazard rate and loss given default.
//!
//! DVA = ∫₀ᵀ PFE_own(t) × λ_own × (1 − R_own) × DF(t) dt

use super::cost::CostCurve;
use super::error::XvaError;
use super::integrator::{AdjustmentCurve, AdjustmentIntegrator};
use super::params::CreditParams;
use super::AdjustmentKind;

/// Cost curve for DVA: own `λ(1 − R)` over the full tenor.
pub fn dva_cost_curve(discount_factors: &[f64], own_credit: &CreditParams) -> CostCurve {
    CostCurve::new(discount_factors.to_vec(), own_credit.cost_rate())
}

/// Computes the DVA curve from the own-side PFE profile.
pub fn compute_dva(
    pfe: &[f64],
    discount_factors: &[f64],
    own_credit: &CreditParams,
    dt: f64,
) -> Result<AdjustmentCurve, XvaError> {
    AdjustmentIntegrator::new(dt).integrate(
        AdjustmentKind::Dva,
        pfe,
        &dva_cost_curve(discount_factors, own_credit),
    )
}
