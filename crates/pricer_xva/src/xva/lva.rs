//! Liquidity Valuation Adjustment (LVA) calculation.
//!
//! LVA charges the liquidity spread on the expected positive exposure, but
//! only over the liquidity horizon H:
//!
//! LVA = ∫₀ᴴ EE_cp(t) × s_liquidity × DF(t) dt
//!
//! H is converted to a grid step with `floor(H × 252)`, clamped to the tenor.
//! Past H the cumulative curve stays flat.

use pricer_pricing::mc::TimeGrid;

use super::cost::CostCurve;
use super::error::XvaError;
use super::integrator::{AdjustmentCurve, AdjustmentIntegrator};
use super::params::LiquidityParams;
use super::AdjustmentKind;

/// Cost curve for LVA: liquidity spread up to the horizon step.
pub fn lva_cost_curve(
    discount_factors: &[f64],
    liquidity: &LiquidityParams,
    grid: &TimeGrid,
) -> CostCurve {
    CostCurve::new(discount_factors.to_vec(), liquidity.spread)
        .with_horizon_step(grid.horizon_step(liquidity.horizon_years))
}

/// Computes the LVA curve from the counterparty-side EE profile.
pub fn compute_lva(
    ee: &[f64],
    discount_factors: &[f64],
    liquidity: &LiquidityParams,
    grid: &TimeGrid,
) -> Result<AdjustmentCurve, XvaError> {
    AdjustmentIntegrator::new(grid.dt()).integrate(
        AdjustmentKind::Lva,
        ee,
        &lva_cost_curve(discount_factors, liquidity, grid),
    )
}
