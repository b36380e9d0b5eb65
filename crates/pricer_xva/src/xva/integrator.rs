//! Trapezoidal integration of discounted, cost-weighted exposure curves.
//!
//! ```text
//! integrand(s)  = driving(s) × cost(s) × DF(s)
//! cumulative(0) = 0
//! cumulative(s) = cumulative(s−1) + ½(integrand(s−1) + integrand(s)) × dt,  s ≤ H
//! cumulative(s) = cumulative(H),                                           s > H
//! ```

use serde::{Deserialize, Serialize};

use super::cost::CostCurve;
use super::error::XvaError;
use super::AdjustmentKind;

/// Integrand and running integral of one valuation adjustment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentCurve {
    /// Adjustment this curve belongs to.
    pub kind: AdjustmentKind,
    /// `driving × cost × DF` at each grid point.
    pub integrand: Vec<f64>,
    /// Running trapezoidal integral.
    pub cumulative: Vec<f64>,
}

impl AdjustmentCurve {
    /// Total adjustment, the final cumulative value.
    #[inline]
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Cumulative value at `step`, clamped to the curve.
    #[inline]
    pub fn cumulative_at(&self, step: usize) -> f64 {
        match self.cumulative.len() {
            0 => 0.0,
            n => self.cumulative[step.min(n - 1)],
        }
    }
}

/// Integrator for adjustment curves on a uniform grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdjustmentIntegrator {
    dt: f64,
}

impl AdjustmentIntegrator {
    /// Creates an integrator for step size `dt` (years).
    pub fn new(dt: f64) -> Self {
        Self { dt }
    }

    /// Step size in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Integrates `driving` against `cost`.
    ///
    /// # Errors
    ///
    /// - `XvaError::EmptyTimeGrid` if `driving` is empty
    /// - `XvaError::TimeGridMismatch` if `driving` and `cost` lengths differ
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_xva::xva::{AdjustmentIntegrator, AdjustmentKind, CostCurve};
    ///
    /// let cost = CostCurve::new(vec![1.0; 3], 0.5);
    /// let curve = AdjustmentIntegrator::new(1.0)
    ///     .integrate(AdjustmentKind::Fva, &[0.0, 2.0, 2.0], &cost)
    ///     .unwrap();
    ///
    /// assert_eq!(curve.integrand, vec![0.0, 1.0, 1.0]);
    /// assert_eq!(curve.cumulative, vec![0.0, 0.5, 1.5]);
    /// assert_eq!(curve.total(), 1.5);
    /// ```
    pub fn integrate(
        &self,
        kind: AdjustmentKind,
        driving: &[f64],
        cost: &CostCurve,
    ) -> Result<AdjustmentCurve, XvaError> {
        if driving.is_empty() {
            return Err(XvaError::EmptyTimeGrid);
        }
        if driving.len() != cost.len() {
            return Err(XvaError::TimeGridMismatch {
                expected: driving.len(),
                actual: cost.len(),
            });
        }

        let discount_factors = cost.discount_factors();
        let integrand: Vec<f64> = driving
            .iter()
            .zip(discount_factors)
            .enumerate()
            .map(|(s, (&e, &df))| {
                let rate = cost.cost(s);
                if rate == 0.0 {
                    0.0
                } else {
                    e * rate * df
                }
            })
            .collect();

        let horizon = cost.horizon_step();
        let mut cumulative = Vec::with_capacity(integrand.len());
        let mut running = 0.0;
        cumulative.push(running);
        for s in 1..integrand.len() {
            if s <= horizon {
                running += 0.5 * (integrand[s - 1] + integrand[s]) * self.dt;
            }
            cumulative.push(running);
        }

        Ok(AdjustmentCurve {
            kind,
            integrand,
            cumulative,
        })
    }
}
