//! Exposure and adjustment tables at key tenors.

use pricer_pricing::mc::TimeGrid;
use serde::{Deserialize, Serialize};

use crate::exposure::ExposureCurve;
use crate::xva::{AdjustmentKind, XvaResult};

/// Reporting tenors in years, before the trade tenor is appended.
pub const KEY_TENORS: [f64; 6] = [0.25, 0.5, 1.0, 2.0, 3.0, 4.0];

/// A reporting tenor resolved to a grid step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TenorPoint {
    /// Requested tenor in years.
    pub tenor: f64,
    /// Grid step, `round(tenor × 252)` clamped to the grid.
    pub step: usize,
}

/// Key tenors strictly inside `tenor`, followed by `tenor` itself, resolved on
/// `grid`. Tenors that land on an already listed step are dropped.
///
/// # Examples
///
/// ```
/// use pricer_pricing::mc::TimeGrid;
/// use pricer_xva::report::key_tenor_points;
///
/// let grid = TimeGrid::from_tenor(1.5);
/// let points = key_tenor_points(1.5, &grid);
/// let steps: Vec<usize> = points.iter().map(|p| p.step).collect();
/// assert_eq!(steps, vec![63, 126, 252, 378]);
/// ```
pub fn key_tenor_points(tenor: f64, grid: &TimeGrid) -> Vec<TenorPoint> {
    let mut points: Vec<TenorPoint> = Vec::with_capacity(KEY_TENORS.len() + 1);
    let candidates = KEY_TENORS
        .iter()
        .copied()
        .filter(|&k| k < tenor)
        .chain(std::iter::once(tenor));

    for k in candidates {
        let step = grid.nearest_step(k);
        if points.last().is_some_and(|p| p.step >= step) {
            continue;
        }
        points.push(TenorPoint { tenor: k, step });
    }
    points
}

/// EE and PFE at one key tenor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TenorProfileRow {
    /// Requested tenor in years.
    pub tenor: f64,
    /// Grid time in years.
    pub time: f64,
    /// Expected exposure.
    pub ee: f64,
    /// Potential future exposure.
    pub pfe: f64,
}

/// EE/PFE profile at the key tenors.
pub fn tenor_profile(curve: &ExposureCurve, grid: &TimeGrid, tenor: f64) -> Vec<TenorProfileRow> {
    key_tenor_points(tenor, grid)
        .into_iter()
        .filter(|p| p.step < curve.len())
        .map(|p| TenorProfileRow {
            tenor: p.tenor,
            time: grid.time(p.step),
            ee: curve.ee[p.step],
            pfe: curve.pfe[p.step],
        })
        .collect()
}

/// Increment since the previous key tenor and running total of one
/// adjustment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SliceValue {
    /// `cumulative(step) − cumulative(previous step)`.
    pub increment: f64,
    /// `cumulative(step)`.
    pub cumulative: f64,
}

/// Adjustment accrual between consecutive key tenors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentSliceRow {
    /// Requested tenor in years.
    pub tenor: f64,
    /// Grid time in years.
    pub time: f64,
    /// CVA slice.
    pub cva: SliceValue,
    /// DVA slice.
    pub dva: SliceValue,
    /// FVA slice.
    pub fva: SliceValue,
    /// LVA slice.
    pub lva: SliceValue,
}

impl AdjustmentSliceRow {
    /// Slice for `kind`.
    pub fn get(&self, kind: AdjustmentKind) -> SliceValue {
        match kind {
            AdjustmentKind::Cva => self.cva,
            AdjustmentKind::Dva => self.dva,
            AdjustmentKind::Fva => self.fva,
            AdjustmentKind::Lva => self.lva,
        }
    }
}

/// Adjustment-by-slice table at the key tenors.
pub fn adjustment_slices(xva: &XvaResult, grid: &TimeGrid, tenor: f64) -> Vec<AdjustmentSliceRow> {
    let mut previous: Option<usize> = None;
    key_tenor_points(tenor, grid)
        .into_iter()
        .map(|p| {
            let slice = |kind: AdjustmentKind| {
                let curve = xva.curve(kind);
                let cumulative = curve.cumulative_at(p.step);
                let start = previous.map_or(0.0, |s| curve.cumulative_at(s));
                SliceValue {
                    increment: cumulative - start,
                    cumulative,
                }
            };
            let row = AdjustmentSliceRow {
                tenor: p.tenor,
                time: grid.time(p.step),
                cva: slice(AdjustmentKind::Cva),
                dva: slice(AdjustmentKind::Dva),
                fva: slice(AdjustmentKind::Fva),
                lva: slice(AdjustmentKind::Lva),
            };
            previous = Some(p.step);
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xva::AdjustmentCurve;
    use approx::assert_relative_eq;
    use pricer_pricing::mc::ExposureSide;

    #[test]
    fn test_key_tenors_five_years() {
        let grid = TimeGrid::from_tenor(5.0);
        let points = key_tenor_points(5.0, &grid);
        let tenors: Vec<f64> = points.iter().map(|p| p.tenor).collect();
        assert_eq!(tenors, vec![0.25, 0.5, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(points.last().map(|p| p.step), Some(1260));
    }

    #[test]
    fn test_key_tenors_short_trade() {
        let grid = TimeGrid::from_tenor(0.1);
        let points = key_tenor_points(0.1, &grid);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].step, 25);
    }

    #[test]
    fn test_tenor_profile_reads_curve() {
        let grid = TimeGrid::from_tenor(1.0);
        let curve = ExposureCurve {
            side: ExposureSide::Counterparty,
            confidence: 0.95,
            ee: (0..grid.len()).map(|s| s as f64).collect(),
            pfe: (0..grid.len()).map(|s| 2.0 * s as f64).collect(),
        };

        let rows = tenor_profile(&curve, &grid, 1.0);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].ee, 63.0);
        assert_eq!(rows[2].pfe, 504.0);
        assert_relative_eq!(rows[2].time, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_slices_sum_to_total() {
        let grid = TimeGrid::from_tenor(1.0);
        let linear = |kind| AdjustmentCurve {
            kind,
            integrand: vec![1.0; grid.len()],
            cumulative: (0..grid.len()).map(|s| s as f64 * 0.5).collect(),
        };
        let xva = XvaResult::new(
            linear(AdjustmentKind::Cva),
            linear(AdjustmentKind::Dva),
            linear(AdjustmentKind::Fva),
            linear(AdjustmentKind::Lva),
        );

        let rows = adjustment_slices(&xva, &grid, 1.0);
        let sum: f64 = rows.iter().map(|r| r.cva.increment).sum();
        assert_relative_eq!(sum, xva.net.cva);
        assert_relative_eq!(rows[1].get(AdjustmentKind::Fva).increment, 63.0 * 0.5);
        assert_eq!(rows[2].lva.cumulative, xva.net.lva);
    }
}
