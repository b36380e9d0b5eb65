//! Cross-sectional exposure statistics on raw value matrices.
//!
//! Matrices are indexed `[path_idx][time_idx]` and hold mark-to-market
//! values; exposures are taken inside each statistic.

use rayon::prelude::*;

/// Arithmetic mean of one cross-section, summed in path order.
///
/// A constant cross-section returns its common value exactly.
#[inline]
pub(crate) fn slice_mean(values: &[f64]) -> f64 {
    let Some(&first) = values.first() else {
        return 0.0;
    };
    if values.iter().all(|&v| v == first) {
        return first;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Rank used for the confidence quantile of `n` sorted values:
/// `floor(c × (n − 1))`, clamped to the last index.
#[inline]
pub(crate) fn quantile_rank(n: usize, confidence: f64) -> usize {
    if n == 0 {
        return 0;
    }
    let rank = (confidence * (n - 1) as f64).floor();
    if rank <= 0.0 {
        0
    } else {
        (rank as usize).min(n - 1)
    }
}

/// Confidence quantile of one cross-section. Sorts `values` in place
/// (stable, total order).
#[inline]
pub(crate) fn slice_quantile(values: &mut [f64], confidence: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(f64::total_cmp);
    values[quantile_rank(values.len(), confidence)]
}

#[inline]
fn positive(v: f64) -> f64 {
    if v > 0.0 {
        v
    } else {
        0.0
    }
}

#[inline]
fn negative(v: f64) -> f64 {
    if v < 0.0 {
        -v
    } else {
        0.0
    }
}

/// Exposure calculation utilities on value matrices.
pub struct ExposureCalculator;

impl ExposureCalculator {
    /// Computes Expected Exposure at each time point.
    ///
    /// EE(t) = E[max(V(t), 0)]
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_xva::exposure::ExposureCalculator;
    ///
    /// let values = vec![
    ///     vec![10.0, 20.0, 15.0],   // Scenario 1
    ///     vec![5.0, -10.0, 25.0],   // Scenario 2
    ///     vec![-5.0, 15.0, 10.0],   // Scenario 3
    /// ];
    ///
    /// let ee = ExposureCalculator::expected_exposure(&values);
    /// // At t=0: (10 + 5 + 0) / 3 = 5
    /// assert!((ee[0] - 5.0).abs() < 1e-12);
    /// ```
    pub fn expected_exposure(values: &[Vec<f64>]) -> Vec<f64> {
        Self::column_means(values, positive)
    }

    /// Computes Expected Negative Exposure at each time point.
    ///
    /// ENE(t) = E[max(−V(t), 0)]
    pub fn expected_negative_exposure(values: &[Vec<f64>]) -> Vec<f64> {
        Self::column_means(values, negative)
    }

    /// Computes Potential Future Exposure at the given confidence level.
    ///
    /// PFE(t, c) is the value at rank `floor(c × (M − 1))` of the sorted
    /// exposures at t; c = 1 gives the cross-path maximum.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_xva::exposure::ExposureCalculator;
    ///
    /// let values = vec![
    ///     vec![10.0, 20.0],
    ///     vec![5.0, 30.0],
    ///     vec![15.0, 10.0],
    ///     vec![8.0, 25.0],
    /// ];
    ///
    /// let pfe = ExposureCalculator::potential_future_exposure(&values, 1.0);
    /// assert_eq!(pfe, vec![15.0, 30.0]);
    /// ```
    pub fn potential_future_exposure(values: &[Vec<f64>], confidence: f64) -> Vec<f64> {
        let Some(first) = values.first() else {
            return Vec::new();
        };

        (0..first.len())
            .into_par_iter()
            .map(|t| {
                let mut exposures: Vec<f64> = values.iter().map(|path| positive(path[t])).collect();
                slice_quantile(&mut exposures, confidence)
            })
            .collect()
    }

    /// Time-weighted Expected Positive Exposure on a uniform grid.
    ///
    /// EPE = (1/T) ∫₀ᵀ EE(t) dt, trapezoidal.
    pub fn expected_positive_exposure(ee: &[f64], dt: f64) -> f64 {
        if ee.len() < 2 {
            return ee.first().copied().unwrap_or(0.0);
        }
        let integral: f64 = ee.windows(2).map(|w| 0.5 * (w[0] + w[1]) * dt).sum();
        integral / ((ee.len() - 1) as f64 * dt)
    }

    /// Peak of a profile (0 for an empty profile).
    #[inline]
    pub fn peak(profile: &[f64]) -> f64 {
        profile.iter().copied().fold(0.0_f64, f64::max)
    }

    fn column_means(values: &[Vec<f64>], f: fn(f64) -> f64) -> Vec<f64> {
        let Some(first) = values.first() else {
            return Vec::new();
        };
        let n = values.len() as f64;

        (0..first.len())
            .into_par_iter()
            .map(|t| values.iter().map(|path| f(path[t])).sum::<f64>() / n)
            .collect()
    }
}
