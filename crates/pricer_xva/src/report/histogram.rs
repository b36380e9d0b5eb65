//! Fixed-width histograms of exposure samples.

use serde::{Deserialize, Serialize};

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 30;

/// One histogram bin, `[lower, upper)` except the last which is closed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Display label.
    pub label: String,
    /// Lower edge.
    pub lower: f64,
    /// Upper edge.
    pub upper: f64,
    /// Number of samples in the bin.
    pub count: usize,
}

/// Histogram of a sample.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bins in ascending order.
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Bins `values` into `n_bins` equal-width bins between the sample
    /// minimum and maximum.
    ///
    /// An empty sample gives no bins; a constant sample gives one bin
    /// labelled `"All"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_xva::report::Histogram;
    ///
    /// let histogram = Histogram::from_values(&[0.0, 1.0, 2.0, 3.0], 2);
    /// assert_eq!(histogram.counts(), vec![2, 2]);
    ///
    /// let flat = Histogram::from_values(&[5.0; 4], 30);
    /// assert_eq!(flat.bins[0].label, "All");
    /// ```
    pub fn from_values(values: &[f64], n_bins: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || n_bins == 0 {
            return Self::default();
        }

        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if min == max {
            return Self {
                bins: vec![HistogramBin {
                    label: "All".to_string(),
                    lower: min,
                    upper: max,
                    count: finite.len(),
                }],
            };
        }

        let width = (max - min) / n_bins as f64;
        let mut bins: Vec<HistogramBin> = (0..n_bins)
            .map(|i| {
                let lower = min + i as f64 * width;
                let upper = if i + 1 == n_bins { max } else { lower + width };
                HistogramBin {
                    label: format!("{:.1}M - {:.1}M", lower / 1e6, upper / 1e6),
                    lower,
                    upper,
                    count: 0,
                }
            })
            .collect();

        for v in finite {
            let index = (((v - min) / width).floor() as usize).min(n_bins - 1);
            bins[index].count += 1;
        }

        Self { bins }
    }

    /// Counts per bin.
    pub fn counts(&self) -> Vec<usize> {
        self.bins.iter().map(|b| b.count).collect()
    }

    /// Total number of samples binned.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}
