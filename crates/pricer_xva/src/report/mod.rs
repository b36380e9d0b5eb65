//! Reporting helpers: key-tenor tables, histograms, headline statistics and
//! closed-form references.

mod analytics;
mod histogram;
mod profile;
mod summary;

pub use analytics::{analytic_ee_curve, analytic_expected_exposure, norm_cdf};
pub use histogram::{Histogram, HistogramBin, DEFAULT_BINS};
pub use profile::{
    adjustment_slices, key_tenor_points, tenor_profile, AdjustmentSliceRow, SliceValue,
    TenorPoint, TenorProfileRow, KEY_TENORS,
};
pub use summary::ExposureSummary;
