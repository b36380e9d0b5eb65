//! Error types for exposure aggregation and XVA integration.

use thiserror::Error;

/// XVA calculation error.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum XvaError {
    /// Invalid hazard rate or recovery rate.
    #[error("Invalid credit parameter: {0}")]
    InvalidCreditParam(String),

    /// Invalid funding spread.
    #[error("Invalid funding spread: {0}")]
    InvalidFundingSpread(String),

    /// Invalid liquidity spread or horizon.
    #[error("Invalid liquidity parameter: {0}")]
    InvalidLiquidityParam(String),

    /// Invalid discount rate.
    #[error("Invalid discount rate: {0}")]
    InvalidDiscountRate(f64),

    /// PFE confidence level outside (0, 1].
    #[error("Invalid confidence level {0}: must be in (0, 1]")]
    InvalidConfidence(f64),

    /// Too few paths for cross-sectional statistics.
    #[error("Insufficient paths for exposure aggregation: got {count}, need at least 2")]
    InsufficientPaths {
        /// Number of paths supplied.
        count: usize,
    },

    /// Curve length does not match the time grid.
    #[error("Time grid mismatch: expected {expected} points, got {actual}")]
    TimeGridMismatch {
        /// Expected number of grid points.
        expected: usize,
        /// Actual number of points supplied.
        actual: usize,
    },

    /// Empty time grid.
    #[error("Empty time grid")]
    EmptyTimeGrid,
}
