//! Error types for the Monte Carlo simulation kernel.
//!
//! Configuration errors are raised before any path is simulated; the only
//! runtime failure is cooperative cancellation.

use thiserror::Error;

/// Configuration and run error for the path simulator.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Path count below the statistical floor.
    #[error("Invalid path count {count}: must be at least {min}")]
    InvalidPathCount {
        /// Requested number of paths.
        count: usize,
        /// Configured minimum.
        min: usize,
    },

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },

    /// Simulation stopped by a cancellation request between path batches.
    #[error("Simulation cancelled after {completed} of {requested} paths")]
    Cancelled {
        /// Paths simulated before the request was observed.
        completed: usize,
        /// Paths requested.
        requested: usize,
    },
}

impl ConfigError {
    /// Shorthand for [`ConfigError::InvalidParameter`].
    pub fn invalid(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidPathCount { count: 10, min: 100 };
        assert_eq!(
            err.to_string(),
            "Invalid path count 10: must be at least 100"
        );

        let err = ConfigError::invalid("volatility", "must be non-negative, got -0.1");
        assert!(err.to_string().contains("volatility"));

        let err = ConfigError::Cancelled {
            completed: 512,
            requested: 1000,
        };
        assert!(err.to_string().contains("512 of 1000"));
    }
}
