//! # Pricer Pricing (Layer 3: Simulation Kernel)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing is the Monte Carlo kernel underneath the XVA layer:
//! - Seeded random number generation with a Box-Muller normal sampler
//! - Scenario configuration with validation at build time
//! - Single-factor GBM risk-factor path simulation on a daily grid
//! - Parallel path ensembles with cooperative cancellation
//!
//! Exposure aggregation and valuation adjustments live one layer up in
//! `pricer_xva`; nothing in this crate knows about credit or funding.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::mc::{simulate_ensemble, CancellationToken, ExposureSide, ScenarioConfig};
//!
//! let config = ScenarioConfig::builder()
//!     .notional(1_000_000.0)
//!     .tenor(0.5)
//!     .volatility(0.2)
//!     .n_paths(200)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let ensemble = simulate_ensemble(&config, &CancellationToken::new()).unwrap();
//! assert_eq!(ensemble.n_paths(), 200);
//! assert_eq!(ensemble.grid().len(), 127);
//!
//! // Exposure at t = 0 is always zero.
//! assert_eq!(ensemble.cross_section(ExposureSide::Counterparty, 0), vec![0.0; 200]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

// Random number generation infrastructure
pub mod rng;

// Monte Carlo path simulation
pub mod mc;
