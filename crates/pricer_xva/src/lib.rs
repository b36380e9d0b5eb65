//! # Pricer XVA (L4: Application)
//!
//! Counterparty exposure profiles and valuation adjustments.
//!
//! This crate provides:
//! - Exposure aggregation (EE, PFE) over simulated path ensembles
//! - CVA, DVA, FVA and LVA by trapezoidal integration of cost-weighted,
//!   discounted exposure
//! - The engine entry point [`run_exposure_simulation`]
//! - Reporting helpers (key-tenor tables, histograms, closed-form references)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_xva (L4)              │
//! ├─────────────────────────────────────────┤
//! │  engine/    - EngineConfig, run entry   │
//! │  exposure/  - EE, PFE per side          │
//! │  xva/       - CVA, DVA, FVA, LVA        │
//! │  report/    - tables, histogram, Φ      │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │          pricer_pricing (L3)            │
//! │  GBM path ensembles, seeded RNG         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_pricing::mc::ScenarioConfig;
//! use pricer_xva::{run_exposure_simulation, EngineConfig};
//!
//! let scenario = ScenarioConfig::builder()
//!     .notional(100_000_000.0)
//!     .tenor(1.0)
//!     .volatility(0.2)
//!     .n_paths(1_000)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//! let config = EngineConfig::builder()
//!     .scenario(scenario)
//!     .funding_spread(0.002)
//!     .discount_rate(0.03)
//!     .build()
//!     .unwrap();
//!
//! let result = run_exposure_simulation(&config).unwrap();
//! let net = result.xva.net;
//! assert!((net.total - (net.cva - net.dva + net.fva + net.lva)).abs() < 1e-6);
//! ```

#![warn(missing_docs)]

pub mod engine;
pub mod exposure;
pub mod report;
pub mod xva;

// Re-export commonly used types
pub use engine::{
    run_exposure_simulation, run_exposure_simulation_with_cancel, simulate_exposure_profile,
    EngineConfig, EngineConfigBuilder, EngineError, ExposureProfile, ExposureSimulationResult,
    DEFAULT_RETAINED_PATHS,
};
pub use exposure::{BilateralExposure, ExposureAggregator, ExposureCalculator, ExposureCurve};
pub use xva::{AdjustmentCurve, AdjustmentKind, NetAdjustments, XvaCalculator, XvaError, XvaResult};
