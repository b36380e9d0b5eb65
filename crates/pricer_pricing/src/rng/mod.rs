//! # Random Number Generation Infrastructure
//!
//! This module provides the normal sampler used by the path simulator.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: every generator is seeded; the same seed always
//!   produces the same sequence of draws
//! - **Independence**: each simulated path owns a private generator derived
//!   from the run seed and the path index, so no state is shared between
//!   workers and results do not depend on thread scheduling
//! - **Static dispatch**: samplers are passed as generic parameters, never as
//!   `Box<dyn Trait>`, in the simulation hot loop
//!
//! ## Module Structure
//!
//! - [`prng`]: seeded PRNG wrapper, [`NormalSampler`] trait and normal methods
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::{NormalSampler, PricerRng};
//!
//! // Create a seeded RNG for reproducible simulations
//! let mut rng = PricerRng::from_seed(12345);
//!
//! // Generate uniform random values in [0, 1)
//! let uniform_value = rng.gen_uniform();
//! assert!((0.0..1.0).contains(&uniform_value));
//!
//! // Standard normal variate via Box-Muller
//! let z = rng.sample();
//! assert!(z.is_finite());
//!
//! // Batch generation into pre-allocated buffer (zero allocation)
//! let mut buffer = vec![0.0; 1000];
//! rng.fill_normal(&mut buffer);
//! ```

mod prng;

pub use prng::{path_seed, NormalMethod, NormalSampler, PricerRng};

#[cfg(test)]
mod tests;
