//! pareto-type1 - Pareto (Type I) pseudorandom number generators
//!
//! Builds generators that sample from the Pareto (Type I) distribution with
//! shape `alpha` and scale `beta`, driven either by an owned Mersenne Twister
//! whose state can be saved and restored, or by a caller-supplied uniform
//! source.
//!
//! # Architecture
//!
//! - **Distribution**: parameter validation and the inverse-CDF transform
//! - **PRNG**: uniform sources (MT19937 with exportable state, external closures)
//! - **Generator**: factory functions and the [`ParetoGenerator`] object
//! - **Config / output**: option resolution, config files, and the CLI's writers
//!
//! # Example
//!
//! ```
//! use pareto_type1::{factory_with_params_and_options, UniformSourceConfig};
//!
//! let mut pareto = factory_with_params_and_options(3.0, 1.0, UniformSourceConfig::seeded(297)).unwrap();
//! let x = pareto.sample();
//! assert!(x >= 1.0);
//! ```

pub mod config;
pub mod distribution;
pub mod error;
pub mod generator;
pub mod output;
pub mod prng;

// Re-export commonly used types
pub use config::{OwnedOptions, UniformSourceConfig};
pub use error::Error;
pub use generator::{
    factory, factory_with_options, factory_with_params, factory_with_params_and_options, pareto,
    ParetoGenerator, PrngSnapshot,
};
pub use prng::{Seed, State};
