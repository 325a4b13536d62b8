//! Probability distributions
//!
//! This module holds the numeric side of the crate: parameter validation and
//! the transform from a uniform variate to the target distribution. It knows
//! nothing about seeds or state; the generator in [`crate::generator`] pairs
//! a transform with a [`crate::prng::SampleSource`].
//!
//! # Distributions
//!
//! - **Pareto (Type I)**: heavy-tailed, support `x >= beta`
//!
//! # Example
//!
//! ```
//! use pareto_type1::distribution::pareto;
//!
//! assert_eq!(pareto::transform(1.0, 2.0, 3.0), 3.0);
//! assert!(pareto::validate(-1.0, 2.0).is_err());
//! ```

pub mod pareto;

pub use pareto::ParetoType1;
