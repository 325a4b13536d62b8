//! Pareto (Type I) distribution
//!
//! The Pareto Type I distribution has shape `alpha > 0`, scale `beta > 0`,
//! support `x >= beta` and CDF
//!
//! ```text
//! F(x) = 1 - (beta / x)^alpha
//! ```
//!
//! # Sampling
//!
//! Uses inverse transform sampling: for `u` uniform on [0, 1),
//! `beta / u^(1/alpha)` is Pareto distributed. One uniform draw per sample,
//! no rejection loop (O(1) per sample).
//!
//! # Example
//!
//! ```
//! use pareto_type1::distribution::pareto::ParetoType1;
//! use rand::prelude::*;
//!
//! let dist = ParetoType1::new(3.0, 1.0).unwrap();
//! let x = dist.sample(&mut rand::thread_rng());
//! assert!(x >= 1.0);
//! assert_eq!(dist.mean(), 1.5);
//! ```

use crate::error::{Error, Result};
use crate::prng::SampleSource;
use rand::distributions::Distribution;
use rand::Rng;

/// Check construction-time parameters
///
/// `alpha` is checked first, so when both are invalid the error names the
/// shape parameter.
pub fn validate(alpha: f64, beta: f64) -> Result<()> {
    if !is_positive(alpha) {
        return Err(Error::InvalidAlpha(alpha));
    }
    if !is_positive(beta) {
        return Err(Error::InvalidBeta(beta));
    }
    Ok(())
}

// NaN compares false, so this also rejects NaN
#[inline(always)]
fn is_positive(x: f64) -> bool {
    x > 0.0
}

/// Map a uniform variate onto the Pareto distribution
#[inline(always)]
pub fn transform(u: f64, alpha: f64, beta: f64) -> f64 {
    beta / u.powf(1.0 / alpha)
}

/// Draw one variate, assuming the parameters were already validated
#[inline]
pub fn sample(source: &mut dyn SampleSource, alpha: f64, beta: f64) -> f64 {
    transform(source.uniform(), alpha, beta)
}

/// Draw one variate, returning NaN for NaN or non-positive parameters
///
/// Invalid parameters do not consume a uniform draw.
#[inline]
pub fn sample_checked(source: &mut dyn SampleSource, alpha: f64, beta: f64) -> f64 {
    if alpha.is_nan() || beta.is_nan() || alpha <= 0.0 || beta <= 0.0 {
        return f64::NAN;
    }
    sample(source, alpha, beta)
}

/// Pareto (Type I) distribution usable with any [`rand::Rng`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParetoType1 {
    /// Shape parameter
    alpha: f64,

    /// Scale parameter (lower bound of the support)
    beta: f64,
}

impl ParetoType1 {
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        validate(alpha, beta)?;
        Ok(Self { alpha, beta })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Analytic mean, infinite for `alpha <= 1`
    pub fn mean(&self) -> f64 {
        if self.alpha <= 1.0 {
            return f64::INFINITY;
        }
        self.alpha * self.beta / (self.alpha - 1.0)
    }
}

impl Distribution<f64> for ParetoType1 {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        transform(rng.gen::<f64>(), self.alpha, self.beta)
    }
}
