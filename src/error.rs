//! Error types
//!
//! Every construction-time failure is reported through [`Error`]. Per-call
//! parameter problems on an unbound generator are not errors: those draws
//! return NaN instead.

use thiserror::Error;

/// Errors raised while building a generator or replacing its state.
///
/// # Examples
///
/// ```
/// use pareto_type1::Error;
///
/// let err = Error::InvalidAlpha(-1.0);
/// assert_eq!(
///     err.to_string(),
///     "invalid argument. First argument must be a positive number. Value: `-1`."
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Shape parameter is NaN or not strictly positive
    #[error("invalid argument. First argument must be a positive number. Value: `{0}`.")]
    InvalidAlpha(f64),

    /// Scale parameter is NaN or not strictly positive
    #[error("invalid argument. Second argument must be a positive number. Value: `{0}`.")]
    InvalidBeta(f64),

    /// Options value is not an object
    #[error("invalid argument. Options argument must be an object. Value: `{0}`.")]
    InvalidOptions(String),

    /// `prng` option is present but is not a generator function
    #[error("invalid option. `prng` option must be a pseudorandom number generator function. Option: `{0}`.")]
    InvalidPrng(String),

    /// A recognized option has the wrong type or range
    #[error("invalid option. `{name}` option {reason}. Option: `{value}`.")]
    InvalidOption {
        name: &'static str,
        reason: &'static str,
        value: String,
    },

    /// Seed is zero or an empty array
    #[error("invalid seed. {0}")]
    InvalidSeed(String),

    /// State words do not describe a valid MT19937 generator
    #[error("invalid state. {0}")]
    InvalidState(String),

    /// Serialized generator is not a Pareto (Type I) snapshot
    #[error("invalid snapshot. {0}")]
    InvalidSnapshot(String),
}

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, Error>;
