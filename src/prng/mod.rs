//! Uniform sources
//!
//! A Pareto generator draws its randomness from a [`SampleSource`]. Two
//! implementations exist and the choice is fixed when the generator is built:
//!
//! - **[`Mt19937`]**: owned by the generator, with full access to its seed and
//!   state so that it can be inspected, saved, and restored
//! - **[`ExternalSource`]**: wraps a caller-supplied closure; nothing is known
//!   about its state, so all introspection returns `None`
//!
//! # Example
//!
//! ```
//! use pareto_type1::prng::{ExternalSource, SampleSource};
//!
//! let mut source = ExternalSource::new(Box::new(|| 0.5));
//! assert_eq!(source.uniform(), 0.5);
//! assert!(source.state().is_none());
//! ```

pub mod mt19937;

pub use mt19937::{Mt19937, Seed};

use crate::error::Result;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Typed-array tag written alongside serialized state words
pub const STATE_ARRAY_TYPE: &str = "Uint32Array";

/// Closure producing uniform variates on [0, 1)
pub type ExternalPrng = Box<dyn FnMut() -> f64>;

/// Source of uniform variates with optional state introspection
///
/// Only `uniform` is required. The remaining methods default to the inert
/// behavior used for sources whose state layout is unknown: getters return
/// `None` and `set_state` silently ignores its argument.
pub trait SampleSource {
    /// Draw a uniform variate on [0, 1)
    fn uniform(&mut self) -> f64;

    /// Seed words, if the source exposes them
    fn seed(&self) -> Option<Vec<u32>> {
        None
    }

    /// Number of seed words
    fn seed_length(&self) -> Option<usize> {
        None
    }

    /// Copy of the current state
    fn state(&self) -> Option<State> {
        None
    }

    /// Replace the current state
    fn set_state(&mut self, _state: State) -> Result<()> {
        Ok(())
    }

    /// Number of words in the state
    fn state_length(&self) -> Option<usize> {
        None
    }

    /// Size of the state in bytes
    fn byte_length(&self) -> Option<usize> {
        None
    }
}

/// Serialized generator state
///
/// Serializes as a tagged typed array, `{"type": "Uint32Array", "data": [...]}`.
/// Deserializes from that shape or from a plain array of words, which is what
/// hand-written config files use.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "StateRepr")]
pub struct State(Vec<u32>);

#[derive(Serialize)]
struct TypedArray<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    data: &'a [u32],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StateRepr {
    Typed {
        #[serde(rename = "type")]
        kind: String,
        data: Vec<u32>,
    },
    Plain(Vec<u32>),
}

impl TryFrom<StateRepr> for State {
    type Error = String;

    fn try_from(repr: StateRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            StateRepr::Typed { kind, data } if kind == STATE_ARRAY_TYPE => Ok(Self(data)),
            StateRepr::Typed { kind, .. } => Err(format!(
                "expected typed array `{}`, got `{}`",
                STATE_ARRAY_TYPE, kind
            )),
            StateRepr::Plain(words) => Ok(Self(words)),
        }
    }
}

impl Serialize for State {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        TypedArray {
            kind: STATE_ARRAY_TYPE,
            data: &self.0,
        }
        .serialize(serializer)
    }
}

impl State {
    pub fn new(words: Vec<u32>) -> Self {
        Self(words)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u32>> for State {
    fn from(words: Vec<u32>) -> Self {
        Self(words)
    }
}

/// Caller-supplied uniform source
pub struct ExternalSource {
    prng: ExternalPrng,
}

impl ExternalSource {
    pub fn new(prng: ExternalPrng) -> Self {
        Self { prng }
    }
}

impl SampleSource for ExternalSource {
    #[inline]
    fn uniform(&mut self) -> f64 {
        (self.prng)()
    }
}

impl fmt::Debug for ExternalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExternalSource(<fn>)")
    }
}
