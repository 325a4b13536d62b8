//! Configuration module
//!
//! Two layers live here:
//!
//! - **Generator options**: how a generator obtains its uniform source
//!   ([`UniformSourceConfig`], [`OwnedOptions`])
//! - **Run configuration**: what the command-line tool should draw and how to
//!   print it ([`RunConfig`]), assembled from CLI flags and config files

pub mod cli;
pub mod toml;
pub mod validator;

use crate::error::{Error, Result};
use crate::prng::{ExternalPrng, Seed, State};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Options for a generator-owned Mersenne Twister
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedOptions {
    /// Seed for a fresh generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<Seed>,
    /// Previously exported state to resume from (takes precedence over `seed`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,
    /// Copy provided state into generator-owned storage
    #[serde(default = "default_copy")]
    pub copy: bool,
}

fn default_copy() -> bool {
    true
}

impl Default for OwnedOptions {
    fn default() -> Self {
        Self {
            seed: None,
            state: None,
            copy: default_copy(),
        }
    }
}

impl OwnedOptions {
    pub fn with_seed(seed: Seed) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn with_state(state: State) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }

    /// Resolve options from an untyped option bag
    ///
    /// The value must be an object. A `prng` entry is always rejected: a
    /// deserialized value can never be a generator function. Unrecognized
    /// keys are ignored.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| Error::InvalidOptions(value.to_string()))?;

        if let Some(prng) = map.get("prng") {
            return Err(Error::InvalidPrng(prng.to_string()));
        }

        let mut options = Self::default();

        if let Some(seed) = map.get("seed") {
            options.seed = Some(Seed::deserialize(seed).map_err(|_| Error::InvalidOption {
                name: "seed",
                reason: "must be a positive integer less than or equal to the maximum unsigned 32-bit integer or an array of unsigned 32-bit integers",
                value: seed.to_string(),
            })?);
        }

        if let Some(state) = map.get("state") {
            options.state = Some(State::deserialize(state).map_err(|_| Error::InvalidOption {
                name: "state",
                reason: "must be an array of unsigned 32-bit integers",
                value: state.to_string(),
            })?);
        }

        if let Some(copy) = map.get("copy") {
            options.copy = copy.as_bool().ok_or_else(|| Error::InvalidOption {
                name: "copy",
                reason: "must be a boolean",
                value: copy.to_string(),
            })?;
        }

        Ok(options)
    }
}

/// Where a generator gets its uniform variates
pub enum UniformSourceConfig {
    /// Generator-owned Mersenne Twister with full state access
    Owned(OwnedOptions),
    /// Caller-owned closure; state is opaque to the generator
    External(ExternalPrng),
}

impl UniformSourceConfig {
    /// Owned source seeded with a single word
    pub fn seeded(seed: u32) -> Self {
        Self::Owned(OwnedOptions::with_seed(Seed::Integer(seed)))
    }

    /// Owned source seeded with a key array
    pub fn seeded_with_key(key: Vec<u32>) -> Self {
        Self::Owned(OwnedOptions::with_seed(Seed::Array(key)))
    }

    pub fn from_state(state: State) -> Self {
        Self::Owned(OwnedOptions::with_state(state))
    }

    pub fn external(prng: impl FnMut() -> f64 + 'static) -> Self {
        Self::External(Box::new(prng))
    }

    /// See [`OwnedOptions::from_value`]
    pub fn from_value(value: &Value) -> Result<Self> {
        OwnedOptions::from_value(value).map(Self::Owned)
    }
}

impl Default for UniformSourceConfig {
    fn default() -> Self {
        Self::Owned(OwnedOptions::default())
    }
}

impl fmt::Debug for UniformSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owned(options) => f.debug_tuple("Owned").field(options).finish(),
            Self::External(_) => f.write_str("External(<fn>)"),
        }
    }
}

/// Output format for drawn samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One sample per line
    #[default]
    Text,
    /// Single JSON document with the generator snapshot and samples
    Json,
}

/// Complete configuration for a sampling run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Shape parameter
    pub alpha: Option<f64>,
    /// Scale parameter
    pub beta: Option<f64>,
    /// Number of samples to draw
    #[serde(default = "default_count")]
    pub count: usize,
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
    /// Uniform source options
    #[serde(default)]
    pub source: OwnedOptions,
}

fn default_count() -> usize {
    10
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            alpha: None,
            beta: None,
            count: default_count(),
            format: OutputFormat::default(),
            source: OwnedOptions::default(),
        }
    }
}
