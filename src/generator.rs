//! Pareto (Type I) pseudorandom number generators
//!
//! A [`ParetoGenerator`] pairs the Pareto transform with a uniform source.
//! Generators come in two flavors, decided by how they are built:
//!
//! - **Bound**: `alpha` and `beta` are validated once, at construction, and
//!   used for every draw
//! - **Unbound**: parameters are supplied per draw; invalid parameters yield
//!   NaN instead of an error
//!
//! Independently, the uniform source is either **owned** (a seeded
//! [`Mt19937`] whose state can be read, saved, and restored) or **external**
//! (a caller-supplied closure, in which case every state accessor returns
//! `None`).
//!
//! # Example
//!
//! ```
//! use pareto_type1::generator::{factory_with_params_and_options, ParetoGenerator};
//! use pareto_type1::config::UniformSourceConfig;
//!
//! let mut pareto = factory_with_params_and_options(2.0, 2.0, UniformSourceConfig::seeded(297)).unwrap();
//! let x = pareto.sample();
//! assert!(x >= 2.0);
//!
//! // Save and resume
//! let snapshot = pareto.to_json().unwrap();
//! let mut resumed = ParetoGenerator::from_json(snapshot.clone()).unwrap();
//! assert_eq!(resumed.sample(), pareto.sample());
//! assert_eq!(snapshot.params, vec![2.0, 2.0]);
//! ```

use crate::config::{OwnedOptions, UniformSourceConfig};
use crate::distribution::pareto;
use crate::error::{Error, Result};
use crate::prng::{ExternalSource, Mt19937, SampleSource, State};
use serde::{Deserialize, Serialize, Serializer};
use std::cell::RefCell;
use std::fmt;

/// Generator name reported by [`ParetoGenerator::name`] and in snapshots
pub const NAME: &str = "pareto-type1";

/// Snapshot `type` tag
pub const SNAPSHOT_TYPE: &str = "PRNG";

/// Serializable generator snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrngSnapshot {
    /// Always `"PRNG"`
    #[serde(rename = "type")]
    pub kind: String,
    /// Always `"pareto-type1"`
    pub name: String,
    /// Uniform source state
    pub state: State,
    /// `[alpha, beta]` for bound generators, empty otherwise
    pub params: Vec<f64>,
}

/// Pareto (Type I) pseudorandom number generator
pub struct ParetoGenerator {
    /// Bound `(alpha, beta)`, if fixed at construction
    params: Option<(f64, f64)>,

    /// Uniform source, fixed for the generator's lifetime
    source: Box<dyn SampleSource>,
}

/// Unbound generator with a randomly seeded uniform source
pub fn factory() -> ParetoGenerator {
    ParetoGenerator::from_source(None, Box::new(Mt19937::new()))
}

/// Unbound generator with a configured uniform source
pub fn factory_with_options(options: UniformSourceConfig) -> Result<ParetoGenerator> {
    ParetoGenerator::build(None, options)
}

/// Bound generator with a randomly seeded uniform source
///
/// Fails with [`Error::InvalidAlpha`] or [`Error::InvalidBeta`] unless both
/// parameters are positive numbers; `alpha` is checked first.
pub fn factory_with_params(alpha: f64, beta: f64) -> Result<ParetoGenerator> {
    factory_with_params_and_options(alpha, beta, UniformSourceConfig::default())
}

/// Bound generator with a configured uniform source
pub fn factory_with_params_and_options(
    alpha: f64,
    beta: f64,
    options: UniformSourceConfig,
) -> Result<ParetoGenerator> {
    pareto::validate(alpha, beta)?;
    ParetoGenerator::build(Some((alpha, beta)), options)
}

impl ParetoGenerator {
    fn build(params: Option<(f64, f64)>, options: UniformSourceConfig) -> Result<Self> {
        let source: Box<dyn SampleSource> = match options {
            UniformSourceConfig::Owned(opts) => Box::new(Mt19937::from_options(opts)?),
            UniformSourceConfig::External(prng) => Box::new(ExternalSource::new(prng)),
        };
        Ok(Self::from_source(params, source))
    }

    fn from_source(params: Option<(f64, f64)>, source: Box<dyn SampleSource>) -> Self {
        tracing::debug!(
            bound = params.is_some(),
            owned = source.state_length().is_some(),
            seed_length = ?source.seed_length(),
            "created {} generator",
            NAME
        );
        Self { params, source }
    }

    /// Rebuild a generator from a snapshot produced by [`Self::to_json`]
    pub fn from_json(snapshot: PrngSnapshot) -> Result<Self> {
        if snapshot.kind != SNAPSHOT_TYPE {
            return Err(Error::InvalidSnapshot(format!(
                "Expected type `{}`. Actual: `{}`.",
                SNAPSHOT_TYPE, snapshot.kind
            )));
        }
        if snapshot.name != NAME {
            return Err(Error::InvalidSnapshot(format!(
                "Expected name `{}`. Actual: `{}`.",
                NAME, snapshot.name
            )));
        }
        let options = UniformSourceConfig::Owned(OwnedOptions {
            seed: None,
            state: Some(snapshot.state),
            copy: false,
        });
        match snapshot.params.as_slice() {
            [] => factory_with_options(options),
            [alpha, beta] => factory_with_params_and_options(*alpha, *beta, options),
            other => Err(Error::InvalidSnapshot(format!(
                "Expected zero or two parameters. Actual: `{}`.",
                other.len()
            ))),
        }
    }

    /// Draw using the bound parameters
    ///
    /// An unbound generator has nothing to draw with and returns NaN.
    #[inline]
    pub fn sample(&mut self) -> f64 {
        match self.params {
            Some((alpha, beta)) => pareto::sample(self.source.as_mut(), alpha, beta),
            None => f64::NAN,
        }
    }

    /// Draw with per-call parameters
    ///
    /// Returns NaN if either parameter is NaN or not positive. A bound
    /// generator ignores the arguments and uses its bound parameters.
    #[inline]
    pub fn sample_with(&mut self, alpha: f64, beta: f64) -> f64 {
        match self.params {
            Some((alpha, beta)) => pareto::sample(self.source.as_mut(), alpha, beta),
            None => pareto::sample_checked(self.source.as_mut(), alpha, beta),
        }
    }

    /// Generator name, always `"pareto-type1"`
    pub fn name(&self) -> &'static str {
        NAME
    }

    /// Underlying uniform source
    pub fn prng(&self) -> &dyn SampleSource {
        self.source.as_ref()
    }

    /// Whether `alpha`/`beta` were fixed at construction
    pub fn is_bound(&self) -> bool {
        self.params.is_some()
    }

    /// Bound `(alpha, beta)`, if any
    pub fn params(&self) -> Option<(f64, f64)> {
        self.params
    }

    /// Seed words of an owned source
    pub fn seed(&self) -> Option<Vec<u32>> {
        self.source.seed()
    }

    pub fn seed_length(&self) -> Option<usize> {
        self.source.seed_length()
    }

    /// Current state of an owned source
    pub fn state(&self) -> Option<State> {
        self.source.state()
    }

    /// Replace the state of an owned source
    ///
    /// Malformed state is rejected with [`Error::InvalidState`]. With an
    /// external source this is a no-op.
    pub fn set_state(&mut self, state: State) -> Result<()> {
        tracing::debug!(state_length = state.len(), "setting {} state", NAME);
        self.source.set_state(state)
    }

    pub fn state_length(&self) -> Option<usize> {
        self.source.state_length()
    }

    pub fn byte_length(&self) -> Option<usize> {
        self.source.byte_length()
    }

    /// Snapshot of an owned generator, `None` for an external source
    pub fn to_json(&self) -> Option<PrngSnapshot> {
        let state = self.source.state()?;
        let params = match self.params {
            Some((alpha, beta)) => vec![alpha, beta],
            None => Vec::new(),
        };
        Some(PrngSnapshot {
            kind: SNAPSHOT_TYPE.to_string(),
            name: NAME.to_string(),
            state,
            params,
        })
    }
}

/// Serializes as the [`PrngSnapshot`], or `null` for an external source
impl Serialize for ParetoGenerator {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl fmt::Debug for ParetoGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParetoGenerator")
            .field("name", &NAME)
            .field("params", &self.params)
            .field("seed_length", &self.source.seed_length())
            .field("state_length", &self.source.state_length())
            .finish()
    }
}

thread_local! {
    static DEFAULT_GENERATOR: RefCell<ParetoGenerator> = RefCell::new(factory());
}

/// Draw from this thread's default generator
///
/// The default generator is unbound and randomly seeded on first use, so
/// invalid parameters yield NaN.
///
/// ```
/// let x = pareto_type1::pareto(2.0, 3.0);
/// assert!(x >= 3.0);
/// assert!(pareto_type1::pareto(-2.0, 3.0).is_nan());
/// ```
pub fn pareto(alpha: f64, beta: f64) -> f64 {
    DEFAULT_GENERATOR.with(|generator| generator.borrow_mut().sample_with(alpha, beta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn seeded(seed: u32) -> UniformSourceConfig {
        UniformSourceConfig::seeded(seed)
    }

    #[test]
    fn test_bound_and_unbound_agree() {
        for (alpha, beta) in [(2.0, 1.0), (0.5, 3.0), (7.5, 0.25)] {
            let mut bound = factory_with_params_and_options(alpha, beta, seeded(1234)).unwrap();
            let mut unbound = factory_with_options(seeded(1234)).unwrap();

            for _ in 0..500 {
                assert_eq!(bound.sample(), unbound.sample_with(alpha, beta));
            }
        }
    }

    #[test]
    fn test_bound_ignores_call_arguments() {
        let mut a = factory_with_params_and_options(2.0, 3.0, seeded(5)).unwrap();
        let mut b = factory_with_params_and_options(2.0, 3.0, seeded(5)).unwrap();

        for _ in 0..100 {
            assert_eq!(a.sample_with(-1.0, f64::NAN), b.sample());
        }
    }

    #[test]
    fn test_samples_in_support() {
        let mut generator = factory_with_params_and_options(1.5, 4.0, seeded(42)).unwrap();
        for _ in 0..10_000 {
            let x = generator.sample();
            assert!(x >= 4.0, "sample {} below scale", x);
            assert!(x.is_finite(), "sample {} not finite", x);
        }
    }

    #[test]
    fn test_unbound_invalid_params_return_nan() {
        let mut generator = factory();
        assert!(generator.sample_with(f64::NAN, 1.0).is_nan());
        assert!(generator.sample_with(1.0, f64::NAN).is_nan());
        assert!(generator.sample_with(0.0, 1.0).is_nan());
        assert!(generator.sample_with(1.0, 0.0).is_nan());
        assert!(generator.sample().is_nan());
        assert!(generator.sample_with(1.0, 1.0) >= 1.0);
    }

    #[test]
    fn test_invalid_params_do_not_advance_source() {
        let mut a = factory_with_options(seeded(9)).unwrap();
        let mut b = factory_with_options(seeded(9)).unwrap();

        assert!(a.sample_with(-1.0, 1.0).is_nan());
        assert_eq!(a.sample_with(2.0, 1.0), b.sample_with(2.0, 1.0));
    }

    #[test]
    fn test_construction_errors() {
        assert_eq!(factory_with_params(-1.0, 2.0).unwrap_err(), Error::InvalidAlpha(-1.0));
        assert_eq!(factory_with_params(2.0, -1.0).unwrap_err(), Error::InvalidBeta(-1.0));
        assert!(matches!(
            factory_with_params(f64::NAN, f64::NAN),
            Err(Error::InvalidAlpha(_))
        ));
        assert!(matches!(
            factory_with_params_and_options(1.0, 1.0, UniformSourceConfig::seeded(0)),
            Err(Error::InvalidSeed(_))
        ));
    }

    #[test]
    fn test_prng_option_must_be_function() {
        let err = UniformSourceConfig::from_value(&serde_json::json!({ "prng": 123 }))
            .and_then(factory_with_options)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPrng(_)));
    }

    #[test]
    fn test_state_resumability() {
        let mut first = factory_with_params_and_options(2.0, 5.0, seeded(297)).unwrap();
        for _ in 0..1000 {
            first.sample();
        }
        let state = first.state().unwrap();

        let mut second =
            factory_with_params_and_options(2.0, 5.0, UniformSourceConfig::from_state(state)).unwrap();
        for _ in 0..1000 {
            assert_eq!(first.sample(), second.sample());
        }
    }

    #[test]
    fn test_set_state_replays_sequence() {
        let mut generator = factory_with_params_and_options(3.0, 1.0, seeded(77)).unwrap();
        let state = generator.state().unwrap();
        let first: Vec<f64> = (0..50).map(|_| generator.sample()).collect();

        generator.set_state(state).unwrap();
        let second: Vec<f64> = (0..50).map(|_| generator.sample()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_set_state_rejects_malformed() {
        let mut generator = factory_with_params_and_options(3.0, 1.0, seeded(77)).unwrap();
        let err = generator.set_state(State::new(vec![1, 2, 3])).unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
    }

    #[test]
    fn test_owned_accessors() {
        let generator =
            factory_with_options(UniformSourceConfig::seeded_with_key(vec![1, 2])).unwrap();

        assert_eq!(generator.name(), "pareto-type1");
        assert_eq!(generator.seed(), Some(vec![1, 2]));
        assert_eq!(generator.seed_length(), Some(2));
        assert_eq!(generator.state_length(), Some(632));
        assert_eq!(generator.byte_length(), Some(632 * 4));
        assert_eq!(generator.state().map(|s| s.len()), Some(632));
        assert_eq!(generator.prng().seed_length(), Some(2));
        assert!(!generator.is_bound());
    }

    #[test]
    fn test_to_json_params() {
        let bound = factory_with_params_and_options(2.0, 3.0, seeded(1)).unwrap();
        let snapshot = bound.to_json().unwrap();
        assert_eq!(snapshot.kind, "PRNG");
        assert_eq!(snapshot.name, "pareto-type1");
        assert_eq!(snapshot.params, vec![2.0, 3.0]);
        assert_eq!(Some(snapshot.state), bound.state());

        let unbound = factory_with_options(seeded(1)).unwrap();
        assert!(unbound.to_json().unwrap().params.is_empty());
    }

    #[test]
    fn test_serialize_generator() {
        let generator = factory_with_params_and_options(2.0, 3.0, seeded(1)).unwrap();
        let value = serde_json::to_value(&generator).unwrap();

        assert_eq!(value["type"], "PRNG");
        assert_eq!(value["name"], "pareto-type1");
        assert_eq!(value["params"], serde_json::json!([2.0, 3.0]));
        assert_eq!(value["state"]["type"], "Uint32Array");
        assert_eq!(value["state"]["data"].as_array().map(|s| s.len()), Some(631));
    }

    #[test]
    fn test_from_json_accepts_typed_array_state() {
        let mut generator = factory_with_params_and_options(2.0, 3.0, seeded(6)).unwrap();
        let words = generator.state().unwrap().into_inner();
        let text = serde_json::json!({
            "type": "PRNG",
            "name": "pareto-type1",
            "state": { "type": "Uint32Array", "data": words },
            "params": [2.0, 3.0],
        })
        .to_string();

        let snapshot: PrngSnapshot = serde_json::from_str(&text).unwrap();
        let mut restored = ParetoGenerator::from_json(snapshot).unwrap();
        for _ in 0..10 {
            assert_eq!(restored.sample(), generator.sample());
        }
    }

    #[test]
    fn test_from_json_round_trip() {
        let mut original = factory_with_params_and_options(1.5, 2.5, seeded(31)).unwrap();
        original.sample();

        let text = serde_json::to_string(&original).unwrap();
        let snapshot: PrngSnapshot = serde_json::from_str(&text).unwrap();
        let mut restored = ParetoGenerator::from_json(snapshot).unwrap();

        assert_eq!(restored.params(), Some((1.5, 2.5)));
        for _ in 0..100 {
            assert_eq!(original.sample(), restored.sample());
        }
    }

    #[test]
    fn test_from_json_rejects_foreign_snapshots() {
        let snapshot = factory_with_options(seeded(3)).unwrap().to_json().unwrap();

        let mut wrong_name = snapshot.clone();
        wrong_name.name = "normal".to_string();
        assert!(matches!(
            ParetoGenerator::from_json(wrong_name),
            Err(Error::InvalidSnapshot(_))
        ));

        let mut wrong_params = snapshot.clone();
        wrong_params.params = vec![1.0];
        assert!(matches!(
            ParetoGenerator::from_json(wrong_params),
            Err(Error::InvalidSnapshot(_))
        ));

        let mut bad_alpha = snapshot;
        bad_alpha.params = vec![-1.0, 1.0];
        assert!(matches!(
            ParetoGenerator::from_json(bad_alpha),
            Err(Error::InvalidAlpha(_))
        ));
    }

    #[test]
    fn test_external_source_is_inert() {
        let mut generator =
            factory_with_params_and_options(2.0, 1.0, UniformSourceConfig::external(|| 0.25)).unwrap();

        assert!(generator.seed().is_none());
        assert!(generator.seed_length().is_none());
        assert!(generator.state().is_none());
        assert!(generator.state_length().is_none());
        assert!(generator.byte_length().is_none());
        assert!(generator.to_json().is_none());
        assert!(generator.set_state(State::new(vec![1, 2, 3])).is_ok());
        assert_eq!(serde_json::to_string(&generator).unwrap(), "null");

        // beta / 0.25^(1/2) = 2
        assert_eq!(generator.sample(), 2.0);
    }

    #[test]
    fn test_external_source_called_once_per_draw() {
        let calls = Rc::new(RefCell::new(0u32));
        let counter = Rc::clone(&calls);
        let mut generator = factory_with_options(UniformSourceConfig::external(move || {
            *counter.borrow_mut() += 1;
            0.5
        }))
        .unwrap();

        for _ in 0..10 {
            generator.sample_with(1.0, 1.0);
        }
        generator.sample_with(-1.0, 1.0);
        assert_eq!(*calls.borrow(), 10);
    }

    #[test]
    fn test_sample_mean() {
        let mut generator = factory_with_params_and_options(3.0, 1.0, seeded(12345)).unwrap();

        let n = 100_000;
        let mean = (0..n).map(|_| generator.sample()).sum::<f64>() / n as f64;
        assert!((mean - 1.5).abs() < 0.02, "sample mean {} too far from 1.5", mean);
    }

    #[test]
    fn test_default_generator() {
        for _ in 0..100 {
            assert!(pareto(2.0, 3.0) >= 3.0);
        }
        assert!(pareto(f64::NAN, 3.0).is_nan());
    }
}
