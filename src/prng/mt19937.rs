//! 32-bit Mersenne Twister (MT19937)
//!
//! The generator keeps its entire state in one flat word array so that the
//! state can be read back, stored, and restored without any translation:
//!
//! ```text
//! [ version | sections | N | mt[0..N] | 1 | mti | seed_len | seed[0..seed_len] ]
//! ```
//!
//! - `version` is always 1 and `sections` is always 3
//! - `N` is the length of the twister array (624)
//! - the "other" section holds a single word, the current index into `mt`
//! - the seed section holds the words the generator was seeded with
//!
//! # Normalized output
//!
//! [`Mt19937::normalized`] combines two 32-bit outputs into a double with
//! 53 bits of randomness, giving values on [0, 1).
//!
//! # Example
//!
//! ```
//! use pareto_type1::prng::mt19937::{Mt19937, Seed};
//!
//! let mut rng = Mt19937::from_seed(Seed::Integer(5489)).unwrap();
//! assert_eq!(rng.next_u32(), 3_499_211_612);
//!
//! let u = rng.normalized();
//! assert!((0.0..1.0).contains(&u));
//! ```

use super::{SampleSource, State};
use crate::config::OwnedOptions;
use crate::error::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the twister array
pub const N: usize = 624;
const M: usize = 397;

const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// Seed used before mixing in an array seed
const SEED_ARRAY_INIT_STATE: u32 = 19_650_218;

const STATE_ARRAY_VERSION: u32 = 1;
const NUM_STATE_SECTIONS: u32 = 3;

const STATE_SECTION_OFFSET: usize = 2;
const OTHER_SECTION_OFFSET: usize = N + 3;
const SEED_SECTION_OFFSET: usize = N + 5;

/// Number of state words excluding the seed section payload
pub const STATE_FIXED_LENGTH: usize = N + 6;

const TWO_26: f64 = 67_108_864.0;
const FLOAT64_NORMALIZATION_CONSTANT: f64 = 1.0 / 9_007_199_254_740_992.0;

/// Generator seed
///
/// Deserializes from either a bare integer or an array of integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    /// Single positive 32-bit word
    Integer(u32),
    /// Key array mixed in with `init_by_array`; a single word seeds like `Integer`
    Array(Vec<u32>),
}

impl Seed {
    fn words(&self) -> &[u32] {
        match self {
            Seed::Integer(s) => std::slice::from_ref(s),
            Seed::Array(words) => words,
        }
    }

    /// Reject seeds that cannot initialize a generator
    pub fn validate(&self) -> Result<()> {
        match self {
            _ if self.words() == [0] => Err(Error::InvalidSeed(
                "Seed must be a positive integer less than or equal to the maximum unsigned 32-bit integer. Value: `0`.".to_string(),
            )),
            Seed::Array(words) if words.is_empty() => Err(Error::InvalidSeed(
                "Seed array must contain at least one element.".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl From<u32> for Seed {
    fn from(seed: u32) -> Self {
        Seed::Integer(seed)
    }
}

impl From<Vec<u32>> for Seed {
    fn from(words: Vec<u32>) -> Self {
        Seed::Array(words)
    }
}

/// MT19937 generator with exportable state
#[derive(Clone, PartialEq, Eq)]
pub struct Mt19937 {
    /// Flat state array (see module docs for the layout)
    words: Vec<u32>,

    /// Reuse the existing buffer on `set_state` instead of adopting the caller's
    copy: bool,
}

impl Mt19937 {
    /// Create a generator seeded from the thread-local entropy source
    pub fn new() -> Self {
        let seed = rand::thread_rng().gen_range(1..=u32::MAX);
        Self::seeded(&Seed::Integer(seed), true)
    }

    /// Create a generator from an explicit seed
    pub fn from_seed(seed: Seed) -> Result<Self> {
        seed.validate()?;
        Ok(Self::seeded(&seed, true))
    }

    /// Create a generator resuming from a previously exported state
    ///
    /// With `copy` set, the words are copied into a freshly allocated buffer
    /// owned by the generator. Without it, the generator adopts `state`'s
    /// buffer as its backing storage.
    pub fn from_state(state: State, copy: bool) -> Result<Self> {
        validate_state(state.as_slice())?;
        let words = if copy {
            state.as_slice().to_vec()
        } else {
            state.into_inner()
        };
        Ok(Self { words, copy })
    }

    /// Build a generator from owned-source options
    ///
    /// A provided state takes precedence over a provided seed.
    pub fn from_options(options: OwnedOptions) -> Result<Self> {
        match (options.state, options.seed) {
            (Some(state), _) => Self::from_state(state, options.copy),
            (None, Some(seed)) => {
                seed.validate()?;
                Ok(Self::seeded(&seed, options.copy))
            }
            (None, None) => {
                let mut rng = Self::new();
                rng.copy = options.copy;
                Ok(rng)
            }
        }
    }

    fn seeded(seed: &Seed, copy: bool) -> Self {
        let seed_words = seed.words();
        let mut words = vec![0u32; STATE_FIXED_LENGTH + seed_words.len()];

        words[0] = STATE_ARRAY_VERSION;
        words[1] = NUM_STATE_SECTIONS;
        words[STATE_SECTION_OFFSET] = N as u32;
        words[OTHER_SECTION_OFFSET] = 1;
        words[SEED_SECTION_OFFSET] = seed_words.len() as u32;
        words[SEED_SECTION_OFFSET + 1..].copy_from_slice(seed_words);

        let mut rng = Self { words, copy };
        match seed {
            Seed::Integer(s) => init_genrand(rng.mt_mut(), *s),
            Seed::Array(key) if key.len() == 1 => init_genrand(rng.mt_mut(), key[0]),
            Seed::Array(key) => init_by_array(rng.mt_mut(), key),
        }
        rng.set_index(N);
        rng
    }

    #[inline(always)]
    fn mt_mut(&mut self) -> &mut [u32] {
        &mut self.words[STATE_SECTION_OFFSET + 1..OTHER_SECTION_OFFSET]
    }

    #[inline(always)]
    fn index(&self) -> usize {
        self.words[OTHER_SECTION_OFFSET + 1] as usize
    }

    #[inline(always)]
    fn set_index(&mut self, mti: usize) {
        self.words[OTHER_SECTION_OFFSET + 1] = mti as u32;
    }

    /// Next tempered 32-bit output
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut mti = self.index();
        if mti >= N {
            twist(self.mt_mut());
            mti = 0;
        }
        let mut y = self.words[STATE_SECTION_OFFSET + 1 + mti];
        self.set_index(mti + 1);

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^= y >> 18;
        y
    }

    /// Uniform double on [0, 1) with 53-bit resolution
    #[inline]
    pub fn normalized(&mut self) -> f64 {
        let x = f64::from(self.next_u32() >> 5);
        let y = f64::from(self.next_u32() >> 6);
        (x * TWO_26 + y) * FLOAT64_NORMALIZATION_CONSTANT
    }

    /// Seed words this generator was initialized with
    pub fn seed(&self) -> Vec<u32> {
        self.words[SEED_SECTION_OFFSET + 1..].to_vec()
    }

    /// Number of seed words
    pub fn seed_length(&self) -> usize {
        self.words.len() - STATE_FIXED_LENGTH
    }

    /// Copy of the current state
    pub fn state(&self) -> State {
        State::new(self.words.clone())
    }

    /// Replace the current state
    ///
    /// Fails with [`Error::InvalidState`] when the words do not have the
    /// expected layout. On failure the generator is left untouched.
    pub fn set_state(&mut self, state: State) -> Result<()> {
        validate_state(state.as_slice())?;
        if self.copy {
            if self.words.len() == state.len() {
                self.words.copy_from_slice(state.as_slice());
            } else {
                self.words = state.as_slice().to_vec();
            }
        } else {
            self.words = state.into_inner();
        }
        Ok(())
    }

    /// Number of words in the state array
    pub fn state_length(&self) -> usize {
        self.words.len()
    }

    /// Size of the state array in bytes
    pub fn byte_length(&self) -> usize {
        self.words.len() * std::mem::size_of::<u32>()
    }
}

impl Default for Mt19937 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Mt19937 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mt19937")
            .field("seed", &self.seed())
            .field("index", &self.index())
            .field("state_length", &self.state_length())
            .finish()
    }
}

impl SampleSource for Mt19937 {
    #[inline]
    fn uniform(&mut self) -> f64 {
        self.normalized()
    }

    fn seed(&self) -> Option<Vec<u32>> {
        Some(Mt19937::seed(self))
    }

    fn seed_length(&self) -> Option<usize> {
        Some(Mt19937::seed_length(self))
    }

    fn state(&self) -> Option<State> {
        Some(Mt19937::state(self))
    }

    fn set_state(&mut self, state: State) -> Result<()> {
        Mt19937::set_state(self, state)
    }

    fn state_length(&self) -> Option<usize> {
        Some(Mt19937::state_length(self))
    }

    fn byte_length(&self) -> Option<usize> {
        Some(Mt19937::byte_length(self))
    }
}

impl rand::RngCore for Mt19937 {
    fn next_u32(&mut self) -> u32 {
        Mt19937::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(Mt19937::next_u32(self));
        let hi = u64::from(Mt19937::next_u32(self));
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = Mt19937::next_u32(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        rand::RngCore::fill_bytes(self, dest);
        Ok(())
    }
}

fn init_genrand(mt: &mut [u32], seed: u32) {
    mt[0] = seed;
    for i in 1..N {
        let prev = mt[i - 1];
        mt[i] = 1_812_433_253u32
            .wrapping_mul(prev ^ (prev >> 30))
            .wrapping_add(i as u32);
    }
}

fn init_by_array(mt: &mut [u32], key: &[u32]) {
    init_genrand(mt, SEED_ARRAY_INIT_STATE);

    let mut i = 1usize;
    let mut j = 0usize;
    for _ in 0..N.max(key.len()) {
        let prev = mt[i - 1];
        mt[i] = (mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_664_525))
            .wrapping_add(key[j])
            .wrapping_add(j as u32);
        i += 1;
        j += 1;
        if i >= N {
            mt[0] = mt[N - 1];
            i = 1;
        }
        if j >= key.len() {
            j = 0;
        }
    }
    for _ in 0..N - 1 {
        let prev = mt[i - 1];
        mt[i] = (mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_566_083_941))
            .wrapping_sub(i as u32);
        i += 1;
        if i >= N {
            mt[0] = mt[N - 1];
            i = 1;
        }
    }
    // MSB is 1, assuring a non-zero initial array
    mt[0] = 0x8000_0000;
}

#[inline]
fn mag01(y: u32) -> u32 {
    if y & 1 == 0 {
        0
    } else {
        MATRIX_A
    }
}

fn twist(mt: &mut [u32]) {
    for kk in 0..N - M {
        let y = (mt[kk] & UPPER_MASK) | (mt[kk + 1] & LOWER_MASK);
        mt[kk] = mt[kk + M] ^ (y >> 1) ^ mag01(y);
    }
    for kk in N - M..N - 1 {
        let y = (mt[kk] & UPPER_MASK) | (mt[kk + 1] & LOWER_MASK);
        mt[kk] = mt[kk + M - N] ^ (y >> 1) ^ mag01(y);
    }
    let y = (mt[N - 1] & UPPER_MASK) | (mt[0] & LOWER_MASK);
    mt[N - 1] = mt[M - 1] ^ (y >> 1) ^ mag01(y);
}

/// Check that `words` describes a generator this module can resume
fn validate_state(words: &[u32]) -> Result<()> {
    if words.len() <= STATE_FIXED_LENGTH {
        return Err(Error::InvalidState(format!(
            "State array has insufficient length. Expected more than {} elements, got {}.",
            STATE_FIXED_LENGTH,
            words.len()
        )));
    }
    if words[0] != STATE_ARRAY_VERSION {
        return Err(Error::InvalidState(format!(
            "State array has an incompatible schema version. Expected: `{}`. Actual: `{}`.",
            STATE_ARRAY_VERSION, words[0]
        )));
    }
    if words[1] != NUM_STATE_SECTIONS {
        return Err(Error::InvalidState(format!(
            "State array has an incompatible number of sections. Expected: `{}`. Actual: `{}`.",
            NUM_STATE_SECTIONS, words[1]
        )));
    }
    if words[STATE_SECTION_OFFSET] != N as u32 {
        return Err(Error::InvalidState(format!(
            "State array has an incompatible state length. Expected: `{}`. Actual: `{}`.",
            N, words[STATE_SECTION_OFFSET]
        )));
    }
    if words[OTHER_SECTION_OFFSET] != 1 {
        return Err(Error::InvalidState(format!(
            "State array has an incompatible section length. Expected: `1`. Actual: `{}`.",
            words[OTHER_SECTION_OFFSET]
        )));
    }
    let mti = words[OTHER_SECTION_OFFSET + 1] as usize;
    if mti > N {
        return Err(Error::InvalidState(format!(
            "State array has an out-of-range index. Expected at most `{}`. Actual: `{}`.",
            N, mti
        )));
    }
    let seed_len = words[SEED_SECTION_OFFSET] as usize;
    if seed_len != words.len() - STATE_FIXED_LENGTH {
        return Err(Error::InvalidState(format!(
            "State array length is incompatible with seed section length. Expected: `{}`. Actual: `{}`.",
            words.len() - STATE_FIXED_LENGTH,
            seed_len
        )));
    }
    Ok(())
}
