//! Random sources for piece selection and cosmetic tinting
//!
//! Gameplay draws go through [`RandomSource`] so a daily run can be replayed
//! from its date key. Free play and cosmetic draws use entropy.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// FNV-1a 32-bit offset basis
const FNV_OFFSET: u32 = 2_166_136_261;
/// FNV-1a 32-bit prime
const FNV_PRIME: u32 = 16_777_619;
/// Weyl increment for the output mixer
const WEYL_STEP: u32 = 0x6D2B_79F5;

/// A generator of uniform floats in [0, 1)
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform index in [0, len). `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "next_index called with empty range");
        let idx = (self.next_f64() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }
}

/// Deterministic generator keyed by a string
///
/// The key is hashed with FNV-1a over its UTF-16 code units, then each draw
/// advances a Weyl sequence and runs it through an xorshift-multiply mixer.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a generator whose sequence depends only on `key`
    pub fn from_key(key: &str) -> Self {
        let state = key.encode_utf16().fold(FNV_OFFSET, |hash, unit| {
            (hash ^ unit as u32).wrapping_mul(FNV_PRIME)
        });
        Self { state }
    }

    /// Next raw 32-bit output
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(WEYL_STEP);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }
}

impl RandomSource for SeededRng {
    fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }
}

/// Entropy-backed generator with no reproducibility contract
#[derive(Debug, Clone)]
pub struct EntropyRng {
    rng: ChaCha8Rng,
}

impl Default for EntropyRng {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropyRng {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Fixed-seed variant, mostly useful in tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for EntropyRng {
    fn next_f64(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted
#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct ScriptedRng {
    draws: Vec<f64>,
    next: usize,
}

#[cfg(test)]
impl ScriptedRng {
    pub(crate) fn new(draws: Vec<f64>) -> Self {
        Self { draws, next: 0 }
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRng {
    fn next_f64(&mut self) -> f64 {
        let value = self.draws[self.next % self.draws.len()];
        self.next += 1;
        value
    }
}
