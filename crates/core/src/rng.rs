//! RNG module - seeded randomness for dealing and guessing
//!
//! Everything random in the game goes through [`RandomSource`]: the deck
//! shuffle and the opponent's guess when its memory has nothing to offer.
//! Production uses [`SimpleRng`] seeded once per session; tests inject
//! [`ReplayRng`] to pin exact layouts and guesses.

/// Source of uniform integers.
pub trait RandomSource {
    /// Uniform value in `[0, bound)`. Callers never pass `bound == 0`.
    fn next_below(&mut self, bound: u32) -> u32;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }
}

/// Shuffle a slice in place using Fisher-Yates.
pub fn shuffle<T, R: RandomSource + ?Sized>(rng: &mut R, slice: &mut [T]) {
    for i in (1..slice.len()).rev() {
        let j = rng.next_below((i + 1) as u32) as usize;
        slice.swap(i, j);
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * bound as u64) >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed script of draws, each reduced modulo the requested bound.
///
/// Cycles when the script runs out; an empty script always yields 0.
#[derive(Debug, Clone, Default)]
pub struct ReplayRng {
    script: Vec<u32>,
    cursor: usize,
}

impl ReplayRng {
    pub fn new(script: impl Into<Vec<u32>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
        }
    }

    /// Script under which [`shuffle`] leaves every slice untouched.
    pub fn identity() -> Self {
        Self::new(vec![u32::MAX])
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ReplayRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        let raw = if self.script.is_empty() {
            0
        } else {
            self.script[self.cursor % self.script.len()]
        };
        self.cursor += 1;
        if raw == u32::MAX {
            return bound - 1;
        }
        raw % bound
    }
}
