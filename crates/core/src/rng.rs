//! RNG module - deterministic randomness for tile layouts
//!
//! A small LCG drives both the number permutation (Fisher-Yates) and the
//! position sampling, so a seed fully determines every round of a session.

use crate::types::TILE_COUNT;

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales the full word instead of taking `% max`, so small ranges draw
    /// on the high bits rather than the short-period low ones.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Generate a float in [0, 1)
    ///
    /// Uses the high 24 bits, which are the well-mixed ones for an LCG.
    pub fn next_unit_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Generate a float in [lo, hi). Returns `lo` for an empty range.
    pub fn next_f32_range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        let v = lo + (hi - lo) * self.next_unit_f32();
        // Rounding can land exactly on `hi`; keep the range half-open.
        if v >= hi {
            lo
        } else {
            v
        }
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// A shuffled assignment of the numbers 0..TILE_COUNT
    pub fn permutation(&mut self) -> [u8; TILE_COUNT as usize] {
        let mut numbers = [0u8; TILE_COUNT as usize];
        for (i, n) in numbers.iter_mut().enumerate() {
            *n = i as u8;
        }
        self.shuffle(&mut numbers);
        numbers
    }

    /// Current RNG state (reseeding with it continues the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
