//! RNG module - deterministic gem draws
//!
//! A small LCG is enough for picking gem types and keeps whole sessions
//! reproducible from a single `u32` seed (tests, CLI traces, bug reports).

use crate::types::{GemType, MAX_GEM_TYPES};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GemRng {
    state: u32,
}

impl GemRng {
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
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Uniform draw from a catalog of `count` gem types
    pub fn next_gem(&mut self, count: usize) -> GemType {
        let count = count.clamp(1, MAX_GEM_TYPES) as u32;
        GemType(self.next_range(count) as u8)
    }

    /// Current RNG state (reseeding with it continues the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for GemRng {
    fn default() -> Self {
        Self::new(1)
    }
}
