//! Deterministic pseudo-random source.
//!
//! Every stochastic element of the tape engine (flutter jitter, hiss,
//! dropout scheduling) draws from one shared [`RandomSource`]. Reseeding it to
//! the same constant and consuming it in the same order reproduces a run
//! bit for bit.

/// Seed restored on every engine reset.
pub const DEFAULT_SEED: u32 = 0xBADD_CAFE;

/// 32-bit linear congruential generator.
///
/// Uses the Numerical Recipes constants (`a = 1664525`, `c = 1013904223`).
/// Only the upper 24 bits are used for output since the low bits of an LCG
/// have short periods. No heap allocation, `no_std` friendly.
///
/// # Example
///
/// ```rust
/// use genloss_core::RandomSource;
///
/// let mut a = RandomSource::new(7);
/// let mut b = RandomSource::new(7);
/// assert_eq!(a.next_f32(), b.next_f32());
/// ```
#[derive(Debug, Clone)]
pub struct RandomSource {
    state: u32,
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomSource {
    /// Creates a generator with the given seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Restarts the sequence from `seed`.
    pub fn reseed(&mut self, seed: u32) {
        self.state = seed;
    }

    /// Advances the generator and returns a value in `[0.0, 1.0)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        self.state = self
            .state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        // 24 bits fit the f32 mantissa exactly
        (self.state >> 8) as f32 / 16_777_216.0
    }

    /// Returns a value in `(0.0, 1.0)`, never exactly zero.
    ///
    /// Suitable as the argument of `ln` for inverse-transform sampling.
    #[inline]
    pub fn next_open_f32(&mut self) -> f32 {
        self.next_f32().max(1e-9)
    }

    /// Returns a value in `[-0.5, 0.5)`.
    #[inline]
    pub fn next_bipolar_half(&mut self) -> f32 {
        self.next_f32() - 0.5
    }
}
