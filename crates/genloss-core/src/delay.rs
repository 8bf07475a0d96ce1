//! Fractional delay line for tape speed modulation.
//!
//! A fixed-capacity ring buffer holding past dry samples. The engine reads it
//! at a modulated, non-integer offset and writes the current dry sample once
//! per frame, after reading.
//!
//! # Timing Convention
//!
//! Reads happen before the write of the current frame, so at frame `n`,
//! `read(d)` returns `x[n - d]` for integer `d`. Fractional offsets linearly
//! interpolate between `x[n - floor(d)]` and `x[n - floor(d) - 1]`.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Fractional delay line backed by a heap buffer.
///
/// # Memory
///
/// The buffer is allocated on construction or in
/// [`ensure_capacity`](Self::ensure_capacity). Reads and writes never allocate.
///
/// # Example
///
/// ```rust
/// use genloss_core::FractionalDelay;
///
/// let mut delay = FractionalDelay::new(2048);
/// assert_eq!(delay.read(10.5), 0.0);
/// delay.write(1.0);
/// ```
#[derive(Debug, Clone)]
pub struct FractionalDelay {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl FractionalDelay {
    /// Smallest capacity handed out by [`for_max_delay`](Self::for_max_delay).
    pub const MIN_CAPACITY: usize = 2048;

    /// Creates a zeroed delay line holding `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity < 4`.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 4, "Delay capacity must be >= 4");

        Self {
            buffer: vec![0.0; capacity],
            write_pos: 0,
        }
    }

    /// Creates a delay line able to serve `max_delay_samples` with
    /// interpolation headroom.
    pub fn for_max_delay(max_delay_samples: f32) -> Self {
        Self::new(Self::capacity_for(max_delay_samples))
    }

    /// Capacity needed to read `max_delay_samples` plus two slots of headroom.
    pub fn capacity_for(max_delay_samples: f32) -> usize {
        let needed = libm::ceilf(max_delay_samples.max(0.0)) as usize + 4;
        needed.max(Self::MIN_CAPACITY)
    }

    /// Grows the buffer if it cannot serve `max_delay_samples`, then clears it.
    ///
    /// May allocate; call from reset paths only.
    pub fn ensure_capacity(&mut self, max_delay_samples: f32) {
        let needed = Self::capacity_for(max_delay_samples);
        if needed > self.buffer.len() {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                old = self.buffer.len(),
                new = needed,
                "delay_capacity: growing buffer"
            );
            self.buffer = vec![0.0; needed];
        }
        self.clear();
    }

    /// Reads the sample `delay_samples` frames in the past.
    ///
    /// The offset is clamped to `[1, capacity - 2]` so both interpolation
    /// taps always land on valid, previously written slots.
    #[inline]
    pub fn read(&self, delay_samples: f32) -> f32 {
        let len = self.buffer.len();
        let delay = delay_samples.clamp(1.0, self.max_delay());

        let delay_int = delay as usize;
        let frac = delay - delay_int as f32;

        let newer = (self.write_pos + len - delay_int) % len;
        let older = (newer + len - 1) % len;

        let a = self.buffer[newer];
        let b = self.buffer[older];
        a + (b - a) * frac
    }

    /// Writes a sample and advances the write cursor.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Clears the buffer and rewinds the write cursor.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    /// Largest offset [`read`](Self::read) will honor.
    #[inline]
    pub fn max_delay(&self) -> f32 {
        (self.buffer.len() - 2) as f32
    }

    /// Returns the buffer capacity in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}
