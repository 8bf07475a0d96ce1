//! Core Effect trait.
//!
//! ## Design Decisions
//!
//! - **Stereo pair**: The tape engine shares modulation, dropout and random
//!   state across both channels, so the unit of processing is one L/R frame
//!   rather than one mono sample.
//!
//! - **Object-safe**: `dyn Effect` works for test harnesses and hosts that
//!   hold heterogeneous processors.
//!
//! - **No allocations**: All methods except `set_sample_rate` are real-time safe.

/// Core trait for stereo audio processors.
///
/// # Example
///
/// ```rust
/// use genloss_core::Effect;
///
/// struct Swap;
///
/// impl Effect for Swap {
///     fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
///         (right, left)
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut swap = Swap;
/// assert_eq!(swap.process_stereo(1.0, 2.0), (2.0, 1.0));
/// ```
pub trait Effect {
    /// Process one stereo frame.
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32);

    /// Process a block of stereo frames.
    ///
    /// Default implementation calls `process_stereo()` for each frame.
    ///
    /// # Panics
    /// Default implementation debug-asserts that all four slices share a length.
    fn process_block_stereo(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) {
        debug_assert_eq!(left_in.len(), right_in.len());
        debug_assert_eq!(left_in.len(), left_out.len());
        debug_assert_eq!(left_in.len(), right_out.len());
        for i in 0..left_in.len() {
            let (l, r) = self.process_stereo(left_in[i], right_in[i]);
            left_out[i] = l;
            right_out[i] = r;
        }
    }

    /// Update the sample rate.
    ///
    /// Effects recalculate any sample-rate-dependent state. May allocate.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Reset internal state without changing parameters.
    fn reset(&mut self);

    /// Report processing latency in samples.
    ///
    /// Default returns 0 (no latency).
    fn latency_samples(&self) -> usize {
        0
    }
}
