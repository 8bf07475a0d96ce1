//! Lock-free parameter store for control threads.
//!
//! [`SharedParams`] keeps one atomic `f32` (stored as bits) per parameter,
//! indexed like [`GenLossParams`]'s [`ParameterInfo`] impl. A control thread
//! calls [`set`](SharedParams::set); the audio thread calls
//! [`snapshot_if_changed`](SharedParams::snapshot_if_changed) once per block
//! and hands the copy to [`GenLoss::set_params`](crate::GenLoss::set_params).
//!
//! Each value is read whole, so no single parameter ever tears. A snapshot
//! taken while a control thread is writing several parameters may contain
//! some of the new values and some of the old; the next block picks up the
//! rest.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use genloss_core::ParameterInfo;

use crate::params::{DESCRIPTORS, GenLossParams, PARAM_COUNT};

/// Atomic mirror of a [`GenLossParams`].
///
/// # Example
///
/// ```rust
/// use genloss_effects::{GenLoss, SharedParams};
///
/// let shared = SharedParams::default();
/// let mut tape = GenLoss::new(48000.0);
/// let mut seen = 0;
///
/// shared.set_by_name("mix", 50.0);
/// if let Some(params) = shared.snapshot_if_changed(&mut seen) {
///     tape.set_params(&params);
/// }
/// assert_eq!(tape.params().mix, 50.0);
/// ```
#[derive(Debug)]
pub struct SharedParams {
    values: [AtomicU32; PARAM_COUNT],
    generation: AtomicU64,
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new(&GenLossParams::default())
    }
}

impl SharedParams {
    /// Creates a store initialized from `params`.
    pub fn new(params: &GenLossParams) -> Self {
        let values = core::array::from_fn(|i| AtomicU32::new(params.get_param(i).to_bits()));
        Self {
            values,
            // Start ahead of any reader so the first poll always snapshots
            generation: AtomicU64::new(1),
        }
    }

    /// Stores a value, clamped to its descriptor range. Out-of-range indices
    /// are ignored.
    pub fn set(&self, index: usize, value: f32) {
        let (Some(slot), Some(desc)) = (self.values.get(index), DESCRIPTORS.get(index)) else {
            return;
        };
        let value = if value.is_nan() { desc.default } else { desc.clamp(value) };
        slot.store(value.to_bits(), Ordering::Relaxed);
        self.generation.fetch_add(1, Ordering::Release);
    }

    /// Stores a value by name or string ID. Returns `false` for unknown names.
    pub fn set_by_name(&self, name: &str, value: f32) -> bool {
        match GenLossParams::default().find_param_by_name(name) {
            Some(index) => {
                self.set(index, value);
                true
            }
            None => false,
        }
    }

    /// Reads the current value, `0.0` for out-of-range indices.
    pub fn get(&self, index: usize) -> f32 {
        self.values
            .get(index)
            .map_or(0.0, |slot| f32::from_bits(slot.load(Ordering::Relaxed)))
    }

    /// Replaces every value.
    pub fn store(&self, params: &GenLossParams) {
        for (i, slot) in self.values.iter().enumerate() {
            slot.store(params.get_param(i).to_bits(), Ordering::Relaxed);
        }
        self.generation.fetch_add(1, Ordering::Release);
    }

    /// Copies all values into a parameter set.
    pub fn snapshot(&self) -> GenLossParams {
        let mut params = GenLossParams::default();
        for i in 0..PARAM_COUNT {
            params.set_param(i, self.get(i));
        }
        params
    }

    /// Returns a snapshot if anything was written since `seen`, updating
    /// `seen`. Allocation-free; safe to call from the audio thread.
    pub fn snapshot_if_changed(&self, seen: &mut u64) -> Option<GenLossParams> {
        let generation = self.generation.load(Ordering::Acquire);
        if generation == *seen {
            return None;
        }
        *seen = generation;
        Some(self.snapshot())
    }
}
