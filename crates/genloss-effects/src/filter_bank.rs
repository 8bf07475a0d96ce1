//! Tape tone shaping: model low-pass, model high shelf and a tilt pair.
//!
//! Signal order per channel:
//!
//! ```text
//! in → LP (cutoff, Q = 1/√2) → HS 6 kHz (model gain) → LS 1 kHz (−tilt) → HS 1 kHz (+tilt) → out
//! ```
//!
//! The tilt pair pivots at 1 kHz: lows move by `−tilt`, highs by `+tilt`.
//! Two opposite high shelves at the same corner would cancel exactly, so the
//! lower half of the pair is a low shelf.
//!
//! Coefficients are a pure function of the latched parameters and the sample
//! rate, so they are designed once per parameter change ([`FilterDesign`]) and
//! shared by both channels. Each channel owns its own filter memory.

use genloss_core::{
    Biquad, Coefficients, butterworth_lowpass_coefficients, high_shelf_coefficients,
    low_shelf_coefficients,
};

/// Centre of the model brightness shelf in Hz.
pub const MODEL_SHELF_HZ: f32 = 6000.0;

/// Pivot of the tilt shelf pair in Hz.
pub const TILT_PIVOT_HZ: f32 = 1000.0;

/// Lowest model low-pass cutoff in Hz.
pub const MIN_CUTOFF_HZ: f32 = 1000.0;

/// Highest usable design frequency as a fraction of the sample rate.
pub const MAX_FREQ_RATIO: f32 = 0.45;

/// Model shelf gain limit in dB (either direction).
pub const MAX_MODEL_SHELF_DB: f32 = 12.0;

/// Tilt gain limit in dB (either direction).
pub const MAX_TILT_DB: f32 = 6.0;

/// Clamps a design frequency below `MAX_FREQ_RATIO · fs`.
///
/// The upper bound wins when `min_hz` exceeds it (very low sample rates).
#[inline]
fn safe_frequency(freq: f32, min_hz: f32, sample_rate: f32) -> f32 {
    freq.max(min_hz).min(MAX_FREQ_RATIO * sample_rate)
}

/// Coefficient set for all four stages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterDesign {
    lowpass: Coefficients,
    model_shelf: Coefficients,
    tilt_low: Coefficients,
    tilt_high: Coefficients,
}

impl FilterDesign {
    /// Designs the chain for the given cutoff (Hz), model shelf gain (dB)
    /// and tilt (dB). Gains are clamped to ±12 dB and ±6 dB.
    ///
    /// The tilt is a low shelf at `-tilt_db` followed by a high shelf at
    /// `+tilt_db`, both at the 1 kHz pivot. Two high shelves with opposite
    /// gains at one corner would multiply to unity, so the pair spans
    /// `2 * tilt_db` between the bands.
    pub fn new(cutoff_hz: f32, model_shelf_db: f32, tilt_db: f32, sample_rate: f32) -> Self {
        let cutoff = safe_frequency(cutoff_hz, MIN_CUTOFF_HZ, sample_rate);
        let model_shelf_db = model_shelf_db.clamp(-MAX_MODEL_SHELF_DB, MAX_MODEL_SHELF_DB);
        let tilt_db = tilt_db.clamp(-MAX_TILT_DB, MAX_TILT_DB);
        let shelf = safe_frequency(MODEL_SHELF_HZ, 0.0, sample_rate);
        let pivot = safe_frequency(TILT_PIVOT_HZ, 0.0, sample_rate);

        Self {
            lowpass: butterworth_lowpass_coefficients(cutoff, sample_rate),
            model_shelf: high_shelf_coefficients(shelf, model_shelf_db, sample_rate),
            tilt_low: low_shelf_coefficients(pivot, -tilt_db, sample_rate),
            tilt_high: high_shelf_coefficients(pivot, tilt_db, sample_rate),
        }
    }
}

/// Four cascaded biquads for one channel.
///
/// # Example
///
/// ```rust
/// use genloss_effects::{FilterBank, FilterDesign};
///
/// let mut bank = FilterBank::new();
/// bank.apply(&FilterDesign::new(9000.0, 0.0, 0.0, 48000.0));
/// let y = bank.process(0.5);
/// assert!(y.is_finite());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterBank {
    lowpass: Biquad,
    model_shelf: Biquad,
    tilt_low: Biquad,
    tilt_high: Biquad,
}

impl FilterBank {
    /// Creates a bank of passthrough stages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads new coefficients. Filter memory is kept.
    pub fn apply(&mut self, design: &FilterDesign) {
        self.lowpass.set_coefficients(design.lowpass);
        self.model_shelf.set_coefficients(design.model_shelf);
        self.tilt_low.set_coefficients(design.tilt_low);
        self.tilt_high.set_coefficients(design.tilt_high);
    }

    /// Filters one sample through all stages.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let y = self.lowpass.process(input);
        let y = self.model_shelf.process(y);
        let y = self.tilt_low.process(y);
        self.tilt_high.process(y)
    }

    /// Clears filter memory.
    pub fn clear(&mut self) {
        self.lowpass.clear();
        self.model_shelf.clear();
        self.tilt_low.clear();
        self.tilt_high.clear();
    }

    /// `true` when every stage has its poles inside the unit circle.
    pub fn is_stable(&self) -> bool {
        self.lowpass.is_stable()
            && self.model_shelf.is_stable()
            && self.tilt_low.is_stable()
            && self.tilt_high.is_stable()
    }
}
