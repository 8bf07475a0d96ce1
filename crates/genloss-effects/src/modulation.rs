//! Wow, flutter and tape-stop modulation.
//!
//! One [`ModulationEngine`] drives both channels. Each frame it produces a
//! small signed modulation value that the channel delay lines turn into a
//! read offset around the base delay.
//!
//! # Tape Stop
//!
//! While engaged, a ramp grows by `1 / (1.5 · fs)` per frame and the playback
//! speed follows `exp(-5 · ramp)`. Oscillator phase increments are scaled by
//! the speed, so wow and flutter slow down with the tape. The ramp is capped
//! at [`STOP_RAMP_CEILING`], where the speed is still a normal, nonzero `f32`.

use core::f32::consts::TAU;

use genloss_core::{RandomSource, wrap_phase};
use libm::{expf, sinf};

/// Seconds for the ramp to reach 1 (speed `e^-5`).
const STOP_RAMP_SECONDS: f32 = 1.5;

/// Exponential decay constant of the tape-stop speed curve.
const STOP_DECAY: f32 = 5.0;

/// Upper bound of the tape-stop ramp. `exp(-5 · 16) ≈ 1.8e-35`.
pub const STOP_RAMP_CEILING: f32 = 16.0;

/// Per-frame jitter step scale (applied to a centered uniform draw).
const JITTER_STEP: f32 = 0.0005;

/// Symmetric bound on the flutter jitter accumulator.
pub const JITTER_LIMIT: f32 = 0.002;

/// Scale from combined oscillator output to delay modulation.
const MOD_SCALE: f32 = 0.005;

/// Oscillator rates are capped at this fraction of the sample rate.
const MAX_RATE_RATIO: f32 = 0.45;

/// Wow and flutter oscillators plus the tape-stop envelope.
///
/// # Example
///
/// ```rust
/// use genloss_core::RandomSource;
/// use genloss_effects::ModulationEngine;
///
/// let mut modulation = ModulationEngine::new(48000.0);
/// modulation.set_tape_stop(true);
/// let mut rng = RandomSource::default();
/// modulation.advance(&mut rng);
/// assert!(modulation.speed() < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct ModulationEngine {
    sample_rate: f32,
    wow_rate: f32,
    wow_depth: f32,
    flutter_rate: f32,
    flutter_depth: f32,
    tape_stop: bool,

    wow_phase: f32,
    flutter_phase: f32,
    jitter: f32,
    stop_ramp: f32,
    speed: f32,
}

impl ModulationEngine {
    /// Creates an engine at rest with default rates.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            wow_rate: 1.0,
            wow_depth: 0.2,
            flutter_rate: 12.0,
            flutter_depth: 0.1,
            tape_stop: false,
            wow_phase: 0.0,
            flutter_phase: 0.0,
            jitter: 0.0,
            stop_ramp: 0.0,
            speed: 1.0,
        }
    }

    /// Changes the sample rate used for phase increments.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Zeroes phases, jitter and the tape-stop ramp.
    pub fn reset(&mut self) {
        self.wow_phase = 0.0;
        self.flutter_phase = 0.0;
        self.jitter = 0.0;
        self.stop_ramp = 0.0;
        self.speed = 1.0;
    }

    #[inline]
    fn limit_rate(&self, rate: f32) -> f32 {
        rate.max(0.0).min(MAX_RATE_RATIO * self.sample_rate)
    }

    /// Sets wow rate (Hz) and depth (0–1).
    pub fn set_wow(&mut self, rate: f32, depth: f32) {
        self.wow_rate = self.limit_rate(rate);
        self.wow_depth = depth.clamp(0.0, 1.0);
    }

    /// Sets flutter rate (Hz) and depth (0–1).
    pub fn set_flutter(&mut self, rate: f32, depth: f32) {
        self.flutter_rate = self.limit_rate(rate);
        self.flutter_depth = depth.clamp(0.0, 1.0);
    }

    /// Engages or releases tape stop. Releasing returns to full speed at
    /// the next frame.
    pub fn set_tape_stop(&mut self, engaged: bool) {
        self.tape_stop = engaged;
    }

    /// Current playback speed factor in `(0, 1]`.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Current flutter jitter accumulator.
    #[inline]
    pub fn jitter(&self) -> f32 {
        self.jitter
    }

    /// Advances one frame and returns the combined delay modulation.
    ///
    /// Consumes exactly one draw from `rng` (flutter jitter).
    #[inline]
    pub fn advance(&mut self, rng: &mut RandomSource) -> f32 {
        if self.tape_stop {
            self.stop_ramp = (self.stop_ramp + 1.0 / (self.sample_rate * STOP_RAMP_SECONDS))
                .min(STOP_RAMP_CEILING);
            self.speed = expf(-STOP_DECAY * self.stop_ramp);
        } else {
            self.stop_ramp = 0.0;
            self.speed = 1.0;
        }

        let phase_scale = TAU * self.speed / self.sample_rate;

        let wow = self.wow_depth * sinf(self.wow_phase);
        self.wow_phase = wrap_phase(self.wow_phase + self.wow_rate * phase_scale);

        self.jitter = (self.jitter + JITTER_STEP * rng.next_bipolar_half())
            .clamp(-JITTER_LIMIT, JITTER_LIMIT);
        let flutter = self.flutter_depth * sinf(self.flutter_phase) + self.jitter;
        self.flutter_phase = wrap_phase(self.flutter_phase + self.flutter_rate * phase_scale);

        (wow + flutter) * MOD_SCALE
    }
}
