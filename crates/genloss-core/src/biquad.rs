//! Biquad (bi-quadratic) filter structure.
//!
//! A second-order IIR section plus the coefficient designs the tape engine
//! needs: a Butterworth low-pass for tape bandwidth, a high shelf for the
//! "model" brightness stage, and a low/high shelf pair for tilt.
//!
//! Coefficient calculation uses the RBJ Audio EQ Cookbook formulas.

use core::f32::consts::{FRAC_1_SQRT_2, PI};
use libm::{cosf, powf, sinf, sqrtf};

use crate::math::flush_denormal;

/// Unnormalized biquad coefficients `(b0, b1, b2, a0, a1, a2)`.
pub type Coefficients = (f32, f32, f32, f32, f32, f32);

/// Shelf slope used by every shelf stage (S = 0.707).
const SHELF_SLOPE: f32 = 0.707;

/// Generic biquad filter coefficients and state.
///
/// Implements the transposed direct form II structure, which keeps only two
/// state registers per section:
/// ```text
/// y[n]  = b0*x[n] + z1
/// z1    = b1*x[n] - a1*y[n] + z2
/// z2    = b2*x[n] - a2*y[n]
/// ```
///
/// Coefficients and state are independent: [`set_coefficients`](Self::set_coefficients)
/// changes the transfer function without touching filter memory.
#[derive(Debug, Clone)]
pub struct Biquad {
    /// Feedforward coefficients
    b0: f32,
    b1: f32,
    b2: f32,

    /// Feedback coefficients (normalized by a0)
    a1: f32,
    a2: f32,

    /// State registers
    z1: f32,
    z2: f32,
}

impl Biquad {
    /// Creates a new biquad with passthrough coefficients.
    ///
    /// Initial state: `y[n] = x[n]` (no filtering)
    pub fn new() -> Self {
        Self {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            z1: 0.0,
            z2: 0.0,
        }
    }

    /// Sets the biquad coefficients.
    ///
    /// Note: This function normalizes by a0 internally.
    pub fn set_coefficients(&mut self, coefficients: Coefficients) {
        let (b0, b1, b2, a0, a1, a2) = coefficients;
        let a0_inv = 1.0 / a0;
        self.b0 = b0 * a0_inv;
        self.b1 = b1 * a0_inv;
        self.b2 = b2 * a0_inv;
        self.a1 = a1 * a0_inv;
        self.a2 = a2 * a0_inv;
    }

    /// Processes a single sample through the filter.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.b0 * input + self.z1;
        self.z1 = flush_denormal(self.b1 * input - self.a1 * output + self.z2);
        self.z2 = flush_denormal(self.b2 * input - self.a2 * output);
        output
    }

    /// Clears the filter state without changing coefficients.
    pub fn clear(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }

    /// Returns `true` if both poles lie strictly inside the unit circle.
    ///
    /// Uses the stability triangle for `1 + a1 z^-1 + a2 z^-2`:
    /// `|a2| < 1` and `|a1| < 1 + a2`.
    pub fn is_stable(&self) -> bool {
        self.a2.abs() < 1.0 && self.a1.abs() < 1.0 + self.a2
    }
}

impl Default for Biquad {
    fn default() -> Self {
        Self::new()
    }
}

/// Calculates low-pass filter coefficients using the RBJ cookbook formula.
///
/// `q = FRAC_1_SQRT_2` gives the maximally flat (Butterworth) response the
/// tape bandwidth stage uses.
pub fn lowpass_coefficients(frequency: f32, q: f32, sample_rate: f32) -> Coefficients {
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / (2.0 * q);

    let b0 = (1.0 - cos_omega) / 2.0;
    let b1 = 1.0 - cos_omega;
    let b2 = (1.0 - cos_omega) / 2.0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_omega;
    let a2 = 1.0 - alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// Butterworth low-pass shorthand (`q = 1/√2`).
pub fn butterworth_lowpass_coefficients(frequency: f32, sample_rate: f32) -> Coefficients {
    lowpass_coefficients(frequency, FRAC_1_SQRT_2, sample_rate)
}

/// Calculates high-shelf coefficients using the RBJ cookbook formula.
///
/// Frequencies above `frequency` are scaled by `gain_db`; below it the
/// response stays at unity. A gain of 0 dB yields an exact identity
/// transfer function.
///
/// `frequency` must be below Nyquist; callers clamp it.
pub fn high_shelf_coefficients(frequency: f32, gain_db: f32, sample_rate: f32) -> Coefficients {
    let a = powf(10.0, gain_db / 40.0);
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / 2.0 * sqrtf((a + 1.0 / a) * (1.0 / SHELF_SLOPE - 1.0) + 2.0);
    let two_sqrt_a_alpha = 2.0 * sqrtf(a) * alpha;

    let b0 = a * ((a + 1.0) + (a - 1.0) * cos_omega + two_sqrt_a_alpha);
    let b1 = -2.0 * a * ((a - 1.0) + (a + 1.0) * cos_omega);
    let b2 = a * ((a + 1.0) + (a - 1.0) * cos_omega - two_sqrt_a_alpha);
    let a0 = (a + 1.0) - (a - 1.0) * cos_omega + two_sqrt_a_alpha;
    let a1 = 2.0 * ((a - 1.0) - (a + 1.0) * cos_omega);
    let a2 = (a + 1.0) - (a - 1.0) * cos_omega - two_sqrt_a_alpha;

    (b0, b1, b2, a0, a1, a2)
}

/// Calculates low-shelf coefficients using the RBJ cookbook formula.
///
/// Mirror image of [`high_shelf_coefficients`]: frequencies below
/// `frequency` are scaled by `gain_db`.
pub fn low_shelf_coefficients(frequency: f32, gain_db: f32, sample_rate: f32) -> Coefficients {
    let a = powf(10.0, gain_db / 40.0);
    let omega = 2.0 * PI * frequency / sample_rate;
    let cos_omega = cosf(omega);
    let sin_omega = sinf(omega);
    let alpha = sin_omega / 2.0 * sqrtf((a + 1.0 / a) * (1.0 / SHELF_SLOPE - 1.0) + 2.0);
    let two_sqrt_a_alpha = 2.0 * sqrtf(a) * alpha;

    let b0 = a * ((a + 1.0) - (a - 1.0) * cos_omega + two_sqrt_a_alpha);
    let b1 = 2.0 * a * ((a - 1.0) - (a + 1.0) * cos_omega);
    let b2 = a * ((a + 1.0) - (a - 1.0) * cos_omega - two_sqrt_a_alpha);
    let a0 = (a + 1.0) + (a - 1.0) * cos_omega + two_sqrt_a_alpha;
    let a1 = -2.0 * ((a - 1.0) + (a + 1.0) * cos_omega);
    let a2 = (a + 1.0) + (a - 1.0) * cos_omega - two_sqrt_a_alpha;

    (b0, b1, b2, a0, a1, a2)
}
