//! Mathematical utility functions for DSP.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Utilities
//!
//! - [`soft_clip`] - Hyperbolic tangent waveshaper
//! - [`wet_dry_mix`] - Linear crossfade
//! - [`wrap_phase`] - Keep a radian phase accumulator in `[0, 2π]`
//! - [`ms_to_samples`] - Time conversion

use core::f32::consts::TAU;
use libm::{expf, logf, tanhf};

/// Convert decibels to linear gain.
///
/// `f32::NEG_INFINITY` maps to exactly `0.0`, which callers use as
/// "fully silent".
///
/// # Example
/// ```rust
/// use genloss_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// assert_eq!(db_to_linear(f32::NEG_INFINITY), 0.0);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Input is floored at 1e-10 (-200 dB) so silence stays finite.
///
/// # Example
/// ```rust
/// use genloss_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Soft clip using hyperbolic tangent.
///
/// Smooth saturation that approaches ±1 asymptotically.
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    tanhf(x)
}

/// Convert milliseconds to samples.
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * sample_rate / 1000.0
}

/// Flush denormal values to zero.
///
/// Recursive filters decaying toward silence produce subnormal floats,
/// which are very slow on x86.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Crossfade between dry and wet signals.
///
/// Computed as `dry + (wet - dry) * mix`. At `mix == 0.0` the result is
/// exactly `dry` for any finite `wet`.
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry + (wet - dry) * mix
}

/// Wrap a radian phase accumulator after an increment.
///
/// Increments are always below one cycle per sample, so a single
/// subtraction is enough.
#[inline]
pub fn wrap_phase(phase: f32) -> f32 {
    if phase > TAU { phase - TAU } else { phase }
}
