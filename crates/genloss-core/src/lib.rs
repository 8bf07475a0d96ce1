//! GenLoss Core - DSP primitives for tape-style degradation
//!
//! This crate provides the building blocks the `genloss-effects` engine is
//! assembled from. Everything here is designed for real-time audio: state is
//! sized up front and nothing allocates in the per-sample path.
//!
//! # Core Abstractions
//!
//! - [`Effect`] - Stereo-pair processing trait implemented by the engine
//! - [`ParameterInfo`] - Index-based parameter discovery for hosts, presets and CLIs
//!
//! ## Filters
//!
//! - [`Biquad`] - Second-order IIR section (transposed direct form II)
//! - [`lowpass_coefficients`] / [`high_shelf_coefficients`] / [`low_shelf_coefficients`] - RBJ cookbook designs
//!
//! ## Delay Lines
//!
//! - [`FractionalDelay`] - Ring buffer read at a fractional offset (linear interpolation)
//!
//! ## Randomness
//!
//! - [`RandomSource`] - Seedable LCG; one shared sequence keeps runs bit-reproducible
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`soft_clip`], [`wet_dry_mix`], etc.
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build for embedded targets:
//!
//! ```toml
//! [dependencies]
//! genloss-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod biquad;
pub mod delay;
pub mod effect;
pub mod math;
pub mod param_info;
pub mod random;

// Re-export main types at crate root
pub use biquad::{
    Biquad, Coefficients, butterworth_lowpass_coefficients, high_shelf_coefficients,
    low_shelf_coefficients, lowpass_coefficients,
};
pub use delay::FractionalDelay;
pub use effect::Effect;
pub use math::{
    db_to_linear, flush_denormal, linear_to_db, ms_to_samples, soft_clip, wet_dry_mix,
    wrap_phase,
};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo};
pub use random::{DEFAULT_SEED, RandomSource};
