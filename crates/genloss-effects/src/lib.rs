//! GenLoss Effects - analog tape degradation
//!
//! This crate assembles the `genloss-core` primitives into a real-time tape
//! emulation for a stereo pair:
//!
//! - [`ModulationEngine`] - Wow, flutter (with jitter) and tape stop
//! - [`FilterBank`] - Model low-pass, 6 kHz model shelf and 1 kHz tilt pair
//! - [`Saturator`] - Pre-emphasized tanh saturation with de-emphasis
//! - [`DropoutScheduler`] - Poisson-timed triangular amplitude dips
//! - [`NoiseHum`] - TPDF hiss and three-harmonic mains hum
//! - [`Mixer`] - Dry/wet blend and output gain
//! - [`GenLoss`] - The full engine
//!
//! ## Example
//!
//! ```rust
//! use genloss_effects::{GenLoss, GenLossParams};
//!
//! let mut tape = GenLoss::new(44100.0);
//! tape.reset(44100.0, 256);
//! tape.set_params(&GenLossParams {
//!     wow_depth: 0.6,
//!     dropout_rate: 12.0,
//!     ..GenLossParams::default()
//! });
//!
//! let input = [0.25_f32; 256];
//! let mut left = [0.0_f32; 256];
//! let mut right = [0.0_f32; 256];
//! tape.process(&[&input, &input], &mut [&mut left, &mut right], 256);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod dropout;
pub mod engine;
pub mod filter_bank;
pub mod mixer;
pub mod modulation;
pub mod noise;
pub mod params;
pub mod saturator;
#[cfg(feature = "std")]
pub mod shared_params;

// Re-export main types at crate root
pub use dropout::{DropoutPhase, DropoutScheduler};
pub use engine::{DEFAULT_BLOCK_SIZE, GenLoss};
pub use filter_bank::{FilterBank, FilterDesign};
pub use mixer::Mixer;
pub use modulation::ModulationEngine;
pub use noise::NoiseHum;
pub use params::{DESCRIPTORS, GenLossParams, PARAM_COUNT};
pub use saturator::Saturator;
#[cfg(feature = "std")]
pub use shared_params::SharedParams;
