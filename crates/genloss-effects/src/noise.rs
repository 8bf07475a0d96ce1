//! Tape hiss and mains hum.
//!
//! Hiss is TPDF noise, the sum of two centered uniform draws, so it spans
//! `(-1, 1)` with a triangular distribution before scaling. Hum is a fixed
//! three-harmonic series on a 50 Hz or 60 Hz fundamental:
//!
//! ```text
//! hum = sin(p) + 0.3 · sin(2p) + 0.15 · sin(3p)
//! ```
//!
//! Both mains phases run continuously, so flipping the selector switches
//! between two already-running oscillators without a phase jump.

use core::f32::consts::TAU;

use genloss_core::{RandomSource, db_to_linear, wrap_phase};
use libm::sinf;

const SECOND_HARMONIC: f32 = 0.3;
const THIRD_HARMONIC: f32 = 0.15;

/// Converts a level in dBFS to linear amplitude, capped at 0 dBFS.
///
/// `-inf` gives exactly 0. NaN is treated as silence.
#[inline]
fn level(db: f32) -> f32 {
    if db.is_nan() { 0.0 } else { db_to_linear(db.min(0.0)) }
}

/// Hiss and hum generator shared by both channels.
///
/// # Example
///
/// ```rust
/// use genloss_core::RandomSource;
/// use genloss_effects::NoiseHum;
///
/// let mut nh = NoiseHum::new(48000.0);
/// nh.set_levels(f32::NEG_INFINITY, f32::NEG_INFINITY);
/// let mut rng = RandomSource::default();
/// assert_eq!(nh.noise(&mut rng), 0.0);
/// assert_eq!(nh.hum(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct NoiseHum {
    sample_rate: f32,
    noise_amp: f32,
    hum_amp: f32,
    hum_50hz: bool,
    phase_50: f32,
    phase_60: f32,
}

impl NoiseHum {
    /// Creates a generator at the default levels (-60 dB hiss, -70 dB hum,
    /// 60 Hz mains).
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            noise_amp: level(-60.0),
            hum_amp: level(-70.0),
            hum_50hz: false,
            phase_50: 0.0,
            phase_60: 0.0,
        }
    }

    /// Changes the sample rate used for hum phase increments.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Zeroes both mains phases.
    pub fn reset(&mut self) {
        self.phase_50 = 0.0;
        self.phase_60 = 0.0;
    }

    /// Sets hiss and hum levels in dBFS.
    pub fn set_levels(&mut self, noise_db: f32, hum_db: f32) {
        self.noise_amp = level(noise_db);
        self.hum_amp = level(hum_db);
    }

    /// Selects the 50 Hz (`true`) or 60 Hz (`false`) fundamental.
    pub fn set_mains_50hz(&mut self, on: bool) {
        self.hum_50hz = on;
    }

    /// TPDF draw in `(-1, 1)`. Consumes two draws.
    #[inline]
    pub fn tpdf(rng: &mut RandomSource) -> f32 {
        let a = rng.next_bipolar_half();
        let b = rng.next_bipolar_half();
        a + b
    }

    /// One scaled hiss sample. Always consumes two draws, even when silent.
    #[inline]
    pub fn noise(&self, rng: &mut RandomSource) -> f32 {
        self.noise_amp * Self::tpdf(rng)
    }

    /// Hum at the current phase of the selected fundamental.
    #[inline]
    pub fn hum(&self) -> f32 {
        let p = if self.hum_50hz { self.phase_50 } else { self.phase_60 };
        self.hum_amp * (sinf(p) + SECOND_HARMONIC * sinf(2.0 * p) + THIRD_HARMONIC * sinf(3.0 * p))
    }

    /// Advances both mains phases by one frame.
    #[inline]
    pub fn advance(&mut self) {
        let step = TAU / self.sample_rate;
        self.phase_50 = wrap_phase(self.phase_50 + 50.0 * step);
        self.phase_60 = wrap_phase(self.phase_60 + 60.0 * step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tpdf_is_bounded_and_centered() {
        let mut rng = RandomSource::default();
        let n = 100_000;
        let mut sum = 0.0_f64;
        for _ in 0..n {
            let v = NoiseHum::tpdf(&mut rng);
            assert!(v > -1.0 && v < 1.0);
            sum += f64::from(v);
        }
        assert!((sum / f64::from(n)).abs() < 0.01);
    }

    #[test]
    fn noise_scales_with_level() {
        let mut nh = NoiseHum::new(48000.0);
        nh.set_levels(-20.0, f32::NEG_INFINITY);
        let mut rng = RandomSource::default();
        for _ in 0..10_000 {
            assert!(nh.noise(&mut rng).abs() < 0.1 + 1e-6);
        }
    }

    #[test]
    fn level_is_capped_at_unity() {
        let mut nh = NoiseHum::new(48000.0);
        nh.set_levels(f32::NEG_INFINITY, 40.0);
        let peak = (0..48000)
            .map(|_| {
                let h = nh.hum();
                nh.advance();
                h.abs()
            })
            .fold(0.0_f32, f32::max);
        assert!(peak <= 1.45 + 1e-3, "peak {}", peak);
    }

    #[test]
    fn hum_period_matches_mains() {
        for (fifty, period) in [(true, 960), (false, 800)] {
            let mut nh = NoiseHum::new(48000.0);
            nh.set_levels(f32::NEG_INFINITY, 0.0);
            nh.set_mains_50hz(fifty);
            let samples: Vec<f32> = (0..period * 2)
                .map(|_| {
                    let h = nh.hum();
                    nh.advance();
                    h
                })
                .collect();
            for i in 0..period {
                assert!((samples[i] - samples[i + period]).abs() < 1e-2, "mismatch at {}", i);
            }
        }
    }

    #[test]
    fn hum_harmonic_weights() {
        for (fifty, period) in [(true, 960usize), (false, 800)] {
            let mut nh = NoiseHum::new(48000.0);
            nh.set_levels(f32::NEG_INFINITY, 0.0);
            nh.set_mains_50hz(fifty);

            let mut sums = [0.0_f64; 3];
            for n in 0..period {
                let h = f64::from(nh.hum());
                nh.advance();
                let p = core::f64::consts::TAU * n as f64 / period as f64;
                for (k, sum) in sums.iter_mut().enumerate() {
                    *sum += h * ((k + 1) as f64 * p).sin();
                }
            }

            let amplitudes = sums.map(|sum| sum * 2.0 / period as f64);
            for (amplitude, expected) in amplitudes.iter().zip([1.0, 0.3, 0.15]) {
                assert!(
                    (amplitude - expected).abs() < 1e-3,
                    "{} Hz: amplitudes {:?}",
                    if fifty { 50 } else { 60 },
                    amplitudes
                );
            }
        }
    }

    #[test]
    fn selector_switch_is_continuous() {
        let mut nh = NoiseHum::new(48000.0);
        nh.set_levels(f32::NEG_INFINITY, 0.0);
        for _ in 0..1000 {
            nh.advance();
        }
        // 60 Hz has been running in the background the whole time
        let mut reference = NoiseHum::new(48000.0);
        reference.set_levels(f32::NEG_INFINITY, 0.0);
        reference.set_mains_50hz(true);
        for _ in 0..1000 {
            reference.advance();
        }
        nh.set_mains_50hz(true);
        assert_eq!(nh.hum(), reference.hum());
    }
}
