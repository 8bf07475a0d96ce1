//! Dry/wet blend and output gain.

use genloss_core::{db_to_linear, wet_dry_mix};

/// Output gain ceiling in dB.
const MAX_OUTPUT_DB: f32 = 24.0;

/// Linear crossfade followed by output gain.
///
/// At mix 0 the output is exactly `dry · gain` for any finite wet sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mixer {
    mix: f32,
    gain: f32,
}

impl Default for Mixer {
    fn default() -> Self {
        Self { mix: 1.0, gain: 1.0 }
    }
}

impl Mixer {
    /// Sets the mix in percent (100 = fully wet) and output gain in dB.
    ///
    /// Gain is capped at +24 dB; `-inf` mutes.
    pub fn set(&mut self, mix_percent: f32, output_db: f32) {
        let mix = mix_percent * 0.01;
        self.mix = if mix.is_nan() { 1.0 } else { mix.clamp(0.0, 1.0) };
        self.gain = if output_db.is_nan() { 1.0 } else { db_to_linear(output_db.min(MAX_OUTPUT_DB)) };
    }

    /// Normalized mix in `[0, 1]`.
    pub fn mix(&self) -> f32 {
        self.mix
    }

    /// Linear output gain.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Blends one sample pair.
    #[inline]
    pub fn process(&self, dry: f32, wet: f32) -> f32 {
        wet_dry_mix(dry, wet, self.mix) * self.gain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_only_at_zero_mix() {
        let mut mixer = Mixer::default();
        mixer.set(0.0, 6.0);
        for &dry in &[0.0, 0.25, -0.7, 1.0] {
            assert_eq!(mixer.process(dry, 123.0), dry * mixer.gain());
        }
    }

    #[test]
    fn wet_only_at_full_mix() {
        let mut mixer = Mixer::default();
        mixer.set(100.0, 0.0);
        let y = mixer.process(0.3, -0.2);
        assert!((y + 0.2).abs() < 1e-6, "y = {}", y);
    }

    #[test]
    fn mix_is_clamped() {
        let mut mixer = Mixer::default();
        mixer.set(250.0, 0.0);
        assert_eq!(mixer.mix(), 1.0);
        mixer.set(-5.0, 0.0);
        assert_eq!(mixer.mix(), 0.0);
        mixer.set(f32::NAN, f32::NAN);
        assert_eq!(mixer.mix(), 1.0);
        assert_eq!(mixer.gain(), 1.0);
    }
}
