//! Emphasized tanh saturation.
//!
//! ```text
//! pre  = x + 0.1 · (x − x[n−1])
//! y    = tanh(pre · (1 + 9 · amount))
//! out  = 0.9 · y + 0.1 · out[n−1]
//! ```
//!
//! Each channel owns a [`Saturator`], so history never crosses channels.

use genloss_core::soft_clip;

const PRE_EMPHASIS: f32 = 0.1;
const DE_EMPHASIS: f32 = 0.1;
const MAX_EXTRA_DRIVE: f32 = 9.0;

/// One channel of pre-emphasis, tanh shaping and de-emphasis.
///
/// # Example
///
/// ```rust
/// use genloss_effects::Saturator;
///
/// let mut sat = Saturator::new();
/// let y = sat.process(10.0, 1.0);
/// assert!(y.abs() <= 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Saturator {
    prev_input: f32,
    prev_output: f32,
}

impl Saturator {
    /// Creates a saturator with cleared history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive multiplier for a normalized amount (0–1).
    #[inline]
    pub fn drive(amount: f32) -> f32 {
        1.0 + MAX_EXTRA_DRIVE * amount.clamp(0.0, 1.0)
    }

    /// Processes one sample with the given normalized amount.
    #[inline]
    pub fn process(&mut self, input: f32, amount: f32) -> f32 {
        let pre = input + PRE_EMPHASIS * (input - self.prev_input);
        self.prev_input = input;

        let shaped = soft_clip(pre * Self::drive(amount));
        let out = (1.0 - DE_EMPHASIS) * shaped + DE_EMPHASIS * self.prev_output;
        self.prev_output = out;
        out
    }

    /// Clears history.
    pub fn clear(&mut self) {
        self.prev_input = 0.0;
        self.prev_output = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_amount_is_near_linear_for_small_signals() {
        let mut sat = Saturator::new();
        let mut y = 0.0;
        for _ in 0..100 {
            y = sat.process(0.01, 0.0);
        }
        // Steady state: tanh(0.01) ≈ 0.01, de-emphasis has unity DC gain
        assert!((y - 0.01).abs() < 1e-4, "y = {}", y);
    }

    #[test]
    fn output_is_bounded() {
        let mut sat = Saturator::new();
        for i in 0..1000 {
            let x = if i % 2 == 0 { 100.0 } else { -100.0 };
            let y = sat.process(x, 1.0);
            assert!(y.abs() <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn drive_spans_one_to_ten() {
        assert_eq!(Saturator::drive(0.0), 1.0);
        assert_eq!(Saturator::drive(1.0), 10.0);
        assert_eq!(Saturator::drive(5.0), 10.0);
    }

    #[test]
    fn clear_forgets_history() {
        let mut fresh = Saturator::new();
        let mut used = Saturator::new();
        used.process(0.8, 0.5);
        used.clear();
        assert_eq!(used.process(0.3, 0.5), fresh.process(0.3, 0.5));
    }
}
