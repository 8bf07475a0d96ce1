//! The tape degradation engine.
//!
//! Per frame:
//!
//! ```text
//! modulation ─┐
//!             ▼
//! dry ──▶ delay read ──▶ filter bank ──▶ saturator ──▶ × dropout ──▶ + hiss + hum ──▶ mixer ──▶ out
//!  │                                                                                   ▲
//!  ├──────────────────────────────────────── dry ──────────────────────────────────────┘
//!  └──▶ delay write (after the read)
//! ```
//!
//! Random draws per frame, in order: flutter jitter (1), left hiss (2),
//! right hiss (2), dropout wait (0 or 1). Keeping this order fixed makes two
//! runs from [`GenLoss::reset`] with the same parameters and input produce
//! identical output.

use genloss_core::{Effect, FractionalDelay, RandomSource, random::DEFAULT_SEED};
use libm::roundf;

use crate::dropout::DropoutScheduler;
use crate::filter_bank::{FilterBank, FilterDesign};
use crate::mixer::Mixer;
use crate::modulation::ModulationEngine;
use crate::noise::NoiseHum;
use crate::params::GenLossParams;
use crate::saturator::Saturator;

/// Base delay and modulation depth, both in seconds.
const BASE_DELAY_SECONDS: f32 = 0.005;

/// Largest magnitude [`ModulationEngine::advance`] can return, times the
/// widest spread scale (1.5).
const MAX_MODULATION: f32 = (1.0 + 1.0 + 0.002) * 0.005 * 1.5;

/// Block size assumed by [`GenLoss::new`].
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// State owned by one channel.
#[derive(Debug, Clone)]
struct TapeChannel {
    delay: FractionalDelay,
    filters: FilterBank,
    saturator: Saturator,
}

impl TapeChannel {
    fn new(max_delay_samples: f32) -> Self {
        Self {
            delay: FractionalDelay::for_max_delay(max_delay_samples),
            filters: FilterBank::new(),
            saturator: Saturator::new(),
        }
    }

    fn clear(&mut self, max_delay_samples: f32) {
        self.delay.ensure_capacity(max_delay_samples);
        self.filters.clear();
        self.saturator.clear();
    }

    /// Delay read, tone shaping and saturation. Does not write the delay.
    #[inline]
    fn color(&mut self, modulation: f32, base_delay: f32, saturation: f32) -> f32 {
        let delayed = self.delay.read(base_delay + modulation * base_delay);
        let filtered = self.filters.process(delayed);
        self.saturator.process(filtered, saturation)
    }
}

/// Analog tape degradation for a stereo pair.
///
/// Lifecycle: [`reset`](Self::reset) when the stream (re)starts,
/// [`set_params`](Self::set_params) before each block, then
/// [`process`](Self::process). Nothing in `set_params` or `process`
/// allocates.
///
/// # Example
///
/// ```rust
/// use genloss_effects::{GenLoss, GenLossParams};
///
/// let mut tape = GenLoss::new(48000.0);
/// tape.set_params(&GenLossParams::default());
///
/// let left = [0.1_f32; 256];
/// let right = [0.1_f32; 256];
/// let mut out_l = [0.0_f32; 256];
/// let mut out_r = [0.0_f32; 256];
/// tape.process(&[&left, &right], &mut [&mut out_l, &mut out_r], 256);
/// assert!(out_l.iter().all(|s| s.is_finite()));
/// ```
#[derive(Debug, Clone)]
pub struct GenLoss {
    sample_rate: f32,
    block_size: usize,
    params: GenLossParams,

    rng: RandomSource,
    modulation: ModulationEngine,
    dropout: DropoutScheduler,
    noise: NoiseHum,
    mixer: Mixer,
    channels: [TapeChannel; 2],

    /// Latched tone settings the current filter design was built from.
    design_key: (f32, f32, f32),
    base_delay: f32,
    saturation: f32,
    spread: f32,
    dropout_depth: f32,
}

impl Default for GenLoss {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl GenLoss {
    /// Creates an engine with default parameters, already reset at
    /// `sample_rate`.
    ///
    /// `sample_rate` must be positive.
    pub fn new(sample_rate: f32) -> Self {
        let max_delay = Self::max_delay_samples(sample_rate);
        let mut engine = Self {
            sample_rate,
            block_size: DEFAULT_BLOCK_SIZE,
            params: GenLossParams::default(),
            rng: RandomSource::default(),
            modulation: ModulationEngine::new(sample_rate),
            dropout: DropoutScheduler::new(sample_rate),
            noise: NoiseHum::new(sample_rate),
            mixer: Mixer::default(),
            channels: [TapeChannel::new(max_delay), TapeChannel::new(max_delay)],
            design_key: (f32::NAN, f32::NAN, f32::NAN),
            base_delay: BASE_DELAY_SECONDS * sample_rate,
            saturation: 0.0,
            spread: 0.0,
            dropout_depth: 0.0,
        };
        engine.reset(sample_rate, DEFAULT_BLOCK_SIZE);
        engine
    }

    fn max_delay_samples(sample_rate: f32) -> f32 {
        BASE_DELAY_SECONDS * sample_rate * (1.0 + MAX_MODULATION)
    }

    /// Reinitializes all state for a new stream.
    ///
    /// Zeroes delay lines, filter and saturator memory, phases and the
    /// tape-stop ramp, reseeds the random source and rearms the dropout
    /// scheduler. The current parameters are re-latched at the new rate.
    /// May allocate when the sample rate grows.
    ///
    /// `sample_rate` must be positive; callers reject anything else.
    /// `block_size` is the host's maximum block length, kept for reporting.
    pub fn reset(&mut self, sample_rate: f32, block_size: usize) {
        self.sample_rate = sample_rate;
        self.block_size = block_size;
        self.base_delay = BASE_DELAY_SECONDS * sample_rate;

        self.rng.reseed(DEFAULT_SEED);
        self.modulation.set_sample_rate(sample_rate);
        self.modulation.reset();
        self.dropout.set_sample_rate(sample_rate);
        self.dropout.reset();
        self.noise.set_sample_rate(sample_rate);
        self.noise.reset();

        let max_delay = Self::max_delay_samples(sample_rate);
        for channel in &mut self.channels {
            channel.clear(max_delay);
        }

        // Force a redesign at the new rate
        self.design_key = (f32::NAN, f32::NAN, f32::NAN);
        let params = self.params;
        self.set_params(&params);

        #[cfg(feature = "std")]
        tracing::debug!(
            sample_rate,
            block_size,
            delay_capacity = self.channels[0].delay.capacity(),
            "genloss: reset"
        );
    }

    /// Latches a parameter set for the following blocks.
    ///
    /// NaN values fall back to defaults; everything else is clamped where it
    /// is consumed. Filter coefficients are redesigned only when cutoff,
    /// model shelf or tilt change.
    pub fn set_params(&mut self, params: &GenLossParams) {
        let p = params.sanitized();
        self.params = p;

        self.modulation.set_wow(p.wow_rate, p.wow_depth);
        self.modulation.set_flutter(p.flutter_rate, p.flutter_depth);
        self.modulation.set_tape_stop(p.tape_stop);

        self.dropout.set_rate(p.dropout_rate);
        self.dropout.set_duration_ms(p.dropout_ms);
        self.dropout_depth = p.dropout_depth.clamp(0.0, 1.0);

        self.saturation = (p.saturation * 0.01).clamp(0.0, 1.0);
        self.spread = (p.spread * 0.01).clamp(0.0, 1.0);

        self.noise.set_levels(p.noise_db, p.hum_db);
        self.noise.set_mains_50hz(p.hum_50hz);

        self.mixer.set(p.mix, p.output_db);

        let key = (p.model_lp_khz * 1000.0, p.model_hs_db, p.tilt_db);
        if key != self.design_key {
            let design = FilterDesign::new(key.0, key.1, key.2, self.sample_rate);
            for channel in &mut self.channels {
                channel.filters.apply(&design);
            }
            self.design_key = key;
        }
    }

    /// Processes `frames` frames.
    ///
    /// Only the first two channels are touched. A missing input channel
    /// reads as silence; a missing output channel is computed and discarded.
    /// Channels past the second are left as they are. `frames` is limited
    /// to the length of the first two output buffers. With no output
    /// channels nothing runs and no state advances.
    pub fn process(&mut self, inputs: &[&[f32]], outputs: &mut [&mut [f32]], frames: usize) {
        if outputs.is_empty() {
            return;
        }
        let frames = outputs.iter().take(2).fold(frames, |n, ch| n.min(ch.len()));
        let empty: &[f32] = &[];
        let in_left = inputs.first().copied().unwrap_or(empty);
        let in_right = inputs.get(1).copied().unwrap_or(empty);

        for n in 0..frames {
            let dry_left = in_left.get(n).copied().unwrap_or(0.0);
            let dry_right = in_right.get(n).copied().unwrap_or(0.0);
            let (left, right) = self.process_frame(dry_left, dry_right);

            if let Some(out) = outputs.get_mut(0) {
                out[n] = left;
            }
            if let Some(out) = outputs.get_mut(1) {
                out[n] = right;
            }
        }
    }

    /// Processes one stereo frame.
    #[inline]
    pub fn process_frame(&mut self, dry_left: f32, dry_right: f32) -> (f32, f32) {
        let modulation = self.modulation.advance(&mut self.rng);
        let hiss = [self.noise.noise(&mut self.rng), self.noise.noise(&mut self.rng)];
        self.dropout.advance(&mut self.rng);
        let dip = self.dropout.gain(self.dropout_depth);

        let hum = self.noise.hum();
        self.noise.advance();

        let spread_scale = [1.0 - 0.5 * self.spread, 1.0 + 0.5 * self.spread];
        let dry = [dry_left, dry_right];
        let mut out = [0.0; 2];

        for (ch, channel) in self.channels.iter_mut().enumerate() {
            let colored = channel.color(modulation * spread_scale[ch], self.base_delay, self.saturation);
            let wet = colored * dip + hiss[ch] + hum;
            out[ch] = self.mixer.process(dry[ch], wet);
            channel.delay.write(dry[ch]);
        }

        (out[0], out[1])
    }

    /// Current sample rate.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Block size given at the last reset.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Currently latched parameters.
    pub fn params(&self) -> &GenLossParams {
        &self.params
    }

    /// Tape-stop speed factor of the last processed frame.
    pub fn speed(&self) -> f32 {
        self.modulation.speed()
    }

    /// Dropout envelope of the last processed frame.
    pub fn dropout_envelope(&self) -> f32 {
        self.dropout.envelope()
    }

    /// Dropout events started since the last reset.
    pub fn dropout_events(&self) -> u64 {
        self.dropout.events()
    }

    /// Delay line capacity per channel, in samples.
    pub fn delay_capacity(&self) -> usize {
        self.channels[0].delay.capacity()
    }
}

impl Effect for GenLoss {
    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        self.process_frame(left, right)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        GenLoss::reset(self, sample_rate, self.block_size);
    }

    fn reset(&mut self) {
        GenLoss::reset(self, self.sample_rate, self.block_size);
    }

    fn latency_samples(&self) -> usize {
        roundf(self.base_delay) as usize
    }
}
