//! Stochastic dropout envelope.
//!
//! Dropouts form a renewal process: the wait between events is exponential
//! with rate `events_per_minute / 60` per second. Each event is a triangular
//! dip of the envelope from 1 to 0 and back over the configured duration.
//!
//! ```text
//!            countdown == 0            elapsed >= dur / 2
//! Waiting ─────────────────▶ DippingDown ─────────────────▶ DippingUp
//!    ▲                                                          │
//!    └───────────────── elapsed >= dur, draw next wait ─────────┘
//! ```
//!
//! While waiting, the envelope relaxes toward 1 by at most
//! [`RELAX_STEP`] per frame. A rate of zero means an infinite wait with the
//! envelope pinned at 1.

use genloss_core::{RandomSource, ms_to_samples};
use libm::{logf, roundf};

/// Largest per-frame envelope increase while waiting.
pub const RELAX_STEP: f32 = 0.005;

/// Scheduler phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropoutPhase {
    /// Counting down to the next event.
    Waiting,
    /// First half of a dip, envelope falling.
    DippingDown,
    /// Second half of a dip, envelope rising.
    DippingUp,
}

/// Shared dropout envelope generator.
///
/// Intervals are drawn lazily: [`reset`](Self::reset) and rate changes only
/// mark the pending wait for redraw, and the draw happens inside the next
/// [`advance`](Self::advance), keeping random-source order inside the
/// per-frame sequence.
///
/// # Example
///
/// ```rust
/// use genloss_core::RandomSource;
/// use genloss_effects::DropoutScheduler;
///
/// let mut dropouts = DropoutScheduler::new(48000.0);
/// dropouts.set_rate(0.0);
/// let mut rng = RandomSource::default();
/// assert_eq!(dropouts.advance(&mut rng), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct DropoutScheduler {
    sample_rate: f32,
    events_per_minute: f32,
    duration_samples: u32,

    phase: DropoutPhase,
    /// Frames left before the next event; `None` waits forever.
    countdown: Option<u64>,
    elapsed: u32,
    envelope: f32,
    redraw_pending: bool,
    events: u64,
}

impl DropoutScheduler {
    /// Creates an idle scheduler with the default rate (3 /min) and
    /// duration (40 ms).
    pub fn new(sample_rate: f32) -> Self {
        let mut scheduler = Self {
            sample_rate,
            events_per_minute: 3.0,
            duration_samples: 1,
            phase: DropoutPhase::Waiting,
            countdown: None,
            elapsed: 0,
            envelope: 1.0,
            redraw_pending: true,
            events: 0,
        };
        scheduler.set_duration_ms(40.0);
        scheduler
    }

    /// Changes the sample rate. Takes effect for the next drawn interval;
    /// callers re-apply the duration.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    /// Rearms the scheduler: envelope at 1, no event in progress, next wait
    /// drawn on the following frame.
    pub fn reset(&mut self) {
        self.phase = DropoutPhase::Waiting;
        self.countdown = None;
        self.elapsed = 0;
        self.envelope = 1.0;
        self.redraw_pending = true;
        self.events = 0;
    }

    /// Sets the mean event rate in events per minute.
    ///
    /// A change while waiting redraws the pending wait from the new
    /// distribution; an event in progress finishes first.
    pub fn set_rate(&mut self, events_per_minute: f32) {
        let rate = if events_per_minute.is_nan() {
            0.0
        } else {
            events_per_minute.max(0.0)
        };
        if rate != self.events_per_minute {
            #[cfg(feature = "std")]
            tracing::debug!(
                from = self.events_per_minute,
                to = rate,
                "dropout: rate changed, rescheduling"
            );
            self.events_per_minute = rate;
            if self.phase == DropoutPhase::Waiting {
                self.redraw_pending = true;
            }
        }
    }

    /// Sets the dip duration in milliseconds (at least one frame).
    pub fn set_duration_ms(&mut self, ms: f32) {
        let samples = roundf(ms_to_samples(ms, self.sample_rate));
        // NaN casts to 0
        self.duration_samples = (samples as u32).max(1);
    }

    /// Dip duration in frames.
    pub fn duration_samples(&self) -> u32 {
        self.duration_samples
    }

    /// Current envelope in `[0, 1]`.
    #[inline]
    pub fn envelope(&self) -> f32 {
        self.envelope
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> DropoutPhase {
        self.phase
    }

    /// Events started since the last reset.
    pub fn events(&self) -> u64 {
        self.events
    }

    /// Draws a wait in frames for the current rate, `None` when disabled.
    ///
    /// Consumes one draw from `rng` when the rate is positive.
    fn draw_interval(&self, rng: &mut RandomSource) -> Option<u64> {
        let per_second = self.events_per_minute / 60.0;
        if per_second <= 0.0 {
            return None;
        }
        let seconds = -logf(rng.next_open_f32()) / per_second;
        let frames = roundf(seconds * self.sample_rate) as u64;
        Some(frames.max(1))
    }

    fn schedule(&mut self, rng: &mut RandomSource) {
        self.phase = DropoutPhase::Waiting;
        self.elapsed = 0;
        self.countdown = self.draw_interval(rng);
        self.redraw_pending = false;
    }

    fn step_dip(&mut self, rng: &mut RandomSource) {
        self.elapsed += 1;
        let t = self.elapsed as f32 / self.duration_samples as f32;
        if t < 0.5 {
            self.phase = DropoutPhase::DippingDown;
            self.envelope = 1.0 - 2.0 * t;
        } else {
            self.phase = DropoutPhase::DippingUp;
            self.envelope = 2.0 * t - 1.0;
        }
        self.envelope = self.envelope.clamp(0.0, 1.0);

        if self.elapsed >= self.duration_samples {
            self.schedule(rng);
        }
    }

    /// Advances one frame and returns the envelope.
    ///
    /// Consumes at most one draw from `rng`, only when a wait is drawn.
    #[inline]
    pub fn advance(&mut self, rng: &mut RandomSource) -> f32 {
        if self.redraw_pending {
            self.schedule(rng);
        }

        match self.phase {
            DropoutPhase::Waiting => match self.countdown {
                None => self.envelope = 1.0,
                Some(0) => {
                    self.events += 1;
                    self.step_dip(rng);
                }
                Some(n) => {
                    self.countdown = Some(n - 1);
                    self.envelope = (self.envelope + RELAX_STEP).min(1.0);
                }
            },
            DropoutPhase::DippingDown | DropoutPhase::DippingUp => self.step_dip(rng),
        }

        self.envelope
    }

    /// Gain applied to the wet signal for a dip depth in `[0, 1]`.
    #[inline]
    pub fn gain(&self, depth: f32) -> f32 {
        1.0 - depth.clamp(0.0, 1.0) * (1.0 - self.envelope)
    }
}
