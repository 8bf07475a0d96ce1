//! The latched parameter set.
//!
//! [`GenLossParams`] holds every control in host units (Hz, dB, percent,
//! events per minute). The engine copies it once per block and derives its
//! internal, normalized values from that copy, clamping at the point of use.

use genloss_core::{ParamDescriptor, ParamId, ParamUnit, ParameterInfo};

/// Number of parameters exposed through [`ParameterInfo`].
pub const PARAM_COUNT: usize = 18;

/// Descriptor table, indexed like [`GenLossParams`]'s `ParameterInfo` impl.
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Wow Rate | 0.1–6 Hz | 1.0 |
/// | 1 | Wow Depth | 0–1 | 0.2 |
/// | 2 | Flutter Rate | 6–30 Hz | 12.0 |
/// | 3 | Flutter Depth | 0–1 | 0.1 |
/// | 4 | Dropouts | 0–30 /min | 3.0 |
/// | 5 | Dropout Depth | 0–1 | 0.6 |
/// | 6 | Dropout Time | 5–300 ms | 40.0 |
/// | 7 | Saturation | 0–100% | 25.0 |
/// | 8 | Noise | -90–-30 dB | -60.0 |
/// | 9 | Hum | -90–-30 dB | -70.0 |
/// | 10 | Hum 50 Hz | off/on | off |
/// | 11 | Model LP | 2–20 kHz | 9.0 |
/// | 12 | Model HS | -12–12 dB | 0.0 |
/// | 13 | Tilt | -6–6 dB | 0.0 |
/// | 14 | Spread | 0–100% | 50.0 |
/// | 15 | Mix | 0–100% | 100.0 |
/// | 16 | Output | -24–24 dB | 0.0 |
/// | 17 | Tape Stop | off/on | off |
pub const DESCRIPTORS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor::rate_hz("Wow Rate", "WowRate", 0.1, 6.0, 1.0)
        .with_id(ParamId(1000), "wow_rate")
        .with_group("modulation"),
    ParamDescriptor::new("Wow Depth", "WowDep", ParamUnit::None, 0.0, 1.0, 0.2)
        .with_id(ParamId(1001), "wow_depth")
        .with_group("modulation"),
    ParamDescriptor::rate_hz("Flutter Rate", "FlutRate", 6.0, 30.0, 12.0)
        .with_id(ParamId(1002), "flutter_rate")
        .with_step(0.1)
        .with_group("modulation"),
    ParamDescriptor::new("Flutter Depth", "FlutDep", ParamUnit::None, 0.0, 1.0, 0.1)
        .with_id(ParamId(1003), "flutter_depth")
        .with_group("modulation"),
    ParamDescriptor::new("Dropouts", "Drops", ParamUnit::PerMinute, 0.0, 30.0, 3.0)
        .with_id(ParamId(1004), "dropout_rate")
        .with_step(0.1)
        .with_group("dropout"),
    ParamDescriptor::new("Dropout Depth", "DropDep", ParamUnit::None, 0.0, 1.0, 0.6)
        .with_id(ParamId(1005), "dropout_depth")
        .with_group("dropout"),
    ParamDescriptor::time_ms("Dropout Time", "DropTime", 5.0, 300.0, 40.0)
        .with_id(ParamId(1006), "dropout_time")
        .with_group("dropout"),
    ParamDescriptor::percent("Saturation", "Sat", 25.0)
        .with_id(ParamId(1007), "saturation")
        .with_group("tone"),
    ParamDescriptor::gain_db("Noise", "Hiss", -90.0, -30.0, -60.0)
        .with_id(ParamId(1008), "noise")
        .with_group("noise"),
    ParamDescriptor::gain_db("Hum", "Hum", -90.0, -30.0, -70.0)
        .with_id(ParamId(1009), "hum")
        .with_group("noise"),
    ParamDescriptor::toggle("Hum 50 Hz", "Mains50", false)
        .with_id(ParamId(1010), "hum_50hz")
        .with_group("noise"),
    ParamDescriptor::new("Model LP", "ModelLP", ParamUnit::Kilohertz, 2.0, 20.0, 9.0)
        .with_id(ParamId(1011), "model_lp")
        .with_step(0.1)
        .with_group("tone"),
    ParamDescriptor::gain_db("Model HS", "ModelHS", -12.0, 12.0, 0.0)
        .with_id(ParamId(1012), "model_hs")
        .with_group("tone"),
    ParamDescriptor::gain_db("Tilt", "Tilt", -6.0, 6.0, 0.0)
        .with_id(ParamId(1013), "tilt")
        .with_group("tone"),
    ParamDescriptor::percent("Spread", "Spread", 50.0)
        .with_id(ParamId(1014), "spread")
        .with_step(1.0)
        .with_group("output"),
    ParamDescriptor::percent("Mix", "Mix", 100.0)
        .with_id(ParamId(1015), "mix")
        .with_group("output"),
    ParamDescriptor::gain_db("Output", "Out", -24.0, 24.0, 0.0)
        .with_id(ParamId(1016), "output")
        .with_group("output"),
    ParamDescriptor::toggle("Tape Stop", "Stop", false)
        .with_id(ParamId(1017), "tape_stop")
        .with_group("modulation"),
];

/// Every control of the tape engine, in host units.
///
/// Fields are public and unvalidated; [`GenLoss::set_params`] clamps what it
/// consumes. Use [`ParameterInfo::set_param`] for descriptor-range clamping
/// at the edit site.
///
/// `noise_db` and `hum_db` accept `f32::NEG_INFINITY` for exact silence
/// when written directly.
///
/// [`GenLoss::set_params`]: crate::GenLoss::set_params
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenLossParams {
    /// Wow oscillator rate in Hz.
    pub wow_rate: f32,
    /// Wow depth, 0–1.
    pub wow_depth: f32,
    /// Flutter oscillator rate in Hz.
    pub flutter_rate: f32,
    /// Flutter depth, 0–1.
    pub flutter_depth: f32,
    /// Mean dropout events per minute. 0 disables dropouts.
    pub dropout_rate: f32,
    /// Attenuation at the bottom of a dropout, 0–1.
    pub dropout_depth: f32,
    /// Length of one dropout dip in milliseconds.
    pub dropout_ms: f32,
    /// Saturation amount in percent.
    pub saturation: f32,
    /// Hiss level in dBFS.
    pub noise_db: f32,
    /// Mains hum level in dBFS.
    pub hum_db: f32,
    /// Hum fundamental: 50 Hz when set, 60 Hz otherwise.
    pub hum_50hz: bool,
    /// Model low-pass cutoff in kHz.
    pub model_lp_khz: f32,
    /// Model high-shelf gain at 6 kHz in dB.
    pub model_hs_db: f32,
    /// Tilt gain around 1 kHz in dB (positive = brighter).
    pub tilt_db: f32,
    /// Stereo modulation spread in percent.
    pub spread: f32,
    /// Dry/wet mix in percent (100 = fully wet).
    pub mix: f32,
    /// Output gain in dB.
    pub output_db: f32,
    /// Tape-stop engaged.
    pub tape_stop: bool,
}

impl Default for GenLossParams {
    fn default() -> Self {
        Self {
            wow_rate: 1.0,
            wow_depth: 0.2,
            flutter_rate: 12.0,
            flutter_depth: 0.1,
            dropout_rate: 3.0,
            dropout_depth: 0.6,
            dropout_ms: 40.0,
            saturation: 25.0,
            noise_db: -60.0,
            hum_db: -70.0,
            hum_50hz: false,
            model_lp_khz: 9.0,
            model_hs_db: 0.0,
            tilt_db: 0.0,
            spread: 50.0,
            mix: 100.0,
            output_db: 0.0,
            tape_stop: false,
        }
    }
}

impl GenLossParams {
    /// A fully transparent wet path: no modulation, coloration, dropouts or
    /// noise, cutoff wide open. Only the fixed base delay remains.
    pub fn transparent() -> Self {
        Self {
            wow_depth: 0.0,
            flutter_depth: 0.0,
            dropout_rate: 0.0,
            saturation: 0.0,
            noise_db: f32::NEG_INFINITY,
            hum_db: f32::NEG_INFINITY,
            model_lp_khz: 20.0,
            model_hs_db: 0.0,
            tilt_db: 0.0,
            ..Self::default()
        }
    }

    /// Copy with NaN values replaced by their defaults. Other values,
    /// including infinities, pass through.
    pub fn sanitized(&self) -> Self {
        let mut out = *self;
        for (index, desc) in DESCRIPTORS.iter().enumerate() {
            if self.get_param(index).is_nan() {
                out.set_param(index, desc.default);
            }
        }
        out
    }

    /// Copy with every value clamped to its descriptor range.
    ///
    /// NaN values fall back to the parameter's default.
    pub fn clamped(&self) -> Self {
        let mut out = self.sanitized();
        for index in 0..PARAM_COUNT {
            let value = out.get_param(index);
            out.set_param(index, value);
        }
        out
    }
}

#[inline]
fn flag(value: f32) -> bool {
    value >= 0.5
}

#[inline]
fn flag_value(on: bool) -> f32 {
    if on { 1.0 } else { 0.0 }
}

impl ParameterInfo for GenLossParams {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        DESCRIPTORS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.wow_rate,
            1 => self.wow_depth,
            2 => self.flutter_rate,
            3 => self.flutter_depth,
            4 => self.dropout_rate,
            5 => self.dropout_depth,
            6 => self.dropout_ms,
            7 => self.saturation,
            8 => self.noise_db,
            9 => self.hum_db,
            10 => flag_value(self.hum_50hz),
            11 => self.model_lp_khz,
            12 => self.model_hs_db,
            13 => self.tilt_db,
            14 => self.spread,
            15 => self.mix,
            16 => self.output_db,
            17 => flag_value(self.tape_stop),
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        let Some(desc) = DESCRIPTORS.get(index) else {
            return;
        };
        let value = desc.clamp(value);
        match index {
            0 => self.wow_rate = value,
            1 => self.wow_depth = value,
            2 => self.flutter_rate = value,
            3 => self.flutter_depth = value,
            4 => self.dropout_rate = value,
            5 => self.dropout_depth = value,
            6 => self.dropout_ms = value,
            7 => self.saturation = value,
            8 => self.noise_db = value,
            9 => self.hum_db = value,
            10 => self.hum_50hz = flag(value),
            11 => self.model_lp_khz = value,
            12 => self.model_hs_db = value,
            13 => self.tilt_db = value,
            14 => self.spread = value,
            15 => self.mix = value,
            16 => self.output_db = value,
            17 => self.tape_stop = flag(value),
            _ => {}
        }
    }
}
