//! Parameter introspection system for discoverable parameters.
//!
//! Index-based parameter access lets hosts, preset files and the CLI address
//! engine parameters without hard-coding field names:
//!
//! - **Preset systems**: Save and restore parameter state by `string_id`
//! - **CLIs**: `--param dropout_rate=12` resolves through [`ParameterInfo::find_param_by_name`]
//! - **Control threads**: Atomic stores indexed like the engine
//!
//! # Example
//!
//! ```rust
//! use genloss_core::{ParameterInfo, ParamDescriptor, ParamUnit, ParamId};
//!
//! struct SimpleGain {
//!     gain_db: f32,
//! }
//!
//! impl ParameterInfo for SimpleGain {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::gain_db("Gain", "Gain", -60.0, 12.0, 0.0)
//!                 .with_id(ParamId(100), "gain_level")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.gain_db,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.gain_db = value.clamp(-60.0, 12.0);
//!         }
//!     }
//! }
//!
//! let mut gain = SimpleGain { gain_db: 0.0 };
//! let idx = gain.find_param_by_name("gain_level").unwrap();
//! gain.set_param(idx, 100.0);
//! assert_eq!(gain.get_param(idx), 12.0);
//! ```
//!
//! # no_std Support
//!
//! This module is fully `no_std` compatible with no heap allocations required.

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags for host communication.
///
/// # Example
///
/// ```rust
/// use genloss_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::STEPPED));
/// assert!(!flags.contains(ParamFlags::HIDDEN));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter (default for all params).
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps (booleans, selectors).
    pub const STEPPED: Self = Self(1 << 1);
    /// Parameter should be hidden from generic host UI.
    pub const HIDDEN: Self = Self(1 << 2);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Trait for types that expose introspectable parameters.
///
/// # Parameter Indexing
///
/// Parameters are accessed by zero-based index, stable for the lifetime of
/// the implementing type.
///
/// # Thread Safety
///
/// This trait does not require thread safety. Cross-thread access goes
/// through an atomic store that snapshots into the implementor once per block.
pub trait ParameterInfo {
    /// Returns the number of parameters.
    fn param_count(&self) -> usize;

    /// Returns the descriptor for the parameter at `index`, or `None` if
    /// out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Gets the current value of the parameter at `index`.
    ///
    /// Returns `0.0` for out-of-range indices.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the parameter at `index`, clamped to its descriptor range.
    ///
    /// Out-of-range indices are ignored.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive).
    ///
    /// Matches [`ParamDescriptor::name`], [`ParamDescriptor::short_name`] and
    /// [`ParamDescriptor::string_id`].
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Returns the stable [`ParamId`] for the parameter at `index`.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }

    /// Finds a parameter index by its stable [`ParamId`].
    ///
    /// Scans all parameters (O(n)); for setup paths, not audio.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

/// Describes a single parameter's metadata for display and validation.
///
/// The `short_name` field should be 8 characters or less for compact
/// displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Wow Rate").
    pub name: &'static str,

    /// Short name, max 8 characters (e.g., "WowRate").
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Default value.
    pub default: f32,

    /// Recommended step increment for encoder-based control.
    pub step: f32,

    /// Stable numeric ID.
    pub id: ParamId,

    /// Human-readable stable ID used as the preset key (e.g., `"wow_rate"`).
    pub string_id: &'static str,

    /// Capability flags.
    pub flags: ParamFlags,

    /// Parameter group (e.g., `"modulation"`, `"tone"`).
    pub group: &'static str,
}

impl ParamDescriptor {
    /// Generic descriptor with the given unit and range.
    pub const fn new(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
            group: "",
        }
    }

    /// Gain/level parameter in decibels.
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::new(name, short_name, ParamUnit::Decibels, min, max, default).with_step(0.1)
    }

    /// Time parameter in milliseconds.
    pub const fn time_ms(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::new(name, short_name, ParamUnit::Milliseconds, min, max, default).with_step(1.0)
    }

    /// Oscillator rate in Hz.
    pub const fn rate_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::new(name, short_name, ParamUnit::Hertz, min, max, default)
    }

    /// Percentage parameter (0–100).
    pub const fn percent(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self::new(name, short_name, ParamUnit::Percent, 0.0, 100.0, default).with_step(0.1)
    }

    /// On/off switch stored as 0.0 / 1.0.
    pub const fn toggle(name: &'static str, short_name: &'static str, default: bool) -> Self {
        let default = if default { 1.0 } else { 0.0 };
        Self::new(name, short_name, ParamUnit::None, 0.0, 1.0, default)
            .with_step(1.0)
            .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED))
    }

    /// Sets the stable parameter ID and string ID.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the step size.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Sets the parameter flags.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the parameter group.
    pub const fn with_group(mut self, group: &'static str) -> Self {
        self.group = group;
        self
    }

    /// Returns `true` for stepped on/off parameters.
    pub const fn is_toggle(&self) -> bool {
        self.flags.contains(ParamFlags::STEPPED) && self.min == 0.0 && self.max == 1.0
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use genloss_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::gain_db("Gain", "Gain", -60.0, 12.0, 0.0);
    /// assert_eq!(desc.clamp(-100.0), -60.0);
    /// assert_eq!(desc.clamp(100.0), 12.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Returns `true` if `value` lies within `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Converts a plain value to the normalized range (0.0 to 1.0).
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        (value - self.min) / range
    }

    /// Converts a normalized value (0.0 to 1.0) to the plain range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized * (self.max - self.min)
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels (dB).
    Decibels,
    /// Hertz (Hz).
    Hertz,
    /// Kilohertz (kHz).
    Kilohertz,
    /// Milliseconds (ms).
    Milliseconds,
    /// Percentage (%).
    Percent,
    /// Events per minute.
    PerMinute,
    /// Unitless value.
    None,
}

impl ParamUnit {
    /// Display suffix including a leading space where appropriate.
    pub const fn suffix(self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Kilohertz => " kHz",
            ParamUnit::Milliseconds => " ms",
            ParamUnit::Percent => "%",
            ParamUnit::PerMinute => " /min",
            ParamUnit::None => "",
        }
    }
}
