//! Presets and parameter validation for the genloss tape engine.
//!
//! - **Presets**: named TOML snapshots of [`GenLossParams`], keyed by each
//!   parameter's stable string id
//! - **Validation**: name lookup and range checks against the engine's
//!   descriptor table, plus unit-aware value parsing
//! - **Factory presets**: a handful of decks compiled into the library
//!
//! # Example
//!
//! ```rust,no_run
//! use genloss_config::{Preset, load_preset};
//!
//! let preset = load_preset("cassette").unwrap();
//! let params = preset.to_params().unwrap();
//!
//! Preset::from_params("My Deck", &params)
//!     .with_description("Cassette with my tweaks")
//!     .save("presets/my_deck.toml")
//!     .unwrap();
//! ```

use std::path::Path;

mod error;
mod preset;

/// Parameter validation and value parsing.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_presets, get_factory_preset, is_factory_preset,
};
pub use genloss_effects::GenLossParams;
pub use preset::Preset;
pub use validation::{
    ValidationError, ValidationResult, find_param, parse_param_value, validate_param,
    validate_params,
};

/// Resolves a preset by factory name, falling back to a TOML file path.
pub fn load_preset(name_or_path: &str) -> Result<Preset, ConfigError> {
    if let Some(preset) = get_factory_preset(name_or_path) {
        return Ok(preset);
    }

    let path = Path::new(name_or_path);
    if path.is_file() {
        Preset::load(path)
    } else {
        Err(ConfigError::PresetNotFound(name_or_path.to_string()))
    }
}
