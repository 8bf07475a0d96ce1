//! Preset file format and operations.

use std::collections::BTreeMap;
use std::path::Path;

use genloss_core::ParameterInfo;
use genloss_effects::{DESCRIPTORS, GenLossParams};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::validation::{self, ValidationError};

/// A named parameter snapshot for the tape engine.
///
/// Parameters are keyed by their stable string id. Keys left out take the
/// engine default when the preset is applied.
///
/// # TOML Format
///
/// ```toml
/// name = "Cassette"
/// description = "Consumer deck with a tired capstan"
/// sample_rate = 48000
///
/// [params]
/// wow_depth = 0.35
/// flutter_depth = 0.2
/// model_lp = 11.0
/// noise = -52.0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate the preset was tuned at. Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,

    /// Parameter values keyed by string id.
    #[serde(default)]
    pub params: BTreeMap<String, f32>,
}

impl Preset {
    /// Create a new empty preset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: None,
            params: BTreeMap::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate hint.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = Some(sample_rate);
        self
    }

    /// Set one parameter value.
    pub fn with_param(mut self, key: impl Into<String>, value: f32) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Captures every parameter of `params` under its string id.
    pub fn from_params(name: impl Into<String>, params: &GenLossParams) -> Self {
        let values = DESCRIPTORS
            .iter()
            .enumerate()
            .map(|(index, desc)| (desc.string_id.to_string(), params.get_param(index)))
            .collect();
        Self {
            params: values,
            ..Self::new(name)
        }
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Looks up a value by any accepted parameter name.
    pub fn get(&self, name: &str) -> Option<f32> {
        let index = validation::find_param(name)?;
        self.params
            .iter()
            .find(|(key, _)| validation::find_param(key) == Some(index))
            .map(|(_, &value)| value)
    }

    /// Checks every key and range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_params(&self.params)
    }

    /// Writes this preset's values over `params`.
    ///
    /// Values are clamped to their ranges; an unknown key is an error and
    /// leaves `params` untouched.
    pub fn apply_to(&self, params: &mut GenLossParams) -> Result<(), ConfigError> {
        let resolved = self
            .params
            .iter()
            .map(|(key, &value)| {
                validation::find_param(key)
                    .map(|index| (index, value))
                    .ok_or_else(|| ConfigError::UnknownParameter(key.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (index, value) in resolved {
            params.set_param(index, value);
        }
        Ok(())
    }

    /// Builds a full parameter set: defaults overlaid with this preset.
    pub fn to_params(&self) -> Result<GenLossParams, ConfigError> {
        let mut params = GenLossParams::default();
        self.apply_to(&mut params)?;
        Ok(params)
    }

    /// Number of stored parameter values.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True if the preset stores no values.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_builder() {
        let preset = Preset::new("Reel")
            .with_description("Quarter-inch at 7.5 ips")
            .with_sample_rate(44100)
            .with_param("wow_depth", 0.1)
            .with_param("noise", -66.0);

        assert_eq!(preset.name, "Reel");
        assert_eq!(preset.description.as_deref(), Some("Quarter-inch at 7.5 ips"));
        assert_eq!(preset.sample_rate, Some(44100));
        assert_eq!(preset.len(), 2);
    }

    #[test]
    fn test_preset_from_toml() {
        let toml = r#"
name = "Test"
description = "A test preset"
sample_rate = 44100

[params]
wow_rate = 0.5
dropout_rate = 12.0
tape_stop = 1.0
"#;

        let preset = Preset::from_toml(toml).unwrap();
        assert_eq!(preset.name, "Test");
        assert_eq!(preset.sample_rate, Some(44100));
        assert_eq!(preset.get("wow_rate"), Some(0.5));
        assert_eq!(preset.get("Dropouts"), Some(12.0));

        let params = preset.to_params().unwrap();
        assert_eq!(params.wow_rate, 0.5);
        assert_eq!(params.dropout_rate, 12.0);
        assert!(params.tape_stop);
        assert_eq!(params.mix, GenLossParams::default().mix);
    }

    #[test]
    fn test_minimal_toml() {
        let preset = Preset::from_toml(r#"name = "Minimal""#).unwrap();
        assert!(preset.description.is_none());
        assert!(preset.sample_rate.is_none());
        assert!(preset.is_empty());
        assert_eq!(preset.to_params().unwrap(), GenLossParams::default());
    }

    #[test]
    fn test_preset_to_toml() {
        let toml = Preset::new("Test")
            .with_description("Test description")
            .with_param("saturation", 40.0)
            .to_toml()
            .unwrap();

        assert!(toml.contains("name = \"Test\""));
        assert!(toml.contains("description = \"Test description\""));
        assert!(toml.contains("[params]"));
        assert!(toml.contains("saturation = 40.0"));
        assert!(!toml.contains("sample_rate"));
    }

    #[test]
    fn test_capture_covers_every_parameter() {
        let params = GenLossParams {
            wow_depth: 0.7,
            hum_50hz: true,
            ..GenLossParams::default()
        };
        let preset = Preset::from_params("Captured", &params);
        assert_eq!(preset.len(), DESCRIPTORS.len());
        assert_eq!(preset.get("wow_depth"), Some(0.7));
        assert_eq!(preset.get("hum_50hz"), Some(1.0));
        assert_eq!(preset.to_params().unwrap(), params);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let preset = Preset::new("Bad").with_param("warble", 1.0);
        assert!(matches!(
            preset.to_params(),
            Err(ConfigError::UnknownParameter(ref key)) if key == "warble"
        ));
        assert!(preset.validate().is_err());
    }

    #[test]
    fn test_apply_clamps_values() {
        let preset = Preset::new("Hot").with_param("output", 60.0);
        assert!(preset.validate().is_err());
        assert_eq!(preset.to_params().unwrap().output_db, 24.0);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Preset::from_toml("name = "),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
