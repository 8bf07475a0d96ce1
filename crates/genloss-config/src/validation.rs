//! Parameter name and value validation.
//!
//! Names resolve against the engine's descriptor table: the stable
//! `string_id` (`dropout_rate`), the display name (`Dropouts`) or the short
//! name, case-insensitively, with spaces and dashes treated as underscores.
//!
//! # Example
//!
//! ```rust
//! use genloss_config::validation::{parse_param_value, validate_param};
//!
//! let value = parse_param_value("noise", "-48dB").unwrap();
//! let index = validate_param("noise", value).unwrap();
//! assert_eq!(index, 8);
//! ```

use std::collections::BTreeMap;

use genloss_core::{ParamDescriptor, ParamUnit, ParameterInfo};
use genloss_effects::{DESCRIPTORS, GenLossParams};
use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown parameter name.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Invalid parameter format.
    #[error("invalid format for parameter '{param}': {reason}")]
    InvalidFormat {
        /// Name of the parameter.
        param: String,
        /// Description of the format error.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Lowercases and maps spaces and dashes to underscores.
fn normalize_param_name(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Resolves a parameter name to its index in [`DESCRIPTORS`].
pub fn find_param(name: &str) -> Option<usize> {
    let normalized = normalize_param_name(name);
    DESCRIPTORS
        .iter()
        .position(|desc| desc.string_id == normalized)
        .or_else(|| GenLossParams::default().find_param_by_name(name.trim()))
}

/// Descriptor for a parameter name.
pub fn descriptor(name: &str) -> Option<ParamDescriptor> {
    find_param(name).and_then(|index| DESCRIPTORS.get(index).copied())
}

/// Checks that `name` exists and `value` lies in its range.
///
/// Returns the parameter index on success.
pub fn validate_param(name: &str, value: f32) -> ValidationResult<usize> {
    let index =
        find_param(name).ok_or_else(|| ValidationError::UnknownParameter(name.to_string()))?;
    let desc = DESCRIPTORS[index];
    if desc.contains(value) {
        Ok(index)
    } else {
        Err(ValidationError::OutOfRange {
            param: name.to_string(),
            value,
            min: desc.min,
            max: desc.max,
        })
    }
}

/// Validates every entry of a parameter map, collecting all failures.
pub fn validate_params(params: &BTreeMap<String, f32>) -> ValidationResult<()> {
    let mut errors: Vec<ValidationError> = params
        .iter()
        .filter_map(|(name, &value)| validate_param(name, value).err())
        .collect();

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Parses a parameter value from a string.
///
/// Accepts plain numbers and unit-suffixed values (`-48dB`, `0.5Hz`,
/// `12kHz`, `40ms`, `25%`, `6/min`). Toggle parameters also accept
/// `on`/`off`/`true`/`false`. A `kHz` value given for a parameter stored in
/// Hz is scaled, and vice versa.
pub fn parse_param_value(param_name: &str, value_str: &str) -> ValidationResult<f32> {
    let s = value_str.trim();
    let unit = descriptor(param_name).map(|desc| (desc.unit, desc.is_toggle()));

    if let Some((_, true)) = unit {
        match s.to_lowercase().as_str() {
            "on" | "true" | "yes" => return Ok(1.0),
            "off" | "false" | "no" => return Ok(0.0),
            _ => {}
        }
    }

    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|_| ValidationError::InvalidFormat {
                param: param_name.to_string(),
                reason: format!("cannot parse '{}' as number", v.trim()),
            })
    };

    let lower = s.to_lowercase();
    if let Some(v) = lower.strip_suffix("khz") {
        let khz = parse(v)?;
        Ok(match unit {
            Some((ParamUnit::Hertz, _)) => khz * 1000.0,
            _ => khz,
        })
    } else if let Some(v) = lower.strip_suffix("hz") {
        let hz = parse(v)?;
        Ok(match unit {
            Some((ParamUnit::Kilohertz, _)) => hz / 1000.0,
            _ => hz,
        })
    } else if let Some(v) = lower.strip_suffix("db") {
        parse(v)
    } else if let Some(v) = lower.strip_suffix("ms") {
        parse(v)
    } else if let Some(v) = lower.strip_suffix('%') {
        parse(v)
    } else if let Some(v) = lower.strip_suffix("/min") {
        parse(v)
    } else {
        parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_by_any_form() {
        assert_eq!(find_param("dropout_rate"), Some(4));
        assert_eq!(find_param("Dropouts"), Some(4));
        assert_eq!(find_param("dropout-time"), Some(6));
        assert_eq!(find_param("Model LP"), Some(11));
        assert_eq!(find_param("tape_stop"), Some(17));
        assert_eq!(find_param("warble"), None);
    }

    #[test]
    fn range_checks_use_descriptors() {
        assert_eq!(validate_param("noise", -48.0), Ok(8));
        assert_eq!(
            validate_param("noise", 0.0),
            Err(ValidationError::OutOfRange {
                param: "noise".to_string(),
                value: 0.0,
                min: -90.0,
                max: -30.0,
            })
        );
        assert!(matches!(
            validate_param("noise", f32::NAN),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert_eq!(
            validate_param("warble", 1.0),
            Err(ValidationError::UnknownParameter("warble".to_string()))
        );
    }

    #[test]
    fn map_validation_collects_every_failure() {
        let mut params = BTreeMap::new();
        params.insert("wow_rate".to_string(), 2.0);
        assert_eq!(validate_params(&params), Ok(()));

        params.insert("mix".to_string(), 150.0);
        assert!(matches!(
            validate_params(&params),
            Err(ValidationError::OutOfRange { .. })
        ));

        params.insert("warble".to_string(), 1.0);
        match validate_params(&params) {
            Err(ValidationError::Multiple(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected Multiple, got {other:?}"),
        }
    }

    #[test]
    fn values_parse_with_units() {
        assert_eq!(parse_param_value("noise", "-48dB"), Ok(-48.0));
        assert_eq!(parse_param_value("wow_rate", "0.5 Hz"), Ok(0.5));
        assert_eq!(parse_param_value("dropout_time", "40ms"), Ok(40.0));
        assert_eq!(parse_param_value("mix", "25%"), Ok(25.0));
        assert_eq!(parse_param_value("dropout_rate", "6/min"), Ok(6.0));
        assert_eq!(parse_param_value("saturation", "12.5"), Ok(12.5));
    }

    #[test]
    fn frequency_units_convert() {
        assert_eq!(parse_param_value("model_lp", "12kHz"), Ok(12.0));
        assert_eq!(parse_param_value("model_lp", "8000Hz"), Ok(8.0));
        assert_eq!(parse_param_value("flutter_rate", "0.5kHz"), Ok(500.0));
    }

    #[test]
    fn toggles_accept_words() {
        assert_eq!(parse_param_value("tape_stop", "on"), Ok(1.0));
        assert_eq!(parse_param_value("hum_50hz", "OFF"), Ok(0.0));
        assert_eq!(parse_param_value("hum_50hz", "1"), Ok(1.0));
    }

    #[test]
    fn garbage_is_invalid_format() {
        assert!(matches!(
            parse_param_value("mix", "lots"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_param_value("noise", "loud dB"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
