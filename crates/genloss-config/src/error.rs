//! Error types for preset and configuration operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, saving or applying presets.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a parent directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// No factory preset or file matched the given name
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// A parameter key that the engine does not expose
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// Validation errors
    #[error("validation failed: {0}")]
    Validation(#[from] crate::validation::ValidationError),
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn io_variants_name_the_path() {
        let read = ConfigError::read_file("/a/b.toml", mock_io_err()).to_string();
        assert!(read.contains("failed to read file") && read.contains("/a/b.toml"), "got: {read}");

        let write = ConfigError::write_file("/c/d.toml", mock_io_err()).to_string();
        assert!(write.contains("failed to write file") && write.contains("/c/d.toml"), "got: {write}");

        let dir = ConfigError::create_dir("/e", mock_io_err()).to_string();
        assert!(dir.contains("failed to create directory"), "got: {dir}");
    }

    #[test]
    fn io_variants_expose_source() {
        assert!(ConfigError::read_file("/x", mock_io_err()).source().is_some());
        assert!(ConfigError::write_file("/x", mock_io_err()).source().is_some());
        assert!(ConfigError::create_dir("/x", mock_io_err()).source().is_some());
    }

    #[test]
    fn lookup_errors_display() {
        assert_eq!(
            ConfigError::PresetNotFound("reel".to_string()).to_string(),
            "preset not found: reel"
        );
        assert_eq!(
            ConfigError::UnknownParameter("warble".to_string()).to_string(),
            "unknown parameter: warble"
        );
    }

    #[test]
    fn validation_converts() {
        let err: ConfigError = ValidationError::UnknownParameter("warble".to_string()).into();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().starts_with("validation failed"));
    }
}
