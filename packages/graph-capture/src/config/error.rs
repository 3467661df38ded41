//! Configuration error types

use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required text field is empty
    #[error("Field '{field}' must not be empty. {hint}")]
    EmptyField { field: String, hint: String },

    /// Two fields hold values that cannot coexist
    #[error("Configuration conflict: {issue}. Fix: {fix}")]
    Conflict { issue: String, fix: String },

    /// Missing version field in YAML
    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// Unknown assign policy name
    #[error("Unknown assign policy '{0}'. Valid policies: copy_propagate, materialize_identity")]
    UnknownPolicy(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create an empty field error with a hint
    pub fn empty_field(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::EmptyField {
            field: field.into(),
            hint: hint.into(),
        }
    }
}
