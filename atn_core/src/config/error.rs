// src/config/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building components from declarative configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown {protocol} component type '{kind}'")]
    UnknownComponentType { protocol: &'static str, kind: String },

    #[error("{protocol} component type '{kind}' is already registered")]
    DuplicateRegistration { protocol: &'static str, kind: String },

    #[error("Invalid regular expression '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid value for attribute '{attribute}': {reason}")]
    InvalidAttribute { attribute: String, reason: String },

    #[error("Failed to read configuration file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported configuration format for '{}' (expected .toml or .json)", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("TOML decode error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub fn invalid_attribute(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidAttribute {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    /// Log code matching this error
    pub fn code(&self) -> atn_support::Code {
        use atn_support::logging::codes::config;
        match self {
            ConfigError::UnknownComponentType { .. } => config::UNKNOWN_COMPONENT_TYPE,
            ConfigError::DuplicateRegistration { .. } => config::DUPLICATE_REGISTRATION,
            ConfigError::InvalidPattern { .. } => config::INVALID_PATTERN,
            ConfigError::InvalidAttribute { .. } => config::INVALID_ATTRIBUTE,
            ConfigError::Io { .. }
            | ConfigError::UnsupportedFormat { .. }
            | ConfigError::Toml(_)
            | ConfigError::Json(_) => config::DOCUMENT_DECODE_FAILURE,
        }
    }
}
