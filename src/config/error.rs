//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid base URL provided.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid duration value (zero or too large).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Expected status code outside `100..=599`.
    #[error("Invalid status code {code} in {field}: expected 100-599")]
    InvalidStatus {
        /// Name of the expectation
        field: &'static str,
        /// The invalid code
        code: u16,
    },

    /// Expectation with no acceptable status code.
    #[error("Empty status list in {field}: at least one code is required")]
    EmptyStatusSet {
        /// Name of the expectation
        field: &'static str,
    },
}

/// Names of the `[expect]` entries, as used in error messages.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// `expect.auth`
    pub const AUTH: &str = "expect.auth";
    /// `expect.health`
    pub const HEALTH: &str = "expect.health";
    /// `expect.create`
    pub const CREATE: &str = "expect.create";
    /// `expect.read`
    pub const READ: &str = "expect.read";
    /// `expect.update`
    pub const UPDATE: &str = "expect.update";
    /// `expect.partial_update`
    pub const PARTIAL_UPDATE: &str = "expect.partial_update";
    /// `expect.delete`
    pub const DELETE: &str = "expect.delete";
}
