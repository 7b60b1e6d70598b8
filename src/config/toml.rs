//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments and the environment.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Target service configuration
    #[serde(default)]
    pub target: TargetSection,

    /// Report output configuration
    #[serde(default)]
    pub report: ReportSection,

    /// Expected status codes per operation
    #[serde(default)]
    pub expect: ExpectSection,
}

/// Target service section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSection {
    /// Base URL of the booking service
    pub base_url: Option<String>,

    /// Account name for `POST /auth`
    pub username: Option<String>,

    /// Account password for `POST /auth`
    pub password: Option<String>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,
}

/// Report output section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportSection {
    /// Directory for per-scenario reports
    pub dir: Option<PathBuf>,
}

/// Expected status codes section. Each entry replaces the built-in default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpectSection {
    /// `POST /auth`
    pub auth: Option<Vec<u16>>,
    /// `GET /ping`
    pub health: Option<Vec<u16>>,
    /// `POST /booking`
    pub create: Option<Vec<u16>>,
    /// `GET /booking/{id}`
    pub read: Option<Vec<u16>>,
    /// `PUT /booking/{id}`
    pub update: Option<Vec<u16>>,
    /// `PATCH /booking/{id}`
    pub partial_update: Option<Vec<u16>>,
    /// `DELETE /booking/{id}`
    pub delete: Option<Vec<u16>>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# booker-probe configuration file
#
# Priority: command line > environment (BASE_URL, BOOKER_USER, BOOKER_PASS)
# > this file > built-in defaults.

[target]
# Base URL of the booking service
base_url = "https://restful-booker.herokuapp.com"

# Credentials for POST /auth
# username = "admin"
# password = "password123"

# Request timeout in seconds (default: 30)
# timeout = 30

[report]
# Directory for per-scenario HTML reports and call logs.
# Reports are skipped when unset.
# dir = "reports"

[expect]
# Accepted status codes per operation. The service is not consistent
# about which 2xx code a write returns, hence lists.
# auth = [200]
# health = [201]
# create = [200]
# read = [200]
# update = [200, 201]
# partial_update = [200]
# delete = [200, 201, 204]
"#
    .to_string()
}
