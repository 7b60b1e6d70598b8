//! Validated configuration after merging CLI, environment and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::booking::Credentials;
use crate::harness::{Expectations, Scenario, StatusSet};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::{ExpectSection, TomlConfig};

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args, an environment
/// lookup and an optional TOML config, or [`ValidatedConfig::load`] to read
/// the process environment and the config file named on the command line.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Base URL of the booking service
    pub base_url: Url,

    /// Credentials for the auth token
    pub credentials: Credentials,

    /// Request timeout
    pub timeout: Duration,

    /// Directory for per-scenario reports.
    /// If `None`, reports are skipped.
    pub report_dir: Option<PathBuf>,

    /// Expected status codes
    pub expectations: Expectations,

    /// Scenarios to run, in order
    pub scenarios: Vec<Scenario>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report_dir_str = self
            .report_dir
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());
        let scenarios: Vec<&str> = self.scenarios.iter().map(|s| s.name()).collect();

        write!(
            f,
            "Config {{ base_url: {}, username: {}, timeout: {}s, report_dir: {}, scenarios: [{}] }}",
            self.base_url,
            self.credentials.username,
            self.timeout.as_secs(),
            report_dir_str,
            scenarios.join(", "),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments, an environment
    /// lookup and an optional TOML config.
    ///
    /// Priority per setting: CLI > environment > TOML > default. `env` is
    /// queried with the names in [`defaults::env`]; empty values count as
    /// unset.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The base URL is invalid
    /// - The timeout is zero
    /// - An expected status list is empty or holds a code outside 100..=599
    pub fn from_raw(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let lookup = |name: &str| env(name).filter(|value| !value.is_empty());
        let target = toml.map(|t| &t.target);

        let base_url = Self::resolve_base_url(
            cli.base_url
                .clone()
                .or_else(|| lookup(defaults::env::BASE_URL))
                .or_else(|| target.and_then(|t| t.base_url.clone())),
        )?;

        let username = cli
            .username
            .clone()
            .or_else(|| lookup(defaults::env::USERNAME))
            .or_else(|| target.and_then(|t| t.username.clone()))
            .unwrap_or_else(|| defaults::USERNAME.to_string());

        let password = cli
            .password
            .clone()
            .or_else(|| lookup(defaults::env::PASSWORD))
            .or_else(|| target.and_then(|t| t.password.clone()))
            .unwrap_or_else(|| defaults::PASSWORD.to_string());

        let timeout = Self::resolve_timeout(cli, toml)?;

        // Resolve report directory (CLI takes precedence over TOML)
        let report_dir = cli
            .report_dir
            .clone()
            .or_else(|| toml.and_then(|t| t.report.dir.clone()));

        let expectations = Self::resolve_expectations(toml.map(|t| &t.expect))?;

        Ok(Self {
            base_url,
            credentials: Credentials::new(username, password),
            timeout,
            report_dir,
            expectations,
            scenarios: Self::resolve_scenarios(cli),
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI, the process environment and
    /// optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref(), |name| std::env::var(name).ok())
    }

    fn resolve_base_url(value: Option<String>) -> Result<Url, ConfigError> {
        let url_str = value.as_deref().unwrap_or(defaults::BASE_URL);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(url)
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.target.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_expectations(expect: Option<&ExpectSection>) -> Result<Expectations, ConfigError> {
        let unset = ExpectSection::default();
        let expect = expect.unwrap_or(&unset);

        Ok(Expectations {
            auth: status_set(field::AUTH, expect.auth.as_deref(), defaults::EXPECT_AUTH)?,
            health: status_set(field::HEALTH, expect.health.as_deref(), defaults::EXPECT_HEALTH)?,
            create: status_set(field::CREATE, expect.create.as_deref(), defaults::EXPECT_CREATE)?,
            read: status_set(field::READ, expect.read.as_deref(), defaults::EXPECT_READ)?,
            update: status_set(field::UPDATE, expect.update.as_deref(), defaults::EXPECT_UPDATE)?,
            partial_update: status_set(
                field::PARTIAL_UPDATE,
                expect.partial_update.as_deref(),
                defaults::EXPECT_PARTIAL_UPDATE,
            )?,
            delete: status_set(field::DELETE, expect.delete.as_deref(), defaults::EXPECT_DELETE)?,
        })
    }

    fn resolve_scenarios(cli: &Cli) -> Vec<Scenario> {
        if cli.cases.is_empty() {
            return Scenario::ALL.to_vec();
        }

        let mut scenarios: Vec<Scenario> = Vec::with_capacity(cli.cases.len());
        for scenario in cli.cases.iter().copied().map(Scenario::from) {
            if !scenarios.contains(&scenario) {
                scenarios.push(scenario);
            }
        }
        scenarios
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn status_set(
    field: &'static str,
    codes: Option<&[u16]>,
    default: &[u16],
) -> Result<StatusSet, ConfigError> {
    let codes = codes.unwrap_or(default);

    if codes.is_empty() {
        return Err(ConfigError::EmptyStatusSet { field });
    }

    if let Some(&code) = codes.iter().find(|code| !(100..=599).contains(*code)) {
        return Err(ConfigError::InvalidStatus { field, code });
    }

    Ok(StatusSet::new(codes.iter().copied()))
}
