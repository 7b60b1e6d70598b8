//! Configuration layer for booker-probe.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **Environment variables** - `BASE_URL`, `BOOKER_USER`, `BOOKER_PASS`
//! 3. **TOML config file** - Values from the configuration file
//! 4. **Built-in defaults** - Hardcoded default values
//!
//! Only the target URL and credentials read the environment. An empty
//! variable counts as unset.
//!
//! # TOML-Only Options
//!
//! Expected status codes (`[expect]`) are only configurable from the file.
//! Each list replaces the built-in default for that operation entirely.
//!
//! # Scenario Selection
//!
//! `--case` may be repeated; duplicates are dropped and the given order is
//! kept. Without `--case` every bundled scenario runs.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, ScenarioArg};
pub use error::{ConfigError, field};
pub use toml::{ExpectSection, ReportSection, TargetSection, TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
