//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::harness::Scenario;

/// booker-probe: test harness for the restful-booker service
///
/// Runs booking scenarios against the service, recording every HTTP call
/// each scenario makes, and writes an HTML report per scenario.
#[derive(Debug, Parser)]
#[command(name = "booker-probe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the booking service
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Account name for the auth token
    #[arg(long)]
    pub username: Option<String>,

    /// Account password for the auth token
    #[arg(long)]
    pub password: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Directory for per-scenario HTML reports (reports are skipped if unset)
    #[arg(long = "report-dir")]
    pub report_dir: Option<PathBuf>,

    /// Scenario to run (can be specified multiple times; default: all)
    #[arg(long = "case", value_enum, value_name = "SCENARIO")]
    pub cases: Vec<ScenarioArg>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for booker-probe
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "booker-probe.toml")]
        output: PathBuf,
    },
}

/// Scenario argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioArg {
    /// `GET /ping`
    #[value(name = "health_check")]
    HealthCheck,
    /// Create, read, update, verify and delete a booking
    #[value(name = "crud_flow")]
    CrudFlow,
    /// Create, patch, verify and delete a booking
    #[value(name = "partial_update")]
    PartialUpdate,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::HealthCheck => Self::HealthCheck,
            ScenarioArg::CrudFlow => Self::CrudFlow,
            ScenarioArg::PartialUpdate => Self::PartialUpdate,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
