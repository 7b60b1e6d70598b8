//! Application execution logic.
//!
//! Runs the configured scenarios against the booking service, prints the
//! call transcript of every failed case, and writes the report index.

use thiserror::Error;

use booker_probe::config::ValidatedConfig;
use booker_probe::harness::{CaseOutcome, Harness};
use booker_probe::report::{CaseSummary, DirectorySink, render_text};
use booker_probe::transport::{HttpClient, ReqwestClient};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// At least one case failed.
    #[error("{failed} of {total} cases failed")]
    CasesFailed {
        /// Number of failed cases
        failed: usize,
        /// Number of cases run
        total: usize,
    },
}

/// Executes the configured scenarios over a reqwest transport.
///
/// # Errors
///
/// Returns [`RunError::CasesFailed`] if any case failed.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it talks to the live
/// service; [`run_scenarios`] carries the logic.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: &ValidatedConfig) -> Result<(), RunError> {
    let transport = ReqwestClient::with_timeout(config.timeout);
    run_scenarios(transport, config).await.map(|_| ())
}

/// Runs every configured scenario in order through `transport`.
///
/// Returns the summary of each case. Report files and the index are
/// written when a report directory is configured; failures to write them
/// are logged and do not affect the result.
///
/// # Errors
///
/// Returns [`RunError::CasesFailed`] if any case failed.
pub async fn run_scenarios<H: HttpClient>(
    transport: H,
    config: &ValidatedConfig,
) -> Result<Vec<CaseSummary>, RunError> {
    let sink = config.report_dir.as_ref().map(DirectorySink::new);

    let mut harness = Harness::new(
        transport,
        config.base_url.clone(),
        config.credentials.clone(),
    )
    .with_expectations(config.expectations.clone());

    if let Some(ref sink) = sink {
        tracing::info!("Reports enabled: {}", sink.dir().display());
        harness = harness.with_sink(sink.clone());
    }

    let mut summaries = Vec::with_capacity(config.scenarios.len());
    for &scenario in &config.scenarios {
        let outcome = harness.run_scenario(scenario).await;
        print_failure(&outcome);
        summaries.push(outcome.summary());
    }

    if let Some(ref sink) = sink {
        match sink.write_index(&summaries) {
            Ok(path) => tracing::info!("Report index written to {}", path.display()),
            Err(e) => tracing::warn!("Failed to write report index: {e}"),
        }
    }

    let total = summaries.len();
    let failed = summaries.iter().filter(|s| !s.passed).count();
    tracing::info!(passed = total - failed, failed, "Run finished");

    if failed > 0 {
        return Err(RunError::CasesFailed { failed, total });
    }
    Ok(summaries)
}

/// Prints the transcript of a failed case to stderr.
fn print_failure(outcome: &CaseOutcome) {
    let Some(error) = &outcome.error else {
        return;
    };

    eprintln!("\n=== {} FAILED: {error}", outcome.name);
    match render_text(&outcome.calls) {
        Some(transcript) => eprintln!("{transcript}"),
        None => eprintln!("(no calls recorded)"),
    }
}
