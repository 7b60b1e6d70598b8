//! Error types for report output.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for writing reports.
///
/// These never affect a case's outcome; callers log and move on.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to create the report directory or write a file into it.
    #[error("Failed to write report '{}': {source}", path.display())]
    Io {
        /// Path being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the call log.
    #[error("Failed to serialize call log: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to render a report template.
    #[error("Failed to render report page: {0}")]
    Render(#[from] handlebars::RenderError),
}
