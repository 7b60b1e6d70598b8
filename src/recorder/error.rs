//! Error types for the call recorder.

use thiserror::Error;

/// Error type for recorder lifecycle operations.
///
/// Transport failures never show up here; they pass through the
/// recording client untouched.
#[derive(Debug, Error)]
pub enum RecorderError {
    /// A session is already open on this recorder.
    #[error("Recorder is already recording case '{active}'")]
    AlreadyRecording {
        /// Name of the case currently being recorded
        active: String,
    },
}
