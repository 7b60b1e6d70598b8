//! Error types for test cases.

use http::header::InvalidHeaderValue;
use thiserror::Error;

use super::StatusSet;
use crate::recorder::RecorderError;
use crate::transport::HttpError;

/// Why a case failed.
///
/// `step` names the operation inside the case that failed (e.g. `"create"`).
#[derive(Debug, Error)]
pub enum CaseError {
    /// The transport failed to complete a call.
    #[error("{step}: {source}")]
    Http {
        /// Failing step
        step: &'static str,
        /// Transport error, exactly as the transport returned it
        #[source]
        source: HttpError,
    },

    /// The service answered with a status outside the expected set.
    #[error("{step}: expected status {expected}, got {actual}")]
    UnexpectedStatus {
        /// Failing step
        step: &'static str,
        /// Acceptable codes
        expected: StatusSet,
        /// Code received
        actual: u16,
    },

    /// The response body did not have the expected shape.
    #[error("{step}: unexpected response body: {source}")]
    Decode {
        /// Failing step
        step: &'static str,
        /// Deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// A field in the response did not hold the expected value.
    #[error("{step}: expected {field} to be {expected:?}, got {actual:?}")]
    Mismatch {
        /// Failing step
        step: &'static str,
        /// Field name
        field: &'static str,
        /// Expected value
        expected: String,
        /// Value received
        actual: String,
    },

    /// The auth token cannot be sent as a header.
    #[error("Invalid auth token: {0}")]
    InvalidToken(#[from] InvalidHeaderValue),

    /// The case could not start recording.
    #[error(transparent)]
    Recorder(#[from] RecorderError),
}

impl CaseError {
    /// Returns a mapper wrapping a transport error for `step`.
    ///
    /// Intended for `map_err`: `api.health_check().await.map_err(CaseError::http("ping"))?`.
    pub fn http(step: &'static str) -> impl FnOnce(HttpError) -> Self {
        move |source| Self::Http { step, source }
    }

    /// Returns a mapper wrapping a decode error for `step`.
    pub fn decode(step: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Self::Decode { step, source }
    }
}
