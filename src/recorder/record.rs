//! Captured call data.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde::{Serialize, Serializer};

use super::body::{NO_RESPONSE, describe_bytes, describe_request};
use crate::transport::{HttpRequest, HttpResponse};

/// Header names mapped to their values.
///
/// Repeated headers are joined with `", "`.
pub type HeaderSnapshot = BTreeMap<String, String>;

/// One intercepted transport invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallRecord {
    /// HTTP verb
    pub method: String,
    /// Absolute URL
    pub url: String,
    /// Response status; `None` if the call failed before a response arrived
    pub status: Option<u16>,
    /// Wall-clock time spent in the transport (serialized as seconds)
    #[serde(serialize_with = "serialize_secs")]
    pub duration: Duration,
    /// Headers sent with the request
    pub request_headers: HeaderSnapshot,
    /// Request body as display text
    pub request_body: String,
    /// Headers received with the response
    pub response_headers: HeaderSnapshot,
    /// Response body as display text
    pub response_body: String,
    /// Failure description; empty when the transport returned a response
    pub failure: String,
}

impl CallRecord {
    /// Duration in floating-point seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    /// Returns true if the transport failed for this call.
    #[must_use]
    pub fn failed(&self) -> bool {
        !self.failure.is_empty()
    }
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Flattens a header map into a [`HeaderSnapshot`].
///
/// Non-UTF-8 values are converted lossily.
#[must_use]
pub fn header_snapshot(headers: &http::HeaderMap) -> HeaderSnapshot {
    let mut snapshot = HeaderSnapshot::new();

    for (name, value) in headers {
        let text = String::from_utf8_lossy(value.as_bytes());
        match snapshot.entry(name.as_str().to_string()) {
            Entry::Occupied(mut existing) => {
                let joined = existing.get_mut();
                joined.push_str(", ");
                joined.push_str(&text);
            }
            Entry::Vacant(slot) => {
                slot.insert(text.into_owned());
            }
        }
    }

    snapshot
}

/// Request side of a call, captured before the request is handed off.
#[derive(Debug, Clone)]
pub(crate) struct CallDraft {
    method: String,
    url: String,
    request_headers: HeaderSnapshot,
    request_body: String,
}

impl CallDraft {
    pub(crate) fn from_request(req: &HttpRequest) -> Self {
        Self {
            method: req.method.as_str().to_string(),
            url: req.url.to_string(),
            request_headers: header_snapshot(&req.headers),
            request_body: describe_request(&req.body),
        }
    }

    /// Completes the record with either the response or a failure description.
    pub(crate) fn complete(
        self,
        outcome: Result<&HttpResponse, String>,
        duration: Duration,
    ) -> CallRecord {
        let (status, response_headers, response_body, failure) = match outcome {
            Ok(response) => (
                Some(response.status.as_u16()),
                header_snapshot(&response.headers),
                describe_bytes(&response.body),
                String::new(),
            ),
            Err(failure) => (
                None,
                HeaderSnapshot::new(),
                NO_RESPONSE.to_string(),
                failure,
            ),
        };

        CallRecord {
            method: self.method,
            url: self.url,
            status,
            duration,
            request_headers: self.request_headers,
            request_body: self.request_body,
            response_headers,
            response_body,
            failure,
        }
    }
}

/// Ordered calls made during one test case.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CallLog {
    context: String,
    records: Vec<CallRecord>,
}

impl CallLog {
    /// Creates a log for the named case.
    #[must_use]
    pub fn new(context: impl Into<String>, records: Vec<CallRecord>) -> Self {
        Self {
            context: context.into(),
            records,
        }
    }

    /// Name of the case this log belongs to.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Records in call order.
    #[must_use]
    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    /// Number of recorded calls.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no calls were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Log that is still being appended to by in-flight calls.
///
/// The mutex is held only for the push itself.
#[derive(Debug)]
pub(crate) struct LiveLog {
    context: String,
    records: Mutex<Vec<CallRecord>>,
}

impl LiveLog {
    pub(crate) fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            records: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn context(&self) -> &str {
        &self.context
    }

    pub(crate) fn push(&self, record: CallRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    pub(crate) fn snapshot(&self) -> CallLog {
        let records = self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        CallLog::new(self.context.clone(), records)
    }
}
