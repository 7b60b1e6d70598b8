//! Call recording for test cases.
//!
//! A [`RecordingClient`] wraps the transport handed to the booking client
//! (or to anything else a case uses). While a [`RecordingSession`] is open
//! on its [`Recorder`], every call made through it becomes one
//! [`CallRecord`] in the session's [`CallLog`]:
//!
//! ```text
//! idle --begin_recording--> recording --end_recording / drop--> idle
//!                               |
//!                     request() appends one CallRecord
//! ```
//!
//! The wrapped call's result (response or error) is returned to the caller
//! exactly as the inner transport produced it.
//!
//! A call belongs to the session that was open when it started. Ending a
//! session does not wait for its calls: one still in flight at that point
//! completes normally for its caller, but its record is missing from the
//! returned log and never appears in a later session's log either.

pub mod body;
mod error;
mod record;
mod recording;

#[cfg(test)]
mod record_tests;

pub use error::RecorderError;
pub use record::{CallLog, CallRecord, HeaderSnapshot, header_snapshot};
pub use recording::{CANCELLED, Recorder, RecordingClient, RecordingSession};
