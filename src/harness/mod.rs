//! Test harness: runs cases against the booking service and reports the
//! calls each one made.
//!
//! A [`Harness`] owns the recorder. [`Harness::run_case`] opens a recording
//! session, hands the case a [`BookingApi`](crate::booking::BookingApi)
//! over the recording transport, and once the case returns renders the
//! log and attaches it to the configured [`ReportSink`](crate::report::ReportSink).
//!
//! The bundled [`Scenario`]s exercise the booking lifecycle; expected
//! status codes come from [`Expectations`].

mod case;
mod error;
mod expect;
pub mod scenarios;


pub use case::{CaseOutcome, Harness, RecordedApi};
pub use error::CaseError;
pub use expect::{Expectations, StatusSet};
pub use scenarios::Scenario;
