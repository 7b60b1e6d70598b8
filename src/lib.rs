//! booker-probe: test harness for the restful-booker REST service.
//!
//! A library for running booking scenarios against the service while
//! recording every HTTP call each scenario makes, and rendering those
//! calls into an escaped HTML report per scenario.

pub mod booking;
pub mod config;
pub mod harness;
pub mod recorder;
pub mod report;
pub mod time;
pub mod transport;
