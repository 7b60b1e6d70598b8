//! Rendering and storage of per-case call reports.
//!
//! - [`render_report`] turns a [`CallLog`](crate::recorder::CallLog) into an
//!   escaped HTML fragment.
//! - [`render_text`] turns it into a plain-text transcript.
//! - [`ReportSink`] receives fragments; [`DirectorySink`] writes them to disk.

mod error;
mod html;
mod sink;
mod text;

pub use error::ReportError;
pub use html::{ReportFragment, render_report};
pub use sink::{CaseSummary, DirectorySink, ReportSink};
pub use text::render_text;
