//! Plain-text transcript of a call log, for terminals and CI logs.

use super::html::header_lines;
use crate::recorder::{CallLog, CallRecord};

const EMPTY: &str = "<empty>";

fn or_empty(text: &str) -> &str {
    if text.is_empty() { EMPTY } else { text }
}

fn render_call(index: usize, record: &CallRecord) -> String {
    let status = record
        .status
        .map_or_else(|| "<none>".to_string(), |s| s.to_string());

    let mut parts = vec![
        format!(
            "API Call {} ({:.3}s)\nRequest: {} {}",
            index + 1,
            record.duration_secs(),
            record.method,
            record.url
        ),
        format!(
            "Request headers:\n{}",
            or_empty(&header_lines(&record.request_headers))
        ),
        format!("Request body:\n{}", or_empty(&record.request_body)),
        format!("Response status: {status}"),
        format!(
            "Response headers:\n{}",
            or_empty(&header_lines(&record.response_headers))
        ),
        format!("Response body:\n{}", or_empty(&record.response_body)),
    ];
    if record.failed() {
        parts.push(format!("Failure: {}", record.failure));
    }

    parts.join("\n\n")
}

/// Renders every call in `log` as a readable text block.
///
/// Returns `None` for an empty log.
#[must_use]
pub fn render_text(log: &CallLog) -> Option<String> {
    if log.is_empty() {
        return None;
    }

    let calls: Vec<String> = log
        .records()
        .iter()
        .enumerate()
        .map(|(i, record)| render_call(i, record))
        .collect();

    Some(calls.join("\n\n----\n\n"))
}
