//! HTML rendering of call logs.
//!
//! Templates are rendered with handlebars, whose `{{value}}` expressions
//! HTML-escape their input, so captured bodies and headers can never break
//! the markup around them.

use std::fmt;

use handlebars::Handlebars;
use serde::Serialize;

use crate::recorder::{CallLog, CallRecord, HeaderSnapshot};

const CALLS_TEMPLATE: &str = r#"<div class="api-calls"><h3>API calls</h3><table border="1" cellpadding="4" cellspacing="0" style="border-collapse:collapse"><thead><tr><th>Method</th><th>URL</th><th>Status</th><th>Duration</th><th>Request</th><th>Response</th></tr></thead><tbody>
{{#each rows}}<tr><td style="white-space:nowrap"><strong>{{method}}</strong></td><td style="max-width:600px;word-break:break-all">{{url}}</td><td>{{status}}</td><td>{{duration}}s</td><td><details><summary>request</summary><pre>{{request_headers}}

{{request_body}}</pre></details></td><td><details><summary>response</summary><pre>{{response_headers}}

{{response_body}}{{#if failure}}

{{failure}}{{/if}}</pre></details></td></tr>
{{/each}}</tbody></table></div>"#;

/// Rendered report markup for one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFragment(String);

impl ReportFragment {
    /// Returns the markup.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the fragment, returning the markup.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ReportFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize)]
struct Row<'a> {
    method: &'a str,
    url: &'a str,
    status: String,
    duration: String,
    request_headers: String,
    request_body: &'a str,
    response_headers: String,
    response_body: &'a str,
    failure: &'a str,
}

impl<'a> From<&'a CallRecord> for Row<'a> {
    fn from(record: &'a CallRecord) -> Self {
        Self {
            method: &record.method,
            url: &record.url,
            status: record.status.map(|s| s.to_string()).unwrap_or_default(),
            duration: format!("{:.3}", record.duration_secs()),
            request_headers: header_lines(&record.request_headers),
            request_body: &record.request_body,
            response_headers: header_lines(&record.response_headers),
            response_body: &record.response_body,
            failure: &record.failure,
        }
    }
}

#[derive(Serialize)]
struct ReportData<'a> {
    rows: Vec<Row<'a>>,
}

/// Formats headers as `name: value` lines.
pub(crate) fn header_lines(headers: &HeaderSnapshot) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders a call log as an HTML table, one row per call in call order.
///
/// Returns `None` for an empty log (nothing to attach) and when rendering
/// fails; a broken report must never fail the case it describes.
#[must_use]
pub fn render_report(log: &CallLog) -> Option<ReportFragment> {
    if log.is_empty() {
        return None;
    }

    let data = ReportData {
        rows: log.records().iter().map(Row::from).collect(),
    };

    match Handlebars::new().render_template(CALLS_TEMPLATE, &data) {
        Ok(html) => Some(ReportFragment(html)),
        Err(e) => {
            tracing::warn!(case = log.context(), "Failed to render call report: {e}");
            None
        }
    }
}
