//! Destinations for rendered reports.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use handlebars::Handlebars;
use serde::Serialize;

use super::{ReportError, ReportFragment};
use crate::recorder::CallLog;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>{{case}}</title></head>
<body><h2>{{case}}</h2>
{{{fragment}}}
</body></html>
"#;

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>booker-probe report</title></head>
<body><h2>booker-probe report</h2>
<p>{{passed}} passed, {{failed}} failed</p>
<table border="1" cellpadding="4" cellspacing="0" style="border-collapse:collapse"><thead><tr><th>Case</th><th>Result</th><th>Calls</th><th>Error</th></tr></thead><tbody>
{{#each cases}}<tr><td>{{#if page}}<a href="{{page}}">{{name}}</a>{{else}}{{name}}{{/if}}</td><td>{{#if passed}}passed{{else}}failed{{/if}}</td><td>{{calls}}</td><td>{{error}}</td></tr>
{{/each}}</tbody></table>
</body></html>
"#;

/// Receives the rendered report of each case.
pub trait ReportSink: Send + Sync {
    /// Attaches `fragment` (rendered from `log`) to the output of `case`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if the report cannot be stored.
    fn attach(&self, case: &str, fragment: &ReportFragment, log: &CallLog)
    -> Result<(), ReportError>;
}

/// Outcome of one case, as listed on the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseSummary {
    /// Case name
    pub name: String,
    /// Whether the case passed
    pub passed: bool,
    /// Number of recorded calls
    pub calls: usize,
    /// Failure description, if the case failed
    pub error: Option<String>,
}

#[derive(Serialize)]
struct IndexRow<'a> {
    name: &'a str,
    passed: bool,
    calls: usize,
    error: &'a str,
    page: Option<String>,
}

#[derive(Serialize)]
struct IndexData<'a> {
    passed: usize,
    failed: usize,
    cases: Vec<IndexRow<'a>>,
}

/// Writes each case's report into a directory.
///
/// For a case named `crud flow` it writes `crud_flow.html` (a standalone
/// page around the fragment) and `crud_flow.calls.json` (the raw log).
/// A later case whose name maps to a stem already in use gets a numbered
/// stem (`crud_flow-2`). The directory is created on first use.
///
/// Clones share the record of pages written, so the index can be written
/// through any of them.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    pages: Arc<Mutex<BTreeMap<String, PageSlot>>>,
}

/// File stem claimed by a case, and whether its page made it to disk.
#[derive(Debug)]
struct PageSlot {
    stem: String,
    written: bool,
}

impl DirectorySink {
    /// Creates a sink writing into `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pages: Arc::default(),
        }
    }

    /// Returns the output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name of the HTML page written for `case`, if one was.
    #[must_use]
    pub fn page_name(&self, case: &str) -> Option<String> {
        self.lock()
            .get(case)
            .filter(|slot| slot.written)
            .map(|slot| format!("{}.html", slot.stem))
    }

    /// Writes `index.html` listing every case, linking the pages this sink
    /// wrote.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if rendering or writing fails.
    pub fn write_index(&self, cases: &[CaseSummary]) -> Result<PathBuf, ReportError> {
        let rows = cases
            .iter()
            .map(|case| IndexRow {
                name: &case.name,
                passed: case.passed,
                calls: case.calls,
                error: case.error.as_deref().unwrap_or_default(),
                page: self.page_name(&case.name),
            })
            .collect();
        let passed = cases.iter().filter(|c| c.passed).count();
        let data = IndexData {
            passed,
            failed: cases.len() - passed,
            cases: rows,
        };

        let html = Handlebars::new().render_template(INDEX_TEMPLATE, &data)?;
        let path = self.dir.join("index.html");
        self.write(&path, html.as_bytes())?;
        Ok(path)
    }

    /// Returns the stem for `case`, claiming a free one on first use.
    fn stem_for(&self, case: &str) -> String {
        let mut pages = self.lock();
        if let Some(slot) = pages.get(case) {
            return slot.stem.clone();
        }

        let base = file_stem(case);
        let mut stem = base.clone();
        let mut n = 2;
        while pages.values().any(|slot| slot.stem == stem) {
            stem = format!("{base}-{n}");
            n += 1;
        }
        pages.insert(
            case.to_string(),
            PageSlot {
                stem: stem.clone(),
                written: false,
            },
        );
        stem
    }

    fn mark_written(&self, case: &str) {
        if let Some(slot) = self.lock().get_mut(case) {
            slot.written = true;
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, PageSlot>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), ReportError> {
        let io_error = |source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(io_error)?;
        std::fs::write(path, contents).map_err(io_error)
    }
}

impl ReportSink for DirectorySink {
    fn attach(
        &self,
        case: &str,
        fragment: &ReportFragment,
        log: &CallLog,
    ) -> Result<(), ReportError> {
        #[derive(Serialize)]
        struct Page<'a> {
            case: &'a str,
            fragment: &'a str,
        }

        let page = Handlebars::new().render_template(
            PAGE_TEMPLATE,
            &Page {
                case,
                fragment: fragment.as_str(),
            },
        )?;
        let json = serde_json::to_vec_pretty(log)?;
        let stem = self.stem_for(case);

        self.write(&self.dir.join(format!("{stem}.html")), page.as_bytes())?;
        self.write(&self.dir.join(format!("{stem}.calls.json")), &json)?;
        self.mark_written(case);

        tracing::debug!(case, dir = %self.dir.display(), "Report written");
        Ok(())
    }
}

/// Maps a case name onto a safe file stem (`[A-Za-z0-9_-]`).
fn file_stem(case: &str) -> String {
    let stem: String = case
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() {
        "case".to_string()
    } else {
        stem
    }
}
