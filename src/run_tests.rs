//! Tests for the run module.

use super::*;

use booker_probe::config::Cli;
use booker_probe::transport::{HttpError, HttpRequest, HttpResponse};

/// Service that is up but rejects everything except `/ping`.
struct PingOnly;

impl HttpClient for PingOnly {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let status = if req.url.path() == "/ping" {
            http::StatusCode::CREATED
        } else {
            http::StatusCode::SERVICE_UNAVAILABLE
        };
        Ok(HttpResponse::new(status, http::HeaderMap::new(), b"ok".to_vec()))
    }
}

fn config(args: &[&str]) -> ValidatedConfig {
    let mut full_args = vec!["booker-probe", "--base-url", "http://booker.test"];
    full_args.extend(args);
    let cli = Cli::parse_from_iter(full_args);
    ValidatedConfig::from_raw(&cli, None, |_| None).unwrap()
}

mod run_error {
    use super::*;

    #[test]
    fn cases_failed_displays_counts() {
        let error = RunError::CasesFailed { failed: 1, total: 3 };
        assert_eq!(error.to_string(), "1 of 3 cases failed");
    }
}

mod run_scenarios {
    use super::*;

    #[tokio::test]
    async fn passing_case_returns_summaries() {
        let config = config(&["--case", "health_check"]);

        let summaries = run_scenarios(PingOnly, &config).await.unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "health_check");
        assert!(summaries[0].passed);
        assert_eq!(summaries[0].calls, 1);
    }

    #[tokio::test]
    async fn failing_case_is_counted() {
        let config = config(&["--case", "health_check", "--case", "crud_flow"]);

        let result = run_scenarios(PingOnly, &config).await;

        assert!(matches!(
            result,
            Err(RunError::CasesFailed { failed: 1, total: 2 })
        ));
    }

    #[tokio::test]
    async fn reports_are_written_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let reports = dir.path().join("reports");
        let config = config(&[
            "--case",
            "health_check",
            "--case",
            "crud_flow",
            "--report-dir",
            reports.to_str().unwrap(),
        ]);

        let _ = run_scenarios(PingOnly, &config).await;

        assert!(reports.join("health_check.html").is_file());
        assert!(reports.join("health_check.calls.json").is_file());
        // crud_flow fails on auth before recording anything
        assert!(!reports.join("crud_flow.html").exists());

        let index = std::fs::read_to_string(reports.join("index.html")).unwrap();
        assert!(index.contains(r#"<a href="health_check.html">health_check</a>"#));
        assert!(index.contains("<td>crud_flow</td>"));
        assert!(index.contains("1 passed, 1 failed"));
    }

    #[tokio::test]
    async fn stale_report_pages_are_not_linked() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("crud_flow.html"), b"previous run").unwrap();
        let config = config(&[
            "--case",
            "crud_flow",
            "--report-dir",
            dir.path().to_str().unwrap(),
        ]);

        let _ = run_scenarios(PingOnly, &config).await;

        let index = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(index.contains("<td>crud_flow</td>"));
        assert!(!index.contains(r#"href="crud_flow.html""#));
    }
}
