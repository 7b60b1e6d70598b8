//! Case runner: records every call a case makes and reports it.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::OnceCell;
use url::Url;

use super::scenarios::{self, Scenario};
use super::{CaseError, Expectations};
use crate::booking::{BookingApi, Credentials, TokenResponse, random_booking};
use crate::recorder::{CallLog, Recorder, RecordingClient};
use crate::report::{CaseSummary, ReportSink, render_report};
use crate::transport::HttpClient;

/// Booking client handed to case bodies; every call it makes is recorded.
pub type RecordedApi<H> = BookingApi<Arc<RecordingClient<H>>>;

/// Result of one case.
#[derive(Debug)]
pub struct CaseOutcome {
    /// Case name
    pub name: String,
    /// Why the case failed, if it did
    pub error: Option<CaseError>,
    /// Calls made while the case ran
    pub calls: CallLog,
}

impl CaseOutcome {
    /// Returns true if the case passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.error.is_none()
    }

    /// Summary for the report index.
    #[must_use]
    pub fn summary(&self) -> CaseSummary {
        CaseSummary {
            name: self.name.clone(),
            passed: self.passed(),
            calls: self.calls.len(),
            error: self.error.as_ref().map(ToString::to_string),
        }
    }
}

/// Runs cases against the booking service.
///
/// Owns the [`Recorder`] and the recording transport. Each case gets a fresh
/// [`BookingApi`] over that transport; the calls it makes between
/// [`run_case`](Self::run_case) starting and finishing are rendered and
/// handed to the report sink, if one is configured.
pub struct Harness<H> {
    recorder: Arc<Recorder>,
    client: Arc<RecordingClient<H>>,
    base_url: Url,
    credentials: Credentials,
    expectations: Expectations,
    sink: Option<Box<dyn ReportSink>>,
    token: OnceCell<String>,
}

impl<H> Harness<H> {
    /// Creates a harness sending requests through `transport` to the
    /// service at `base_url`.
    #[must_use]
    pub fn new(transport: H, base_url: Url, credentials: Credentials) -> Self {
        let recorder = Arc::new(Recorder::new());
        let client = Arc::new(RecordingClient::new(transport, Arc::clone(&recorder)));
        Self {
            recorder,
            client,
            base_url,
            credentials,
            expectations: Expectations::default(),
            sink: None,
            token: OnceCell::new(),
        }
    }

    /// Replaces the expected status codes.
    #[must_use]
    pub fn with_expectations(mut self, expectations: Expectations) -> Self {
        self.expectations = expectations;
        self
    }

    /// Sets the destination for case reports.
    #[must_use]
    pub fn with_sink(mut self, sink: impl ReportSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Returns the recorder shared with the transport.
    #[must_use]
    pub const fn recorder(&self) -> &Arc<Recorder> {
        &self.recorder
    }

    /// Returns the status codes each operation is expected to answer with.
    #[must_use]
    pub const fn expectations(&self) -> &Expectations {
        &self.expectations
    }

    /// Returns a fresh booking client over the recording transport.
    #[must_use]
    pub fn api(&self) -> RecordedApi<H> {
        BookingApi::new(Arc::clone(&self.client), self.base_url.clone())
    }
}

impl<H: HttpClient> Harness<H> {
    /// Returns the auth token, requesting it on first use.
    ///
    /// The token is fetched at most once per harness. Call this outside a
    /// case so the auth call does not land in a case's log.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError`] if the auth call fails or yields no token.
    pub async fn token(&self) -> Result<String, CaseError> {
        self.token
            .get_or_try_init(|| async {
                let response = self
                    .api()
                    .create_token(&self.credentials.username, &self.credentials.password)
                    .await
                    .map_err(CaseError::http("auth"))?;
                self.expectations.auth.check("auth", &response)?;
                let body: TokenResponse = response.json().map_err(CaseError::decode("auth"))?;
                tracing::debug!("Auth token acquired");
                Ok::<_, CaseError>(body.token)
            })
            .await
            .cloned()
    }

    /// Runs `body` as the case `name`.
    ///
    /// Recording starts before `body` gets its client and stops when it
    /// returns, whatever the result. The log is rendered and attached to
    /// the sink; a case that made no calls attaches nothing.
    pub async fn run_case<F, Fut>(&self, name: &str, body: F) -> CaseOutcome
    where
        F: FnOnce(RecordedApi<H>) -> Fut,
        Fut: Future<Output = Result<(), CaseError>>,
    {
        let session = match self.recorder.begin_recording(name) {
            Ok(session) => session,
            Err(e) => {
                return CaseOutcome {
                    name: name.to_string(),
                    error: Some(e.into()),
                    calls: CallLog::new(name, Vec::new()),
                };
            }
        };

        let result = body(self.api()).await;
        let calls = session.end_recording();

        match &result {
            Ok(()) => tracing::info!(case = name, calls = calls.len(), "Case passed"),
            Err(e) => tracing::warn!(case = name, calls = calls.len(), "Case failed: {e}"),
        }

        self.attach(name, &calls);

        CaseOutcome {
            name: name.to_string(),
            error: result.err(),
            calls,
        }
    }

    /// Runs a bundled scenario with a freshly generated booking.
    ///
    /// Scenarios that write fetch the token first, outside the case.
    pub async fn run_scenario(&self, scenario: Scenario) -> CaseOutcome {
        let name = scenario.name();

        let token = if scenario.needs_token() {
            match self.token().await {
                Ok(token) => Some(token),
                Err(e) => {
                    tracing::warn!(case = name, "Case setup failed: {e}");
                    return CaseOutcome {
                        name: name.to_string(),
                        error: Some(e),
                        calls: CallLog::new(name, Vec::new()),
                    };
                }
            }
        } else {
            None
        };

        let booking = random_booking(&mut rand::thread_rng());
        let expect = self.expectations.clone();

        self.run_case(name, move |mut api| async move {
            if let Some(token) = &token {
                api.set_token(token)?;
            }
            match scenario {
                Scenario::HealthCheck => scenarios::health_check(&api, &expect).await,
                Scenario::CrudFlow => scenarios::crud_flow(&api, &booking, &expect).await,
                Scenario::PartialUpdate => {
                    scenarios::partial_update_flow(&api, &booking, &expect).await
                }
            }
        })
        .await
    }

    fn attach(&self, name: &str, calls: &CallLog) {
        let Some(sink) = &self.sink else {
            return;
        };
        let Some(fragment) = render_report(calls) else {
            tracing::debug!(case = name, "No calls recorded, nothing to attach");
            return;
        };

        if let Err(e) = sink.attach(name, &fragment, calls) {
            tracing::warn!(case = name, "Failed to attach report: {e}");
        }
    }
}
