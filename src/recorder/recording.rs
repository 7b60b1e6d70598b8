//! Interception point and per-case recording sessions.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use super::RecorderError;
use super::record::{CallDraft, CallLog, LiveLog};
use crate::time::{Clock, SystemClock};
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Failure text for a call whose future was dropped before it finished.
pub const CANCELLED: &str = "request cancelled before completion";

/// Shared state of one interception point.
///
/// A recorder is either idle or recording exactly one case. It is shared
/// (via `Arc`) between the [`RecordingClient`] that observes calls and the
/// code that opens [`RecordingSession`]s. Nothing about it is global: two
/// harnesses running side by side each own their own recorder.
#[derive(Debug, Default)]
pub struct Recorder {
    active: Mutex<Option<Arc<LiveLog>>>,
}

impl Recorder {
    /// Creates an idle recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts recording calls for `context`.
    ///
    /// Every call made through a [`RecordingClient`] bound to this recorder
    /// is appended to the session's log until the session ends or is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RecorderError::AlreadyRecording`] if another session is open.
    pub fn begin_recording(
        self: &Arc<Self>,
        context: impl Into<String>,
    ) -> Result<RecordingSession, RecorderError> {
        let mut active = self.lock();
        if let Some(current) = active.as_ref() {
            return Err(RecorderError::AlreadyRecording {
                active: current.context().to_string(),
            });
        }

        let log = Arc::new(LiveLog::new(context));
        *active = Some(Arc::clone(&log));
        drop(active);

        tracing::debug!(case = log.context(), "Recording started");

        Ok(RecordingSession {
            recorder: Arc::clone(self),
            log,
            open: true,
        })
    }

    /// Returns true while a session is open.
    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.lock().is_some()
    }

    pub(crate) fn current(&self) -> Option<Arc<LiveLog>> {
        self.lock().clone()
    }

    /// Uninstalls `log` if it is still the active one.
    fn detach(&self, log: &Arc<LiveLog>) {
        let mut active = self.lock();
        if active.as_ref().is_some_and(|current| Arc::ptr_eq(current, log)) {
            *active = None;
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Arc<LiveLog>>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An open recording for one case.
///
/// Ending the session (explicitly via [`end_recording`](Self::end_recording)
/// or implicitly on drop, e.g. when the case panics) always returns the
/// recorder to idle.
#[derive(Debug)]
pub struct RecordingSession {
    recorder: Arc<Recorder>,
    log: Arc<LiveLog>,
    open: bool,
}

impl RecordingSession {
    /// Name of the case being recorded.
    #[must_use]
    pub fn context(&self) -> &str {
        self.log.context()
    }

    /// Snapshot of the calls recorded so far.
    #[must_use]
    pub fn calls(&self) -> CallLog {
        self.log.snapshot()
    }

    /// Stops recording and returns the frozen log.
    ///
    /// Calls still in flight are not waited for and are left out of the
    /// returned log.
    #[must_use]
    pub fn end_recording(mut self) -> CallLog {
        self.close();
        self.log.snapshot()
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            self.recorder.detach(&self.log);
            tracing::debug!(case = self.log.context(), "Recording stopped");
        }
    }
}

impl Drop for RecordingSession {
    fn drop(&mut self) {
        self.close();
    }
}

/// [`HttpClient`] decorator that records every call while its recorder is
/// recording.
///
/// The wrapped client sees the original request, and the caller sees the
/// wrapped client's result unchanged, whether that is a response or an
/// error. When the recorder is idle, calls pass straight through.
///
/// # Type Parameters
///
/// - `H`: The wrapped HTTP client
/// - `C`: The clock used to time calls (defaults to [`SystemClock`])
#[derive(Debug)]
pub struct RecordingClient<H, C = SystemClock> {
    inner: H,
    recorder: Arc<Recorder>,
    clock: C,
}

impl<H> RecordingClient<H, SystemClock> {
    /// Wraps `inner`, recording into sessions opened on `recorder`.
    #[must_use]
    pub const fn new(inner: H, recorder: Arc<Recorder>) -> Self {
        Self {
            inner,
            recorder,
            clock: SystemClock,
        }
    }
}

impl<H, C> RecordingClient<H, C> {
    /// Sets a custom clock for timing calls.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> RecordingClient<H, C2> {
        RecordingClient {
            inner: self.inner,
            recorder: self.recorder,
            clock,
        }
    }

    /// Returns the recorder this client reports to.
    #[must_use]
    pub const fn recorder(&self) -> &Arc<Recorder> {
        &self.recorder
    }

    /// Returns the wrapped client.
    #[must_use]
    pub const fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: HttpClient, C: Clock> HttpClient for RecordingClient<H, C> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let Some(log) = self.recorder.current() else {
            return self.inner.request(req).await;
        };

        let pending = PendingCall::start(log, CallDraft::from_request(&req), &self.clock);
        let result = self.inner.request(req).await;
        pending.finish(result.as_ref().map_err(ToString::to_string));

        result
    }
}

/// A call that has been handed to the transport but not yet recorded.
///
/// If it is dropped unfinished (the request future was cancelled), it
/// records the call as failed with [`CANCELLED`].
struct PendingCall<'a, C: Clock> {
    log: Arc<LiveLog>,
    draft: Option<CallDraft>,
    started: Instant,
    clock: &'a C,
}

impl<'a, C: Clock> PendingCall<'a, C> {
    fn start(log: Arc<LiveLog>, draft: CallDraft, clock: &'a C) -> Self {
        Self {
            log,
            draft: Some(draft),
            started: clock.now(),
            clock,
        }
    }

    fn finish(mut self, outcome: Result<&HttpResponse, String>) {
        if let Some(draft) = self.draft.take() {
            self.append(draft, outcome);
        }
    }

    fn append(&self, draft: CallDraft, outcome: Result<&HttpResponse, String>) {
        let elapsed = self.clock.now().saturating_duration_since(self.started);
        let record = draft.complete(outcome, elapsed);

        tracing::debug!(
            case = self.log.context(),
            method = %record.method,
            url = %record.url,
            status = ?record.status,
            elapsed_ms = elapsed.as_millis(),
            "Recorded call"
        );

        self.log.push(record);
    }
}

impl<C: Clock> Drop for PendingCall<'_, C> {
    fn drop(&mut self) {
        if let Some(draft) = self.draft.take() {
            self.append(draft, Err(CANCELLED.to_string()));
        }
    }
}
