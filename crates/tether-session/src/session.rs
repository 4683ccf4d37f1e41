//! The polling loop.

use std::time::Duration;

use tether_core::{AnalysisResult, CorrelationHandle, StatusCheck};
use tether_correlate::{ResolveError, Resolver, ResultSource};
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

use crate::status::LatestStatus;

/// One status check, as the session sees it.
///
/// Blanket-implemented for the correlate resolver; tests drive the session
/// with scripted fakes.
pub trait StatusProbe {
    fn check(
        &self,
        model: &str,
        record_id: Option<&str>,
    ) -> impl Future<Output = Result<StatusCheck, ResolveError>> + Send;
}

impl<S: ResultSource + Sync> StatusProbe for Resolver<S> {
    fn check(
        &self,
        model: &str,
        record_id: Option<&str>,
    ) -> impl Future<Output = Result<StatusCheck, ResolveError>> + Send {
        self.check_status(model, record_id)
    }
}

/// Intermediate status surfaced to the caller while a session runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    Processing { attempt: u32, diagnostic: String },
    Done { attempt: u32, result: AnalysisResult },
}

/// Why the loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// The result arrived. Terminal state of the request lifecycle.
    Done(AnalysisResult),
    /// The caller cancelled (navigated away, started a new request).
    Cancelled,
}

/// Caller-side cancellation handle for a running session.
///
/// Dropping the handle also ends the session: the loop observes the watch
/// channel closing. Cancellation is deterministic — the ticker is owned by
/// the loop and released when it returns.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    cancel: watch::Sender<bool>,
}

impl SessionHandle {
    /// Create the handle and the receiver half passed to
    /// [`PollingSession::run`].
    #[must_use]
    pub fn pair() -> (Self, watch::Receiver<bool>) {
        let (tx, rx) = watch::channel(false);
        (Self { cancel: tx }, rx)
    }

    /// Signal the session to stop after any in-flight check completes.
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }
}

/// Fixed-interval polling of one correlation handle.
#[derive(Debug)]
pub struct PollingSession<P> {
    probe: P,
    model: String,
    record_id: Option<String>,
    interval: Duration,
}

impl<P: StatusProbe> PollingSession<P> {
    /// Session for a freshly submitted request.
    #[must_use]
    pub fn for_handle(probe: P, handle: &CorrelationHandle, interval: Duration) -> Self {
        Self {
            probe,
            model: handle.model.clone(),
            record_id: Some(handle.record_id.clone()),
            interval,
        }
    }

    /// Session for a bare identifier (no request row id known).
    #[must_use]
    pub fn for_model(probe: P, model: impl Into<String>, interval: Duration) -> Self {
        Self {
            probe,
            model: model.into(),
            record_id: None,
            interval,
        }
    }

    /// Run the loop until `done`, cancellation, or a fatal error.
    ///
    /// The first check fires immediately, then one per interval. Checks are
    /// strictly sequential — the next tick is not processed while a check is
    /// awaiting the store, and `MissedTickBehavior::Delay` keeps a slow check
    /// from causing a burst afterwards.
    ///
    /// Transient query failures are logged and reported as a `processing`
    /// event for that cycle; the next tick retries naturally.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Auth`] if the credential exchange fails —
    /// fatal for the session, never retried automatically.
    pub async fn run(
        &self,
        events: &mpsc::Sender<PollEvent>,
        mut cancel: watch::Receiver<bool>,
    ) -> Result<SessionEnd, ResolveError> {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut board = LatestStatus::new();
        let mut attempt: u32 = 0;

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    // a closed channel means the handle was dropped; treat
                    // both as cancellation
                    if changed.is_err() || *cancel.borrow() {
                        tracing::debug!(model = %self.model, attempt, "polling session cancelled");
                        return Ok(SessionEnd::Cancelled);
                    }
                }
                _ = ticker.tick() => {
                    attempt += 1;
                    match self.probe.check(&self.model, self.record_id.as_deref()).await {
                        Ok(StatusCheck::Done { data }) => {
                            if board.record_done(attempt) {
                                let _ = events
                                    .send(PollEvent::Done { attempt, result: data.clone() })
                                    .await;
                                return Ok(SessionEnd::Done(data));
                            }
                        }
                        Ok(StatusCheck::Processing { diagnostic }) => {
                            if board.record_processing(attempt) {
                                let _ = events
                                    .send(PollEvent::Processing { attempt, diagnostic })
                                    .await;
                            }
                        }
                        Err(ResolveError::Auth(message)) => {
                            return Err(ResolveError::Auth(message));
                        }
                        Err(err) => {
                            tracing::warn!(%err, attempt, "status check failed; retrying next tick");
                            if board.record_processing(attempt) {
                                let _ = events
                                    .send(PollEvent::Processing {
                                        attempt,
                                        diagnostic: format!("transient query failure: {err}"),
                                    })
                                    .await;
                            }
                        }
                    }
                }
            }
        }
    }
}
