//! PDF readiness poll.
//!
//! After a save the compiled PDF is produced asynchronously. The poller asks
//! for the job status right away, then again after every interval, until the
//! backend reports success with a URL or failure. There is no backoff and no
//! retry limit. A transport error ends the poll. Dropping the [`PollHandle`]
//! stops a spawned poll.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api_client::{ApiClient, ApiError};
use crate::models::{JobId, JobState, JobStatus};

pub const MSG_PDF_FAILED: &str = "The PDF file could not be generated.";
pub const MSG_CHECK_FAILED: &str = "Unable to check PDF availability";

#[async_trait]
pub trait JobStatusSource: Send + Sync {
    async fn job_status(&self, job_id: &JobId) -> Result<JobStatus, ApiError>;
}

#[async_trait]
impl JobStatusSource for ApiClient {
    async fn job_status(&self, job_id: &JobId) -> Result<JobStatus, ApiError> {
        ApiClient::job_status(self, job_id).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfState {
    Pending,
    Ready(String),
    Failed(String),
}

impl PdfState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PdfState::Pending)
    }

    /// Reads one status response. Success without a URL keeps polling.
    pub fn from_status(status: &JobStatus) -> Self {
        match status.status {
            JobState::Success => match status.pdf_url.as_deref().filter(|u| !u.is_empty()) {
                Some(url) => PdfState::Ready(url.to_string()),
                None => PdfState::Pending,
            },
            JobState::Failed => PdfState::Failed(
                status
                    .error
                    .clone()
                    .or_else(|| status.message.clone())
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| MSG_PDF_FAILED.to_string()),
            ),
            _ => PdfState::Pending,
        }
    }
}

/// Appends a timestamp query so viewers do not show a stale cached PDF.
pub fn cache_busted_url(url: &str, millis: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}t={millis}")
}

pub struct JobPoller<S: ?Sized> {
    source: Arc<S>,
    interval: Duration,
}

impl<S: ?Sized> Clone for JobPoller<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            interval: self.interval,
        }
    }
}

impl<S: JobStatusSource + ?Sized + 'static> JobPoller<S> {
    pub fn new(source: Arc<S>, interval: Duration) -> Self {
        Self { source, interval }
    }

    /// Polls until a terminal state.
    pub async fn wait(&self, job_id: &JobId) -> PdfState {
        self.run(job_id, |_| {}).await
    }

    /// Polls in a background task. The returned handle reports every state
    /// change and aborts the task when dropped.
    pub fn spawn(&self, job_id: JobId) -> PollHandle {
        let (tx, rx) = watch::channel(PdfState::Pending);
        let poller = self.clone();
        let task = tokio::spawn(async move {
            poller
                .run(&job_id, |state| {
                    // Receiver gone means nobody is listening; the drop
                    // guard aborts us shortly.
                    let _ = tx.send(state.clone());
                })
                .await;
        });
        PollHandle {
            task: Some(task),
            state: rx,
        }
    }

    async fn run(&self, job_id: &JobId, mut report: impl FnMut(&PdfState)) -> PdfState {
        loop {
            let state = match self.source.job_status(job_id).await {
                Ok(status) => {
                    debug!(job_id = %job_id, status = status.status.as_str(), "job status");
                    PdfState::from_status(&status)
                }
                Err(e) => {
                    warn!(job_id = %job_id, "job status check failed: {e}");
                    PdfState::Failed(MSG_CHECK_FAILED.to_string())
                }
            };

            report(&state);
            if state.is_terminal() {
                info!(job_id = %job_id, state = ?state, "poll finished");
                return state;
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}

/// A running poll. Dropping it stops the poll.
pub struct PollHandle {
    task: Option<JoinHandle<()>>,
    state: watch::Receiver<PdfState>,
}

impl PollHandle {
    pub fn state(&self) -> PdfState {
        self.state.borrow().clone()
    }

    /// Waits for the next reported state. `None` once the poll has ended.
    pub async fn changed(&mut self) -> Option<PdfState> {
        self.state.changed().await.ok()?;
        Some(self.state.borrow_and_update().clone())
    }

    /// Waits for a terminal state.
    pub async fn finished(&mut self) -> PdfState {
        loop {
            let current = self.state.borrow_and_update().clone();
            if current.is_terminal() {
                return current;
            }
            if self.state.changed().await.is_err() {
                return self.state.borrow().clone();
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
