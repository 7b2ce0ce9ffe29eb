//! Batched multi-request, multi-host uploads.
//!
//! `BulkUploader` queues transfer requests and executes the whole
//! batch against each target session, reporting a per-request outcome
//! instead of aborting on the first failure.

use std::path::PathBuf;

use skipper_session::RemoteSession;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::error::{PathResolutionError, TransferError};
use crate::types::{BatchReport, TransferOutcome, TransferRequest};
use crate::uploader;

/// Queues transfer requests and uploads them as one batch per host.
pub struct BulkUploader {
    queue: Vec<TransferRequest>,
    cancel: CancellationToken,
}

impl Default for BulkUploader {
    fn default() -> Self {
        Self::new()
    }
}

impl BulkUploader {
    /// Creates an empty bulk uploader.
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Returns a cancellation token for this uploader.
    ///
    /// Cancellation takes effect between requests, never mid-file.
    /// Already-written files are not rolled back; requests skipped by
    /// cancellation report failed outcomes.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Queues one request. Nothing is validated until upload time.
    pub fn add(&mut self, source: impl Into<PathBuf>, destination: impl Into<String>) {
        self.queue.push(TransferRequest::new(source, destination));
    }

    /// Number of queued requests.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns `true` if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Uploads every queued request to every session.
    ///
    /// Requests run in insertion order, one at a time per session;
    /// a failed request is recorded in its outcome and the rest of
    /// the batch still runs. The queue is drained, so a second call
    /// without new `add`s transfers nothing. An empty `sessions`
    /// slice produces no reports and leaves the queue untouched.
    pub async fn upload(&mut self, sessions: &[&dyn RemoteSession]) -> Vec<BatchReport> {
        if sessions.is_empty() {
            return Vec::new();
        }

        let requests = std::mem::take(&mut self.queue);
        let mut reports = Vec::with_capacity(sessions.len());

        for &session in sessions {
            let host = session.host_id().to_string();
            let mut outcomes = Vec::with_capacity(requests.len());

            for request in &requests {
                let result = if self.cancel.is_cancelled() {
                    Err(TransferError::Cancelled)
                } else {
                    upload_request(request, session).await
                };

                match result {
                    Ok(()) => outcomes.push(TransferOutcome {
                        request: request.clone(),
                        success: true,
                        error: None,
                    }),
                    Err(e) => {
                        let err_msg = e.to_string();
                        error!(
                            host = %host,
                            source = %request.source.display(),
                            error = %err_msg,
                            "transfer failed"
                        );
                        outcomes.push(TransferOutcome {
                            request: request.clone(),
                            success: false,
                            error: Some(err_msg),
                        });
                    }
                }
            }

            info!(
                host = %host,
                requests = outcomes.len(),
                failed = outcomes.iter().filter(|o| !o.success).count(),
                "batch finished"
            );
            reports.push(BatchReport { host, outcomes });
        }

        reports
    }
}

/// Runs one request, picking the file or directory path by local type.
async fn upload_request(
    request: &TransferRequest,
    session: &dyn RemoteSession,
) -> Result<(), TransferError> {
    let metadata = std::fs::metadata(&request.source).map_err(|e| PathResolutionError::Source {
        path: request.source.clone(),
        source: e,
    })?;

    if metadata.is_dir() {
        uploader::upload_dir(&request.source, &request.destination, session).await
    } else {
        uploader::upload(&request.source, &request.destination, session).await
    }
}
