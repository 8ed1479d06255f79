//! Background API worker.
//!
//! The worker is a dedicated OS thread owning a current-thread tokio runtime.
//! Requests arrive over an unbounded channel and each one is spawned as its
//! own task, so two loads of the same collection genuinely race and may
//! complete out of order; the UI loop's staleness checks are the only
//! ordering discipline. Outcomes flow back over a std channel drained with
//! `try_recv` between renders.

use crate::api::ApiClient;
use crate::domain::error::{ConsoleError, Result};
use crate::net::{ApiOutcome, ApiRequest};
use std::sync::Arc;

/// Handle to the worker thread.
///
/// Dropping the handle closes the request channel, which ends the worker's
/// receive loop and lets the thread exit; in-flight tasks are abandoned.
pub struct ApiWorker {
    requests: tokio::sync::mpsc::UnboundedSender<ApiRequest>,
    outcomes: std::sync::mpsc::Receiver<ApiOutcome>,
}

impl ApiWorker {
    /// Spawns the worker thread around an authenticated client.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS thread cannot be spawned.
    pub fn spawn(client: ApiClient) -> Result<Self> {
        let (request_tx, mut request_rx) = tokio::sync::mpsc::unbounded_channel::<ApiRequest>();
        let (outcome_tx, outcome_rx) = std::sync::mpsc::channel::<ApiOutcome>();

        std::thread::Builder::new()
            .name("api-worker".to_string())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(e) => {
                        tracing::error!(error = %e, "failed to build worker runtime");
                        return;
                    }
                };

                let client = Arc::new(client);

                runtime.block_on(async move {
                    while let Some(request) = request_rx.recv().await {
                        let client = Arc::clone(&client);
                        let outcome_tx = outcome_tx.clone();

                        tokio::spawn(async move {
                            tracing::debug!(tag = ?request.tag, "executing api request");
                            let result = client.call(&request.spec).await;
                            let outcome = ApiOutcome {
                                tag: request.tag,
                                result,
                            };
                            // The receiver is gone only during shutdown.
                            let _ = outcome_tx.send(outcome);
                        });
                    }
                    tracing::debug!("api worker channel closed, shutting down");
                });
            })
            .map_err(|e| ConsoleError::Worker(format!("failed to spawn api worker: {e}")))?;

        Ok(Self {
            requests: request_tx,
            outcomes: outcome_rx,
        })
    }

    /// Queues a request for execution.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker thread has shut down.
    pub fn submit(&self, request: ApiRequest) -> Result<()> {
        self.requests
            .send(request)
            .map_err(|_| ConsoleError::Worker("api worker is not running".to_string()))
    }

    /// Takes one completed outcome, if any is waiting.
    #[must_use]
    pub fn try_recv(&self) -> Option<ApiOutcome> {
        self.outcomes.try_recv().ok()
    }
}
