use std::sync::{mpsc, Arc};
use std::time::Duration;

use client_logging::{client_debug, client_info, client_warn};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::{ClientEvent, CondenseTransport, JobId, JobStatus};

/// Fixed-interval polling driver for the one active job.
///
/// The timer of the active session is owned here as a cancellation token.
/// Starting a new session or cancelling always releases the previous token
/// first, so at most one timer is ever armed and a superseded session can
/// never emit again. Every observation carries the job id it was issued
/// for, letting the consumer discard anything already queued for a stale
/// job.
pub struct Poller {
    transport: Arc<dyn CondenseTransport>,
    interval: Duration,
    runtime: Handle,
    session: Option<PollSession>,
}

struct PollSession {
    job_id: JobId,
    cancel: CancellationToken,
}

impl Poller {
    pub fn new(transport: Arc<dyn CondenseTransport>, interval: Duration, runtime: Handle) -> Self {
        Self {
            transport,
            interval,
            runtime,
            session: None,
        }
    }

    /// Begin polling `job_id`, superseding any earlier session.
    pub fn start(&mut self, job_id: JobId, events: mpsc::Sender<ClientEvent>) {
        self.cancel();
        client_info!("Polling started for job {}", job_id);

        let cancel = CancellationToken::new();
        self.session = Some(PollSession {
            job_id: job_id.clone(),
            cancel: cancel.clone(),
        });

        let transport = self.transport.clone();
        let interval = self.interval;
        self.runtime.spawn(async move {
            run_session(transport, job_id, interval, cancel, events).await;
        });
    }

    /// Stop the active session, if any. Synchronous: after this returns no
    /// further observation for the old job can be emitted.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            client_info!("Polling stopped for job {}", session.job_id);
            session.cancel.cancel();
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_session(
    transport: Arc<dyn CondenseTransport>,
    job_id: JobId,
    interval: Duration,
    cancel: CancellationToken,
    events: mpsc::Sender<ClientEvent>,
) {
    loop {
        // First check is one interval out; later checks re-arm only after
        // the previous poll has resolved.
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(interval) => {}
        }

        let observed = tokio::select! {
            _ = cancel.cancelled() => return,
            result = transport.fetch_status(&job_id) => result,
        };

        match observed {
            Ok(JobStatus::Pending) => {
                client_debug!("Job {} still pending", job_id);
                let _ = events.send(ClientEvent::StatusObserved {
                    job_id: job_id.clone(),
                    status: JobStatus::Pending,
                });
            }
            Ok(status) => {
                client_info!("Job {} reached a terminal status", job_id);
                let _ = events.send(ClientEvent::StatusObserved {
                    job_id: job_id.clone(),
                    status,
                });
                return;
            }
            Err(error) => {
                client_warn!("Status poll failed for job {}: {}", job_id, error);
                let _ = events.send(ClientEvent::PollFailed {
                    job_id: job_id.clone(),
                    error,
                });
                return;
            }
        }
    }
}
