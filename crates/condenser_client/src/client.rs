use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use client_logging::client_debug;

use crate::poller::Poller;
use crate::submit::submit;
use crate::transport::{ClientSettings, CondenseTransport, ReqwestTransport};
use crate::{ClientEvent, JobId, SubmissionId, SubmissionInput, TransportError};

enum ClientCommand {
    Submit {
        submission: SubmissionId,
        input: SubmissionInput,
    },
    StartPolling {
        job_id: JobId,
    },
    StopPolling,
}

/// Bridge between the synchronous shell and the async client runtime.
///
/// Commands go in over a channel; [`ClientEvent`]s come back over another.
/// Dropping every handle shuts the runtime thread down and cancels any
/// active polling session.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<ClientEvent>>>,
}

impl Clone for ClientHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            event_rx: self.event_rx.clone(),
        }
    }
}

impl ClientHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, TransportError> {
        let poll_interval = settings.poll_interval;
        let transport = Arc::new(ReqwestTransport::new(settings)?);
        Ok(Self::with_transport(transport, poll_interval))
    }

    /// Runs the same runtime loop against any transport implementation.
    pub fn with_transport(
        transport: Arc<dyn CondenseTransport>,
        poll_interval: Duration,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || run_loop(transport, poll_interval, cmd_rx, event_tx));

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn submit(&self, submission: SubmissionId, input: SubmissionInput) {
        let _ = self.cmd_tx.send(ClientCommand::Submit { submission, input });
    }

    pub fn start_polling(&self, job_id: impl Into<JobId>) {
        let _ = self.cmd_tx.send(ClientCommand::StartPolling {
            job_id: job_id.into(),
        });
    }

    pub fn stop_polling(&self) {
        let _ = self.cmd_tx.send(ClientCommand::StopPolling);
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

fn run_loop(
    transport: Arc<dyn CondenseTransport>,
    poll_interval: Duration,
    cmd_rx: mpsc::Receiver<ClientCommand>,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let mut poller = Poller::new(transport.clone(), poll_interval, runtime.handle().clone());

    while let Ok(command) = cmd_rx.recv() {
        match command {
            ClientCommand::Submit { submission, input } => {
                client_debug!("Dispatching submission #{submission}");
                let transport = transport.clone();
                let event_tx = event_tx.clone();
                let kind = input.kind();
                runtime.spawn(async move {
                    let result = submit(&*transport, input).await;
                    let _ = event_tx.send(ClientEvent::SubmissionSettled {
                        submission,
                        kind,
                        result,
                    });
                });
            }
            ClientCommand::StartPolling { job_id } => {
                poller.start(job_id, event_tx.clone());
            }
            ClientCommand::StopPolling => poller.cancel(),
        }
    }
}
