use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use client_logging::{client_info, client_warn};
use condenser_client::{
    download_filename, ClientEvent, ClientHandle, DownloadWriter, JobStatus as WireJobStatus,
    SubmissionInput, SubmissionKind, SubmitError, SubmitResponse,
};
use condenser_core::{Effect, JobStatus, Msg, SubmitReply};

/// Executes core effects against the service client and feeds client events
/// back into the shell as messages.
pub struct EffectRunner {
    client: ClientHandle,
    downloads: DownloadWriter,
}

impl EffectRunner {
    pub fn new(client: ClientHandle, downloads: DownloadWriter, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self { client, downloads };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitUrl { submission, url } => {
                    client_info!("SubmitUrl submission={} url={}", submission, url);
                    self.client.submit(submission, SubmissionInput::Url { url });
                }
                Effect::SubmitFile {
                    submission,
                    filename,
                    bytes,
                } => {
                    client_info!(
                        "SubmitFile submission={} filename={} bytes={}",
                        submission,
                        filename,
                        bytes.len()
                    );
                    self.client
                        .submit(submission, SubmissionInput::File { filename, bytes });
                }
                Effect::StartPolling { job_id } => self.client.start_polling(job_id),
                Effect::StopPolling => self.client.stop_polling(),
                Effect::SaveDownload { input_name, bytes } => {
                    let filename = download_filename(input_name.as_deref());
                    match self.downloads.write(&filename, &bytes) {
                        Ok(path) => client_info!("Saved condensed result to {:?}", path),
                        Err(err) => client_warn!("Could not save condensed result: {}", err),
                    }
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let client = self.client.clone();
        thread::spawn(move || loop {
            if let Some(event) = client.try_recv() {
                if msg_tx.send(translate_event(event)).is_err() {
                    return;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

/// Single place that turns client events into core messages, including the
/// mapping from error kinds to display text.
fn translate_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::SubmissionSettled {
            submission,
            kind,
            result,
        } => Msg::SubmissionSettled {
            submission,
            result: match result {
                Ok(SubmitResponse::Job { id }) => Ok(SubmitReply::Job {
                    job_id: id,
                    accepted_utc: Utc::now().to_rfc3339(),
                }),
                Ok(SubmitResponse::Immediate { text }) => Ok(SubmitReply::Immediate { text }),
                Ok(SubmitResponse::Binary { bytes }) => Ok(SubmitReply::Binary {
                    bytes: bytes.to_vec(),
                }),
                Err(err) => Err(submit_error_text(kind, &err)),
            },
        },
        ClientEvent::StatusObserved { job_id, status } => Msg::PollObserved {
            job_id,
            status: match status {
                WireJobStatus::Pending => JobStatus::Pending,
                WireJobStatus::Completed { text } => JobStatus::Completed { text },
                WireJobStatus::Failed { message } => JobStatus::Failed { message },
            },
        },
        ClientEvent::PollFailed { job_id, error } => {
            client_warn!("Job {} poll failed: {}", job_id, error);
            Msg::PollObserved {
                job_id,
                status: JobStatus::Failed {
                    message: "An error occurred while checking the job status.".to_string(),
                },
            }
        }
    }
}

fn submit_error_text(kind: SubmissionKind, err: &SubmitError) -> String {
    match err {
        SubmitError::EmptyInput => "Nothing to submit: choose a file or enter a URL first.".to_string(),
        SubmitError::InvalidUrl(_) => "Enter a valid http(s) URL.".to_string(),
        SubmitError::Transport(transport_err) => {
            client_warn!("Submission failed: {}", transport_err);
            match kind {
                SubmissionKind::File => "An error occurred while processing the file.".to_string(),
                SubmissionKind::Url => "An error occurred while processing the URL.".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use condenser_client::TransportError;

    #[test]
    fn transport_failure_maps_to_generic_text_per_input_kind() {
        let err = SubmitError::Transport(TransportError::HttpStatus(500));
        assert_eq!(
            submit_error_text(SubmissionKind::File, &err),
            "An error occurred while processing the file."
        );
        assert_eq!(
            submit_error_text(SubmissionKind::Url, &err),
            "An error occurred while processing the URL."
        );
    }

    #[test]
    fn poll_failure_becomes_terminal_failed_status() {
        let msg = translate_event(ClientEvent::PollFailed {
            job_id: "j1".to_string(),
            error: TransportError::Network("connection reset".to_string()),
        });
        match msg {
            Msg::PollObserved { job_id, status } => {
                assert_eq!(job_id, "j1");
                assert!(matches!(status, JobStatus::Failed { .. }));
            }
            other => panic!("unexpected msg {other:?}"),
        }
    }

    #[test]
    fn service_failure_keeps_service_message() {
        let msg = translate_event(ClientEvent::StatusObserved {
            job_id: "j1".to_string(),
            status: WireJobStatus::Failed {
                message: "Error during processing".to_string(),
            },
        });
        match msg {
            Msg::PollObserved { status, .. } => {
                assert_eq!(
                    status,
                    JobStatus::Failed {
                        message: "Error during processing".to_string()
                    }
                );
            }
            other => panic!("unexpected msg {other:?}"),
        }
    }
}
