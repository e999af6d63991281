use crate::state::{normalize_submit_url, JobStatus, OperationOutcome, SubmitReply};
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlInputChanged(text) => {
            state.set_url_input(text);
            Vec::new()
        }
        Msg::FileSelected { filename, bytes } => {
            state.select_file(filename, bytes);
            Vec::new()
        }
        Msg::SubmitUrlClicked => {
            // Any submission attempt supersedes the job being tracked, even
            // one that fails validation.
            let mut effects = Vec::new();
            if state.supersede_active() {
                effects.push(Effect::StopPolling);
            }
            let raw = state.url_input().trim().to_string();
            if raw.is_empty() {
                state.settle_error("Nothing to submit: enter a URL first.");
                return (state, effects);
            }
            let Some(url) = normalize_submit_url(&raw) else {
                state.settle_error("Enter a valid http(s) URL.");
                return (state, effects);
            };
            let submission = state.begin_submission(None);
            effects.push(Effect::SubmitUrl { submission, url });
            effects
        }
        Msg::SubmitFileClicked => {
            let mut effects = Vec::new();
            if state.supersede_active() {
                effects.push(Effect::StopPolling);
            }
            let Some(file) = state.selected_file().cloned() else {
                state.settle_error("Nothing to submit: choose a file first.");
                return (state, effects);
            };
            if file.filename.is_empty() && file.bytes.is_empty() {
                state.settle_error("Nothing to submit: choose a file first.");
                return (state, effects);
            }
            let submission = state.begin_submission(Some(file.filename.clone()));
            effects.push(Effect::SubmitFile {
                submission,
                filename: file.filename,
                bytes: file.bytes,
            });
            effects
        }
        Msg::SubmissionSettled { submission, result } => {
            if !state.take_pending_submission(submission) {
                // Reply for a superseded submission; a newer one owns the outcome.
                return (state, Vec::new());
            }
            match result {
                Ok(SubmitReply::Job {
                    job_id,
                    accepted_utc,
                }) => {
                    state.accept_job(job_id.clone(), accepted_utc);
                    vec![Effect::StartPolling { job_id }]
                }
                Ok(SubmitReply::Immediate { text }) => {
                    state.settle_success(text);
                    Vec::new()
                }
                Ok(SubmitReply::Binary { bytes }) => {
                    let input_name = state.last_input_name();
                    let text = String::from_utf8_lossy(&bytes).into_owned();
                    state.settle_success(text);
                    vec![Effect::SaveDownload { input_name, bytes }]
                }
                Err(message) => {
                    state.settle_error(message);
                    Vec::new()
                }
            }
        }
        Msg::PollObserved { job_id, status } => {
            if !state.is_active_job(&job_id) {
                // Stale poll for a superseded or finished job; ignore it.
                return (state, Vec::new());
            }
            match status {
                JobStatus::Pending => {
                    state.note_poll();
                }
                JobStatus::Completed { text } => {
                    state.settle_success(text);
                }
                JobStatus::Failed { message } => {
                    state.settle_error(message);
                }
            }
            Vec::new()
        }
        Msg::DownloadClicked => match state.outcome() {
            OperationOutcome::Success { text } => vec![Effect::SaveDownload {
                input_name: state.last_input_name(),
                bytes: text.clone().into_bytes(),
            }],
            _ => Vec::new(),
        },
        Msg::CancelRequested => {
            if state.reset_to_idle() {
                vec![Effect::StopPolling]
            } else {
                Vec::new()
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
