use std::sync::Once;

use condenser_core::{update, AppState, Effect, JobStatus, Msg, OperationOutcome, SubmitReply};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

/// Submit a URL and settle it into an active job with the given id.
fn state_with_job(job_id: &str, submission: u64, url: &str) -> AppState {
    let state = AppState::new();
    let (state, _) = update(state, Msg::UrlInputChanged(url.to_string()));
    let (state, _) = update(state, Msg::SubmitUrlClicked);
    let (state, _) = update(
        state,
        Msg::SubmissionSettled {
            submission,
            result: Ok(SubmitReply::Job {
                job_id: job_id.to_string(),
                accepted_utc: "2026-08-04T12:00:00Z".to_string(),
            }),
        },
    );
    state
}

fn poll(state: AppState, job_id: &str, status: JobStatus) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::PollObserved {
            job_id: job_id.to_string(),
            status,
        },
    )
}

#[test]
fn pending_polls_then_completion() {
    init_logging();
    let state = state_with_job("j1", 1, "https://example.com/doc");

    let (state, effects) = poll(state, "j1", JobStatus::Pending);
    assert!(effects.is_empty());
    let (state, effects) = poll(state, "j1", JobStatus::Pending);
    assert!(effects.is_empty());
    assert_eq!(state.view().polls_observed, 2);
    assert!(state.view().in_flight);

    let (next, effects) = poll(
        state,
        "j1",
        JobStatus::Completed {
            text: "condensed".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        next.view().outcome,
        OperationOutcome::Success {
            text: "condensed".to_string()
        }
    );
    assert!(next.view().active_job.is_none());
}

#[test]
fn failed_poll_settles_error() {
    init_logging();
    let state = state_with_job("j1", 1, "https://example.com/doc");

    let (next, effects) = poll(
        state,
        "j1",
        JobStatus::Failed {
            message: "Error during processing".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        next.view().outcome,
        OperationOutcome::Error {
            message: "Error during processing".to_string()
        }
    );
    assert!(next.view().active_job.is_none());
}

#[test]
fn stale_job_completion_never_overwrites_newer_job() {
    init_logging();
    // Job j1 is superseded by a second submission that becomes job j2.
    let state = state_with_job("j1", 1, "https://a.example.com");
    let (state, _) = update(
        state,
        Msg::UrlInputChanged("https://b.example.com".to_string()),
    );
    let (state, _) = update(state, Msg::SubmitUrlClicked);
    let (mut state, _) = update(
        state,
        Msg::SubmissionSettled {
            submission: 2,
            result: Ok(SubmitReply::Job {
                job_id: "j2".to_string(),
                accepted_utc: "2026-08-04T12:00:05Z".to_string(),
            }),
        },
    );
    assert!(state.consume_dirty());

    // j1's in-flight poll resolves late; its result must be discarded.
    let (mut state, effects) = poll(
        state,
        "j1",
        JobStatus::Completed {
            text: "X".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert!(state.view().in_flight);
    assert!(!state.consume_dirty());

    let (next, _) = poll(
        state,
        "j2",
        JobStatus::Completed {
            text: "Y".to_string(),
        },
    );
    assert_eq!(
        next.view().outcome,
        OperationOutcome::Success {
            text: "Y".to_string()
        }
    );
}

#[test]
fn poll_after_terminal_state_discarded() {
    init_logging();
    let state = state_with_job("j1", 1, "https://example.com/doc");
    let (mut state, _) = poll(
        state,
        "j1",
        JobStatus::Completed {
            text: "first".to_string(),
        },
    );
    assert!(state.consume_dirty());

    let (mut next, effects) = poll(
        state,
        "j1",
        JobStatus::Completed {
            text: "second".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(
        next.view().outcome,
        OperationOutcome::Success {
            text: "first".to_string()
        }
    );
    assert!(!next.consume_dirty());
}

#[test]
fn cancel_stops_polling_and_clears_job() {
    init_logging();
    let state = state_with_job("j1", 1, "https://example.com/doc");

    let (mut state, effects) = update(state, Msg::CancelRequested);
    assert_eq!(effects, vec![Effect::StopPolling]);
    assert_eq!(state.view().outcome, OperationOutcome::Idle);
    assert!(state.view().active_job.is_none());
    assert!(state.consume_dirty());

    // A poll that was already in flight resolves afterwards; nothing moves.
    let (mut state, effects) = poll(
        state,
        "j1",
        JobStatus::Completed {
            text: "late".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().outcome, OperationOutcome::Idle);
    assert!(!state.consume_dirty());

    // Cancelling with nothing in flight is a no-op.
    let (mut next, effects) = update(state, Msg::CancelRequested);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}
