use std::time::{Duration, Instant};

use condenser_client::{
    ClientEvent, ClientHandle, ClientSettings, JobStatus, SubmissionInput, SubmissionKind,
    SubmitError, SubmitResponse,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn wait_event(handle: &ClientHandle, timeout: Duration) -> Option<ClientEvent> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(event) = handle.try_recv() {
            return Some(event);
        }
        if Instant::now() >= deadline {
            return None;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn submission_to_completion_over_the_wire() {
    // ClientHandle owns its own runtime; drive the mock server from a
    // throwaway runtime and keep the test itself synchronous like the shell.
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-url"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"job_id": "j9"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/status/j9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "pending"})))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/status/j9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"status": "completed", "condensed_content": "done"}),
            ))
            .mount(&server)
            .await;
        server
    });

    let settings = ClientSettings {
        base_url: server.uri(),
        poll_interval: Duration::from_millis(20),
        ..ClientSettings::default()
    };
    let handle = ClientHandle::new(settings).expect("client handle");

    handle.submit(
        1,
        SubmissionInput::Url {
            url: "https://example.com/doc".to_string(),
        },
    );

    let event = wait_event(&handle, Duration::from_secs(5)).expect("settle event");
    assert_eq!(
        event,
        ClientEvent::SubmissionSettled {
            submission: 1,
            kind: SubmissionKind::Url,
            result: Ok(SubmitResponse::Job {
                id: "j9".to_string()
            }),
        }
    );

    handle.start_polling("j9");

    let event = wait_event(&handle, Duration::from_secs(5)).expect("pending event");
    assert_eq!(
        event,
        ClientEvent::StatusObserved {
            job_id: "j9".to_string(),
            status: JobStatus::Pending,
        }
    );

    let event = wait_event(&handle, Duration::from_secs(5)).expect("completed event");
    assert_eq!(
        event,
        ClientEvent::StatusObserved {
            job_id: "j9".to_string(),
            status: JobStatus::Completed {
                text: "done".to_string()
            },
        }
    );
}

#[test]
fn empty_submission_settles_as_validation_error() {
    // No server needed: validation rejects before any request is built.
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let server = runtime.block_on(MockServer::start());

    let settings = ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    };
    let handle = ClientHandle::new(settings).expect("client handle");

    handle.submit(
        7,
        SubmissionInput::Url {
            url: String::new(),
        },
    );

    let event = wait_event(&handle, Duration::from_secs(5)).expect("settle event");
    assert_eq!(
        event,
        ClientEvent::SubmissionSettled {
            submission: 7,
            kind: SubmissionKind::Url,
            result: Err(SubmitError::EmptyInput),
        }
    );

    let received = runtime.block_on(async { server.received_requests().await });
    assert_eq!(received.expect("recorded requests").len(), 0);
}
