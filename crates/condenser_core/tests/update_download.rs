use condenser_core::{update, AppState, Effect, Msg, SubmitReply};

fn submit_file_and_settle(text: &str) -> AppState {
    let state = AppState::new();
    let (state, _) = update(
        state,
        Msg::FileSelected {
            filename: "report.md".to_string(),
            bytes: b"# report".to_vec(),
        },
    );
    let (state, _) = update(state, Msg::SubmitFileClicked);
    let (state, _) = update(
        state,
        Msg::SubmissionSettled {
            submission: 1,
            result: Ok(SubmitReply::Immediate {
                text: text.to_string(),
            }),
        },
    );
    state
}

#[test]
fn download_reproduces_success_text_exactly() {
    let state = submit_file_and_settle("alpha beta\n\u{00e9}");
    let (_state, effects) = update(state, Msg::DownloadClicked);

    assert_eq!(
        effects,
        vec![Effect::SaveDownload {
            input_name: Some("report.md".to_string()),
            bytes: "alpha beta\n\u{00e9}".as_bytes().to_vec(),
        }]
    );
}

#[test]
fn download_ignored_outside_success() {
    let state = AppState::new();
    let (_state, effects) = update(state, Msg::DownloadClicked);

    assert!(effects.is_empty());
}
