use std::fs;
use std::sync::mpsc;

use anyhow::{Context, Result};
use client_logging::client_info;
use condenser_client::{ensure_download_dir, ClientHandle, DownloadWriter};
use condenser_core::{update, AppState, Msg, OperationOutcome};

use crate::config::Args;
use crate::effects::EffectRunner;
use crate::render;

pub fn run(args: Args) -> Result<()> {
    let settings = args.client_settings();
    client_info!("Using condensation service at {}", settings.base_url);

    let client = ClientHandle::new(settings).context("initialize service client")?;
    ensure_download_dir(&args.output_dir).context("prepare output directory")?;
    let downloads = DownloadWriter::new(args.output_dir.clone());

    let (msg_tx, msg_rx) = mpsc::channel();
    let runner = EffectRunner::new(client, downloads, msg_tx);

    let mut state = AppState::new();

    // Seed the shell with the command-line input, then submit it. With no
    // input at all the submit click surfaces the validation error.
    let seed = match (&args.file, &args.url) {
        (Some(path), _) => {
            let bytes =
                fs::read(path).with_context(|| format!("read {}", path.display()))?;
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload.txt".to_string());
            vec![Msg::FileSelected { filename, bytes }, Msg::SubmitFileClicked]
        }
        (None, Some(url)) => vec![
            Msg::UrlInputChanged(url.clone()),
            Msg::SubmitUrlClicked,
        ],
        (None, None) => vec![Msg::SubmitUrlClicked],
    };
    for msg in seed {
        dispatch(&mut state, msg, &runner);
    }

    // Message loop: stop once the outcome is terminal or every sender of
    // messages has gone away.
    while !is_terminal(&state) {
        let Ok(msg) = msg_rx.recv() else { break };
        dispatch(&mut state, msg, &runner);
    }

    if !is_terminal(&state) {
        // Channel closed mid-flight; release the polling session.
        dispatch(&mut state, Msg::CancelRequested, &runner);
    } else if args.download
        && matches!(state.view().outcome, OperationOutcome::Success { .. })
    {
        dispatch(&mut state, Msg::DownloadClicked, &runner);
    }

    let view = state.view();
    render::render_final(&view);
    if matches!(view.outcome, OperationOutcome::Error { .. }) {
        std::process::exit(1);
    }
    Ok(())
}

fn is_terminal(state: &AppState) -> bool {
    matches!(
        state.view().outcome,
        OperationOutcome::Success { .. } | OperationOutcome::Error { .. }
    )
}

fn dispatch(state: &mut AppState, msg: Msg, runner: &EffectRunner) {
    let current = std::mem::take(state);
    let (mut next, effects) = update(current, msg);
    runner.run(effects);
    if next.consume_dirty() {
        render::render_progress(&next.view());
    }
    *state = next;
}
