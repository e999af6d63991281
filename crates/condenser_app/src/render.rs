use condenser_core::{AppViewModel, OperationOutcome};

/// One line per observable transition while work is in flight.
pub fn render_progress(view: &AppViewModel) {
    if let OperationOutcome::InFlight = view.outcome {
        match &view.active_job {
            Some(job) => println!(
                "Job {} pending ({} {} so far)...",
                job.id,
                view.polls_observed,
                if view.polls_observed == 1 { "poll" } else { "polls" }
            ),
            None => println!("Submitting..."),
        }
    }
}

/// Terminal outcome: exactly one of nothing, the condensed text, or an
/// error line.
pub fn render_final(view: &AppViewModel) {
    match &view.outcome {
        OperationOutcome::Idle => {}
        OperationOutcome::InFlight => println!("Interrupted while still in flight."),
        OperationOutcome::Success { text } => {
            println!("--- condensed ---");
            println!("{text}");
        }
        OperationOutcome::Error { message } => eprintln!("Error: {message}"),
    }
}
