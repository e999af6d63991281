use crate::view_model::AppViewModel;

pub type SubmissionId = u64;
pub type JobId = String;

/// One observation of an asynchronous job's status.
///
/// Each poll replaces the previous status wholesale; there is no partial
/// update on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Completed { text: String },
    Failed { message: String },
}

/// Successful submission response, as seen by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReply {
    /// The service queued the input; poll `job_id` for the result.
    Job { job_id: JobId, accepted_utc: String },
    /// The service processed synchronously and returned the text directly.
    Immediate { text: String },
    /// The service streamed a processed file back.
    Binary { bytes: Vec<u8> },
}

/// Handle for the one job the shell may be tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub id: JobId,
    pub submitted_utc: String,
}

/// What the presentation layer shows. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OperationOutcome {
    #[default]
    Idle,
    InFlight,
    Success {
        text: String,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectedFile {
    pub(crate) filename: String,
    pub(crate) bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    url_input: String,
    selected_file: Option<SelectedFile>,
    /// Name of the input behind the latest submission, used for download
    /// filenames. `None` for URL submissions.
    last_input_name: Option<String>,
    outcome: OperationOutcome,
    active_job: Option<JobHandle>,
    /// Submission currently awaiting its response. Replies tagged with any
    /// other id are stale and must be ignored.
    pending_submission: Option<SubmissionId>,
    next_submission: SubmissionId,
    polls_observed: u32,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            url_input: self.url_input.clone(),
            selected_filename: self.selected_file.as_ref().map(|f| f.filename.clone()),
            outcome: self.outcome.clone(),
            active_job: self.active_job.clone(),
            polls_observed: self.polls_observed,
            in_flight: matches!(self.outcome, OperationOutcome::InFlight),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        if self.url_input != text {
            self.url_input = text;
            self.dirty = true;
        }
    }

    pub(crate) fn url_input(&self) -> &str {
        &self.url_input
    }

    pub(crate) fn select_file(&mut self, filename: String, bytes: Vec<u8>) {
        self.selected_file = Some(SelectedFile { filename, bytes });
        self.dirty = true;
    }

    pub(crate) fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub(crate) fn outcome(&self) -> &OperationOutcome {
        &self.outcome
    }

    pub(crate) fn last_input_name(&self) -> Option<String> {
        self.last_input_name.clone()
    }

    /// Clears the active job ahead of a fresh submission. Returns whether a
    /// polling session was live and must be stopped.
    pub(crate) fn supersede_active(&mut self) -> bool {
        self.active_job.take().is_some()
    }

    /// Registers a fresh submission and returns its id. Ids increase
    /// monotonically, so a late reply for an earlier submission can never
    /// match the pending one.
    pub(crate) fn begin_submission(&mut self, input_name: Option<String>) -> SubmissionId {
        self.next_submission += 1;
        self.pending_submission = Some(self.next_submission);
        self.last_input_name = input_name;
        self.outcome = OperationOutcome::InFlight;
        self.polls_observed = 0;
        self.dirty = true;
        self.next_submission
    }

    /// Consumes the pending-submission tag if `submission` matches it.
    pub(crate) fn take_pending_submission(&mut self, submission: SubmissionId) -> bool {
        if self.pending_submission == Some(submission) {
            self.pending_submission = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn accept_job(&mut self, job_id: JobId, accepted_utc: String) {
        self.active_job = Some(JobHandle {
            id: job_id,
            submitted_utc: accepted_utc,
        });
        self.dirty = true;
    }

    pub(crate) fn is_active_job(&self, job_id: &str) -> bool {
        self.active_job
            .as_ref()
            .is_some_and(|handle| handle.id == job_id)
    }

    pub(crate) fn note_poll(&mut self) {
        self.polls_observed += 1;
        self.dirty = true;
    }

    pub(crate) fn settle_success(&mut self, text: String) {
        self.active_job = None;
        self.pending_submission = None;
        self.outcome = OperationOutcome::Success { text };
        self.dirty = true;
    }

    pub(crate) fn settle_error(&mut self, message: impl Into<String>) {
        self.active_job = None;
        self.pending_submission = None;
        self.outcome = OperationOutcome::Error {
            message: message.into(),
        };
        self.dirty = true;
    }

    /// Drops any in-flight submission or job. Returns whether there was
    /// anything to drop.
    pub(crate) fn reset_to_idle(&mut self) -> bool {
        let had_work =
            self.active_job.take().is_some() | self.pending_submission.take().is_some();
        if had_work {
            self.outcome = OperationOutcome::Idle;
            self.polls_observed = 0;
            self.dirty = true;
        }
        had_work
    }
}

/// Returns the canonical form of a submittable URL, or `None` when the text
/// is not an absolute http(s) URL.
pub fn normalize_submit_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = url::Url::parse(trimmed).ok()?;
    match parsed.scheme() {
        "http" | "https" => Some(parsed.to_string()),
        _ => None,
    }
}
