use crate::state::{JobId, JobStatus, SubmissionId, SubmitReply};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    UrlInputChanged(String),
    /// User picked a local file to upload.
    FileSelected { filename: String, bytes: Vec<u8> },
    /// User asked to submit the current URL input.
    SubmitUrlClicked,
    /// User asked to upload the selected file.
    SubmitFileClicked,
    /// The submission request resolved, one way or the other.
    ///
    /// Failures arrive pre-formatted as display text; the shell owns the
    /// mapping from error kinds to wording.
    SubmissionSettled {
        submission: SubmissionId,
        result: Result<SubmitReply, String>,
    },
    /// One poll of the status endpoint resolved for `job_id`.
    PollObserved { job_id: JobId, status: JobStatus },
    /// User asked to save the condensed text to disk.
    DownloadClicked,
    /// The shell is shutting down, or the user abandoned the current job.
    CancelRequested,
    /// Fallback for placeholder wiring.
    NoOp,
}
