use bytes::Bytes;
use thiserror::Error;

pub type SubmissionId = u64;
pub type JobId = String;

/// Input artifact for one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionInput {
    File { filename: String, bytes: Vec<u8> },
    Url { url: String },
}

impl SubmissionInput {
    /// True when there is nothing to send: a blank URL, or a file with no
    /// name and no content.
    pub fn is_empty(&self) -> bool {
        match self {
            SubmissionInput::Url { url } => url.trim().is_empty(),
            SubmissionInput::File { filename, bytes } => filename.is_empty() && bytes.is_empty(),
        }
    }

    pub fn kind(&self) -> SubmissionKind {
        match self {
            SubmissionInput::File { .. } => SubmissionKind::File,
            SubmissionInput::Url { .. } => SubmissionKind::Url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    File,
    Url,
}

/// What the service said to a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResponse {
    /// Asynchronous mode: a job was queued; poll `id` for the result.
    Job { id: JobId },
    /// Synchronous mode: the condensed text came back directly.
    Immediate { text: String },
    /// Synchronous mode: a processed file was streamed back.
    Binary { bytes: Bytes },
}

/// One observation of a job's status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Completed { text: String },
    Failed { message: String },
}

/// Transport-level failure: the request never completed cleanly. The
/// adapter performs no retries; retry policy belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("response too large (max {max_bytes} bytes)")]
    TooLarge { max_bytes: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("nothing to submit: no file or url")]
    EmptyInput,
    #[error("not an absolute http(s) url: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Events flowing back from the client runtime to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    SubmissionSettled {
        submission: SubmissionId,
        kind: SubmissionKind,
        result: Result<SubmitResponse, SubmitError>,
    },
    StatusObserved {
        job_id: JobId,
        status: JobStatus,
    },
    /// The status endpoint itself failed; terminal for the job.
    PollFailed {
        job_id: JobId,
        error: TransportError,
    },
}
