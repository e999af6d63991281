use crate::state::{JobId, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitUrl {
        submission: SubmissionId,
        url: String,
    },
    SubmitFile {
        submission: SubmissionId,
        filename: String,
        bytes: Vec<u8>,
    },
    StartPolling {
        job_id: JobId,
    },
    StopPolling,
    SaveDownload {
        input_name: Option<String>,
        bytes: Vec<u8>,
    },
}
