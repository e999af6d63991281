//! Condenser client: transport, submission, and polling against the
//! condensation service.
mod client;
mod download;
mod poller;
mod submit;
mod transport;
mod types;

pub use client::ClientHandle;
pub use download::{download_filename, ensure_download_dir, DownloadError, DownloadWriter};
pub use poller::Poller;
pub use submit::submit;
pub use transport::{ClientSettings, CondenseTransport, ReqwestTransport};
pub use types::{
    ClientEvent, JobId, JobStatus, SubmissionId, SubmissionInput, SubmissionKind, SubmitError,
    SubmitResponse, TransportError,
};
