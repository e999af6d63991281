use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::{JobStatus, SubmitResponse, TransportError};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Cap on streamed binary replies from `/upload`.
    pub max_download_bytes: u64,
    pub poll_interval: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8030".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_download_bytes: 10 * 1024 * 1024,
            poll_interval: Duration::from_secs(3),
        }
    }
}

/// HTTP boundary to the condensation service. One request per call, no
/// retries.
#[async_trait]
pub trait CondenseTransport: Send + Sync {
    /// Multipart POST of a document to `/upload`, field name `file`.
    async fn submit_file(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<SubmitResponse, TransportError>;

    /// JSON POST of a remote address to `/process-url`.
    async fn submit_url(&self, url: &str) -> Result<SubmitResponse, TransportError>;

    /// JSON GET of `/status/{job_id}`.
    async fn fetch_status(&self, job_id: &str) -> Result<JobStatus, TransportError>;
}

#[derive(Debug)]
pub struct ReqwestTransport {
    base: url::Url,
    client: reqwest::Client,
    max_download_bytes: u64,
}

impl ReqwestTransport {
    pub fn new(settings: ClientSettings) -> Result<Self, TransportError> {
        let base = url::Url::parse(&settings.base_url)
            .map_err(|err| TransportError::InvalidBaseUrl(err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(TransportError::InvalidBaseUrl(settings.base_url));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| TransportError::Network(err.to_string()))?;

        Ok(Self {
            base,
            client,
            max_download_bytes: settings.max_download_bytes,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> url::Url {
        let mut out = self.base.clone();
        if let Ok(mut path) = out.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        out
    }
}

#[derive(Serialize)]
struct UrlPayload<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct SubmitPayload {
    job_id: Option<String>,
    condensed_text: Option<String>,
}

#[derive(Deserialize)]
struct StatusPayload {
    status: String,
    condensed_content: Option<String>,
    message: Option<String>,
}

#[async_trait]
impl CondenseTransport for ReqwestTransport {
    async fn submit_file(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<SubmitResponse, TransportError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.endpoint(&["upload"]))
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        interpret_submit_response(response, self.max_download_bytes).await
    }

    async fn submit_url(&self, url: &str) -> Result<SubmitResponse, TransportError> {
        let response = self
            .client
            .post(self.endpoint(&["process-url"]))
            .json(&UrlPayload { url })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        interpret_submit_response(response, self.max_download_bytes).await
    }

    async fn fetch_status(&self, job_id: &str) -> Result<JobStatus, TransportError> {
        let response = self
            .client
            .get(self.endpoint(&["status", job_id]))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::HttpStatus(status.as_u16()));
        }

        let payload: StatusPayload = response
            .json()
            .await
            .map_err(|err| TransportError::MalformedResponse(err.to_string()))?;

        match payload.status.as_str() {
            // Older service builds report "processing" for a queued job.
            "pending" | "processing" => Ok(JobStatus::Pending),
            "completed" => {
                let text = payload.condensed_content.ok_or_else(|| {
                    TransportError::MalformedResponse(
                        "completed status without condensed_content".to_string(),
                    )
                })?;
                Ok(JobStatus::Completed { text })
            }
            "error" => Ok(JobStatus::Failed {
                message: payload
                    .message
                    .unwrap_or_else(|| "processing failed".to_string()),
            }),
            other => Err(TransportError::MalformedResponse(format!(
                "unknown status {other:?}"
            ))),
        }
    }
}

/// A submission response is a job id or the condensed text when the body is
/// JSON, and a streamed file otherwise.
async fn interpret_submit_response(
    response: reqwest::Response,
    max_download_bytes: u64,
) -> Result<SubmitResponse, TransportError> {
    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::HttpStatus(status.as_u16()));
    }

    if is_json_body(&response) {
        let payload: SubmitPayload = response
            .json()
            .await
            .map_err(|err| TransportError::MalformedResponse(err.to_string()))?;
        if let Some(id) = payload.job_id {
            return Ok(SubmitResponse::Job { id });
        }
        if let Some(text) = payload.condensed_text {
            return Ok(SubmitResponse::Immediate { text });
        }
        return Err(TransportError::MalformedResponse(
            "json body has neither job_id nor condensed_text".to_string(),
        ));
    }

    let bytes = read_capped_body(response, max_download_bytes).await?;
    Ok(SubmitResponse::Binary { bytes })
}

fn is_json_body(response: &reqwest::Response) -> bool {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let ct = value.split(';').next().unwrap_or(value).trim();
            ct.eq_ignore_ascii_case("application/json")
        })
        .unwrap_or(false)
}

async fn read_capped_body(
    response: reqwest::Response,
    max_bytes: u64,
) -> Result<Bytes, TransportError> {
    if let Some(content_len) = response.content_length() {
        if content_len > max_bytes {
            return Err(TransportError::TooLarge { max_bytes });
        }
    }

    let mut buf = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        if buf.len() as u64 + chunk.len() as u64 > max_bytes {
            return Err(TransportError::TooLarge { max_bytes });
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(Bytes::from(buf))
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::Timeout(err.to_string());
    }
    TransportError::Network(err.to_string())
}
