use crate::{CondenseTransport, SubmissionInput, SubmitError, SubmitResponse};

/// Validate and dispatch one submission.
///
/// Exactly one transport call per invocation, and none at all for input
/// rejected locally. Superseding an earlier submission is the caller's
/// concern, not this function's.
pub async fn submit(
    transport: &dyn CondenseTransport,
    input: SubmissionInput,
) -> Result<SubmitResponse, SubmitError> {
    if input.is_empty() {
        return Err(SubmitError::EmptyInput);
    }
    match input {
        SubmissionInput::Url { url } => {
            let url = validate_url(&url)?;
            Ok(transport.submit_url(&url).await?)
        }
        SubmissionInput::File { filename, bytes } => {
            Ok(transport.submit_file(&filename, bytes).await?)
        }
    }
}

fn validate_url(raw: &str) -> Result<String, SubmitError> {
    let trimmed = raw.trim();
    let parsed =
        url::Url::parse(trimmed).map_err(|_| SubmitError::InvalidUrl(trimmed.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed.to_string()),
        _ => Err(SubmitError::InvalidUrl(trimmed.to_string())),
    }
}
