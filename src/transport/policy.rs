//! Boundary where reqwest errors and HTTP statuses become [`ClientError`]s.

use crate::error::ClientError;
use crate::utils::logging::debug_backend_payload;
use aquasync_schema::BackendErrorBody;
use reqwest::StatusCode;

pub const ERROR_BODY_PREVIEW_CHARS: usize = 300;

/// Classifies a failure that produced no usable response.
pub fn classify_reqwest_error(err: &reqwest::Error) -> ClientError {
    if err.is_timeout() || err.is_connect() || err.is_request() || err.is_body() {
        ClientError::Connectivity(err.to_string())
    } else if err.is_decode() {
        ClientError::Unknown(format!("malformed response body: {err}"))
    } else {
        ClientError::Unknown(err.to_string())
    }
}

/// Classifies a non-success status of an authenticated call.
pub fn classify_status(status: StatusCode, message: Option<String>) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ClientError::Connectivity(format!("backend responded {status}"))
        }
        s if s.is_client_error() => ClientError::NotFoundOrConflict {
            status: s,
            message: message.unwrap_or_default(),
        },
        s => ClientError::Unknown(match message {
            Some(m) => format!("backend responded {s}: {m}"),
            None => format!("backend responded {s}"),
        }),
    }
}

/// Credential exchange treats every 4xx as a rejected login.
pub fn classify_login_status(status: StatusCode, message: Option<String>) -> ClientError {
    if status.is_client_error() && status != StatusCode::REQUEST_TIMEOUT {
        ClientError::InvalidCredentials
    } else {
        classify_status(status, message)
    }
}

/// Drains an error response and extracts the backend's message, if it sent a structured one.
pub async fn read_error_response(resp: reqwest::Response) -> (StatusCode, Option<String>) {
    let status = resp.status();
    let bytes = resp.bytes().await.unwrap_or_default();

    if let Ok(body) = serde_json::from_slice::<BackendErrorBody>(&bytes) {
        debug_backend_payload("Backend structured error", status, &body);
        return (status, body.first_message().map(str::to_owned));
    }

    let raw_body = String::from_utf8_lossy(&bytes);
    tracing::debug!(
        %status,
        body = %format!("{:.len$}", raw_body, len = ERROR_BODY_PREVIEW_CHARS),
        "Backend unstructured error"
    );
    (status, None)
}
