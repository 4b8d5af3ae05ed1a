use reqwest::StatusCode;
use serde::Serialize;
use tracing::{Level, debug, enabled};

/// Logs a decoded backend payload as indented JSON under `what`, tagged with its HTTP status.
///
/// Nothing is serialized unless DEBUG is enabled.
pub(crate) fn debug_backend_payload<T: Serialize>(what: &str, status: StatusCode, payload: &T) {
    if !enabled!(Level::DEBUG) {
        return;
    }

    match serde_json::to_string_pretty(payload) {
        Ok(body) => debug!(%status, %body, "{what}"),
        Err(error) => debug!(%status, %error, "{what} (payload not serializable)"),
    }
}
