use reqwest::StatusCode;
use thiserror::Error as ThisError;

use super::IsRetryable;

/// Closed error taxonomy surfaced to every caller of the sync layer.
///
/// Transport-specific shapes (reqwest errors, raw status codes, storage failures) are folded into
/// one of these variants at the boundary and never travel further up.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum ClientError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Connectivity error: {0}")]
    Connectivity(String),

    #[error("Unauthorized; session invalidated")]
    Unauthorized,

    #[error("Rejected with status {status}: {message}")]
    NotFoundOrConflict { status: StatusCode, message: String },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

/// Payload-free discriminant of [`ClientError`], convenient for matching in UI code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCredentials,
    Connectivity,
    Unauthorized,
    NotFoundOrConflict,
    InvalidPayload,
    Unknown,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::InvalidCredentials => ErrorKind::InvalidCredentials,
            ClientError::Connectivity(_) => ErrorKind::Connectivity,
            ClientError::Unauthorized => ErrorKind::Unauthorized,
            ClientError::NotFoundOrConflict { .. } => ErrorKind::NotFoundOrConflict,
            ClientError::InvalidPayload(_) => ErrorKind::InvalidPayload,
            ClientError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Message suitable for showing to the end user.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::InvalidCredentials => "E-mail or password is incorrect.".to_string(),
            ClientError::Connectivity(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            ClientError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            ClientError::NotFoundOrConflict { message, .. } if !message.trim().is_empty() => {
                message.clone()
            }
            ClientError::NotFoundOrConflict { .. } => {
                "The request was rejected by the server.".to_string()
            }
            ClientError::InvalidPayload(_) => "This code is not a valid device code.".to_string(),
            ClientError::Unknown(_) => "Something went wrong. Please try again.".to_string(),
        }
    }

    pub(crate) fn not_in_list(id: &str) -> Self {
        ClientError::NotFoundOrConflict {
            status: StatusCode::NOT_FOUND,
            message: format!("Device {id} is not in this list."),
        }
    }
}

impl IsRetryable for ClientError {
    fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Connectivity(_))
    }
}
