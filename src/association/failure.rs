use crate::error::ClientError;
use thiserror::Error as ThisError;

/// User-facing outcome categories of a failed association.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum AssociationFailure {
    #[error("Scanned code is not a device code: {0}")]
    InvalidPayload(String),

    #[error("Device already associated or not found: {0}")]
    AlreadyAssociatedOrNotFound(String),

    #[error("Connectivity error: {0}")]
    Connectivity(String),

    #[error("Session expired")]
    Unauthorized,

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl AssociationFailure {
    pub fn user_message(&self) -> String {
        match self {
            AssociationFailure::InvalidPayload(_) => {
                "This code is not a valid device code.".to_string()
            }
            AssociationFailure::AlreadyAssociatedOrNotFound(message) if !message.trim().is_empty() => {
                message.clone()
            }
            AssociationFailure::AlreadyAssociatedOrNotFound(_) => {
                "This device is already associated or does not exist.".to_string()
            }
            AssociationFailure::Connectivity(_) => {
                "Could not reach the server. Check your connection and try again.".to_string()
            }
            AssociationFailure::Unauthorized => {
                "Your session has expired. Please sign in again.".to_string()
            }
            AssociationFailure::Unknown(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<ClientError> for AssociationFailure {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::InvalidPayload(detail) => AssociationFailure::InvalidPayload(detail),
            ClientError::NotFoundOrConflict { message, .. } => {
                AssociationFailure::AlreadyAssociatedOrNotFound(message)
            }
            ClientError::Connectivity(detail) => AssociationFailure::Connectivity(detail),
            ClientError::Unauthorized => AssociationFailure::Unauthorized,
            // Only the login exchange produces this; treat it as unexpected here.
            ClientError::InvalidCredentials => {
                AssociationFailure::Unknown("invalid credentials".to_string())
            }
            ClientError::Unknown(detail) => AssociationFailure::Unknown(detail),
        }
    }
}
