use crate::error::ClientError;
use async_trait::async_trait;

/// Source of the device's push-notification token.
#[async_trait]
pub trait PushRegistrar: Send + Sync {
    /// Returns the opaque token to forward to the backend, or `None` when the platform has none.
    async fn push_token(&self) -> Result<Option<String>, ClientError>;
}

/// Registrar for platforms without push delivery.
pub struct NoopPushRegistrar;

#[async_trait]
impl PushRegistrar for NoopPushRegistrar {
    async fn push_token(&self) -> Result<Option<String>, ClientError> {
        Ok(None)
    }
}
