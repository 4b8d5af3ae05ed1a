use crate::api::{ApiCall, BackendApi};
use crate::error::ClientError;
use crate::transport::{classify_reqwest_error, classify_status, read_error_response};
use aquasync_schema::{PasswordResetRequest, RegisterRequest};
use tracing::{info, warn};

/// Unauthenticated account operations: sign-up and password reset.
#[derive(Clone)]
pub struct AccountApi {
    api: BackendApi,
}

impl AccountApi {
    pub fn new(api: BackendApi) -> Self {
        Self { api }
    }

    /// Creates a user. A 4xx (e.g. e-mail already taken) is `NotFoundOrConflict`.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<(), ClientError> {
        let call = ApiCall::Register(RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        });
        self.send(&call).await?;
        info!(email, "Account registered");
        Ok(())
    }

    /// Asks the backend to e-mail a password reset link.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), ClientError> {
        let call = ApiCall::PasswordReset(PasswordResetRequest {
            email: email.to_string(),
        });
        self.send(&call).await?;
        info!(email, "Password reset requested");
        Ok(())
    }

    async fn send(&self, call: &ApiCall) -> Result<(), ClientError> {
        let request = self
            .api
            .build_request(call, None)
            .map_err(|e| ClientError::Unknown(format!("failed to build request: {e}")))?;
        let resp = self
            .api
            .execute(request)
            .await
            .map_err(|e| classify_reqwest_error(&e))?;
        if resp.status().is_success() {
            return Ok(());
        }

        let (status, message) = read_error_response(resp).await;
        let err = classify_status(status, message);
        warn!(call = call.name(), %status, error = %err, "Account call failed");
        Err(err)
    }
}
