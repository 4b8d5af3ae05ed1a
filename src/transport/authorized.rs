use crate::api::{ApiCall, BackendApi};
use crate::config::BackendConfig;
use crate::error::{ClientError, IsRetryable};
use crate::session::SessionStore;
use backon::{ExponentialBuilder, Retryable};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use super::policy::{classify_reqwest_error, classify_status, read_error_response};

/// Sends backend calls on behalf of the current session.
///
/// The bearer token is read from the [`SessionStore`] on every attempt, so a new login is picked
/// up by the very next call. A 401 is never retried: it invalidates the session that produced it
/// and surfaces [`ClientError::Unauthorized`]. With no live session, calls fail fast without
/// touching the network.
#[derive(Clone)]
pub struct AuthorizedTransport {
    api: BackendApi,
    session: SessionStore,
    retry_policy: ExponentialBuilder,
}

impl AuthorizedTransport {
    pub fn new(api: BackendApi, session: SessionStore, cfg: &BackendConfig) -> Self {
        let retry_policy = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(300))
            .with_max_times(cfg.retry_max_times)
            .with_jitter();

        Self {
            api,
            session,
            retry_policy,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Executes a call and returns the successful response.
    ///
    /// Reads are retried on connectivity failures; mutations are sent exactly once.
    pub async fn execute(&self, call: &ApiCall) -> Result<reqwest::Response, ClientError> {
        if !call.is_idempotent() {
            return self.execute_once(call).await;
        }

        let op = move || self.execute_once(call);
        op.retry(self.retry_policy)
            .when(|err: &ClientError| err.is_retryable())
            .notify(|err, dur: Duration| {
                warn!(call = call.name(), error = %err, "Retrying read in {:?}", dur);
            })
            .await
    }

    /// Executes a call and decodes its JSON body.
    pub async fn fetch_json<T: DeserializeOwned>(&self, call: &ApiCall) -> Result<T, ClientError> {
        let resp = self.execute(call).await?;
        resp.json::<T>()
            .await
            .map_err(|e| classify_reqwest_error(&e))
    }

    /// Executes a call whose response body is irrelevant.
    pub async fn send(&self, call: &ApiCall) -> Result<(), ClientError> {
        self.execute(call).await.map(|_| ())
    }

    async fn execute_once(&self, call: &ApiCall) -> Result<reqwest::Response, ClientError> {
        let Some(token) = self.session.bearer_token() else {
            debug!(call = call.name(), "No live session; call not sent");
            return Err(ClientError::Unauthorized);
        };

        let request = self
            .api
            .build_request(call, Some(&token))
            .map_err(|e| ClientError::Unknown(format!("failed to build request: {e}")))?;

        let resp = self
            .api
            .execute(request)
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        if status == StatusCode::UNAUTHORIZED {
            warn!(call = call.name(), "Backend rejected bearer token; invalidating session");
            self.session.invalidate(&token).await;
            return Err(ClientError::Unauthorized);
        }

        let (status, message) = read_error_response(resp).await;
        let err = classify_status(status, message);
        warn!(call = call.name(), %status, error = %err, "Backend call failed");
        Err(err)
    }
}
