use crate::config::BackendConfig;
use crate::error::ClientError;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONNECTION, HeaderMap, HeaderValue};
use url::Url;

use super::ApiCall;

/// Builds the shared reqwest client from backend settings.
///
/// The configured timeout bounds every request so no call can hang indefinitely.
pub fn build_http_client(cfg: &BackendConfig) -> Result<reqwest::Client, ClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let mut builder = reqwest::Client::builder()
        .user_agent(cfg.user_agent.clone())
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(cfg.connect_timeout())
        .timeout(cfg.timeout());

    if let Some(proxy_url) = cfg.proxy.as_ref() {
        let proxy = reqwest::Proxy::all(proxy_url.as_str())
            .map_err(|e| ClientError::Unknown(format!("invalid proxy url: {e}")))?;
        builder = builder.proxy(proxy);
    }

    if !cfg.enable_multiplexing {
        headers.insert(CONNECTION, HeaderValue::from_static("close"));
        builder = builder.http1_only();
    }

    builder
        .default_headers(headers)
        .build()
        .map_err(|e| ClientError::Unknown(format!("failed to build HTTP client: {e}")))
}

/// Stateless request builder and executor for the backend REST API.
///
/// Knows endpoints and payloads but nothing about sessions; callers pass the token explicitly.
#[derive(Clone)]
pub struct BackendApi {
    client: reqwest::Client,
    base_url: Url,
}

impl BackendApi {
    pub fn new(client: reqwest::Client, base_url: Url) -> Result<Self, ClientError> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Unknown(format!(
                "backend base url cannot be a base: {base_url}"
            )));
        }
        Ok(Self { client, base_url })
    }

    pub fn from_config(cfg: &BackendConfig) -> Result<Self, ClientError> {
        Self::new(build_http_client(cfg)?, cfg.base_url.clone())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves path segments against the base URL, percent-encoding each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn build_request(
        &self,
        call: &ApiCall,
        bearer_token: Option<&str>,
    ) -> Result<reqwest::Request, reqwest::Error> {
        let mut request = self
            .client
            .request(call.method(), self.endpoint(&call.segments()));
        if let Some(token) = bearer_token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        call.attach_body(request).build()
    }

    pub async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response, reqwest::Error> {
        self.client.execute(request).await
    }
}
