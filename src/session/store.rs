use crate::api::{ApiCall, BackendApi};
use crate::error::{ClientError, StoreError};
use crate::transport::{classify_login_status, classify_reqwest_error, read_error_response};
use crate::types::Session;
use aquasync_schema::{LoginRequest, LoginResponse, PushTokenRequest};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell, watch};
use tracing::{debug, info, warn};

use super::{PushRegistrar, SESSION_STORAGE_KEY, SessionStorage, TOKEN_STORAGE_KEY};

/// Owner of the authenticated session.
///
/// Login, logout and 401 invalidation all go through one publish point guarded by an async
/// mutex: storage is written first, then the new value is published to subscribers. At most one
/// session is live at a time.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    api: BackendApi,
    storage: Arc<dyn SessionStorage>,
    registrar: Arc<dyn PushRegistrar>,
    current: watch::Sender<Option<Session>>,
    publish_lock: Mutex<()>,
    restored: OnceCell<()>,
}

impl SessionStore {
    pub fn new(
        api: BackendApi,
        storage: Arc<dyn SessionStorage>,
        registrar: Arc<dyn PushRegistrar>,
    ) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                api,
                storage,
                registrar,
                current,
                publish_lock: Mutex::new(()),
                restored: OnceCell::new(),
            }),
        }
    }

    /// Current session, read synchronously.
    pub fn current(&self) -> Option<Session> {
        self.inner.current.borrow().clone()
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.inner
            .current
            .borrow()
            .as_ref()
            .map(|s| s.bearer_token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.current.borrow().is_some()
    }

    /// Receiver notified after every login, logout and invalidation.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.inner.current.subscribe()
    }

    /// Loads the persisted session. Storage is read at most once per store; later calls return
    /// the in-memory value.
    pub async fn restore(&self) -> Option<Session> {
        self.inner
            .restored
            .get_or_init(|| async {
                let _guard = self.inner.publish_lock.lock().await;
                match self.read_persisted().await {
                    Ok(Some(session)) => {
                        info!(user_id = %session.user_id, "Session restored from storage");
                        self.inner.current.send_replace(Some(session));
                    }
                    Ok(None) => debug!("No stored session"),
                    Err(e) => warn!(error = %e, "Failed to read stored session"),
                }
            })
            .await;

        self.current()
    }

    /// Exchanges credentials for a session, persists it and publishes it.
    ///
    /// A 4xx from the backend is [`ClientError::InvalidCredentials`]; no response at all is
    /// [`ClientError::Connectivity`]. Push-token registration is attempted but never fails the
    /// login.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let call = ApiCall::Login(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        });
        let request = self
            .inner
            .api
            .build_request(&call, None)
            .map_err(|e| ClientError::Unknown(format!("failed to build request: {e}")))?;

        let resp = self.inner.api.execute(request).await.map_err(|e| {
            let err = classify_reqwest_error(&e);
            warn!(email, error = %err, "Login request failed");
            err
        })?;

        if !resp.status().is_success() {
            let (status, message) = read_error_response(resp).await;
            let err = classify_login_status(status, message);
            warn!(email, %status, error = %err, "Login rejected");
            return Err(err);
        }

        let body: LoginResponse = resp
            .json()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;
        let session = Session::from(body);

        {
            let _guard = self.inner.publish_lock.lock().await;
            self.persist(&session).await?;
            self.register_push_token(&session).await;
            self.inner.current.send_replace(Some(session.clone()));
        }

        info!(user_id = %session.user_id, "Signed in");
        Ok(session)
    }

    /// Clears storage and publishes `None`. Calling it while signed out is a no-op.
    pub async fn logout(&self) {
        let _guard = self.inner.publish_lock.lock().await;
        self.clear_and_publish().await;
        info!("Signed out");
    }

    /// Drops the session after a 401, unless the rejected token has already been replaced.
    pub async fn invalidate(&self, rejected_token: &str) {
        let _guard = self.inner.publish_lock.lock().await;
        let is_live = self
            .inner
            .current
            .borrow()
            .as_ref()
            .is_some_and(|s| s.bearer_token == rejected_token);
        if !is_live {
            debug!("401 for a token that is no longer live; ignored");
            return;
        }

        self.clear_and_publish().await;
        warn!("Session invalidated after 401");
    }

    async fn read_persisted(&self) -> Result<Option<Session>, StoreError> {
        let Some(raw) = self.inner.storage.load(SESSION_STORAGE_KEY).await? else {
            return Ok(None);
        };

        let mut session: Session = match serde_json::from_str(&raw) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Stored session is unreadable; discarding it");
                self.inner.storage.remove(SESSION_STORAGE_KEY).await?;
                self.inner.storage.remove(TOKEN_STORAGE_KEY).await?;
                return Ok(None);
            }
        };

        if let Some(token) = self.inner.storage.load(TOKEN_STORAGE_KEY).await? {
            session.bearer_token = token;
        }
        Ok(Some(session))
    }

    async fn persist(&self, session: &Session) -> Result<(), StoreError> {
        let raw = serde_json::to_string(session)?;
        self.inner.storage.save(SESSION_STORAGE_KEY, raw).await?;
        self.inner
            .storage
            .save(TOKEN_STORAGE_KEY, session.bearer_token.clone())
            .await
    }

    async fn clear_and_publish(&self) {
        for key in [SESSION_STORAGE_KEY, TOKEN_STORAGE_KEY] {
            if let Err(e) = self.inner.storage.remove(key).await {
                warn!(key, error = %e, "Failed to clear stored session key");
            }
        }
        self.inner.current.send_if_modified(|current| current.take().is_some());
    }

    async fn register_push_token(&self, session: &Session) {
        let push_token = match self.inner.registrar.push_token().await {
            Ok(Some(token)) => token,
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "Push registrar failed; continuing without push");
                return;
            }
        };

        let call = ApiCall::PushToken(PushTokenRequest { token: push_token });
        let request = match self
            .inner
            .api
            .build_request(&call, Some(&session.bearer_token))
        {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Failed to build push-token request");
                return;
            }
        };

        match self.inner.api.execute(request).await {
            Ok(resp) if resp.status().is_success() => debug!("Push token registered"),
            Ok(resp) => warn!(status = %resp.status(), "Push token registration rejected"),
            Err(e) => warn!(error = %classify_reqwest_error(&e), "Push token registration failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryStorage, NoopPushRegistrar};
    use url::Url;

    fn store_with(storage: Arc<MemoryStorage>) -> SessionStore {
        let api = BackendApi::new(
            reqwest::Client::new(),
            Url::parse("http://127.0.0.1:9/").expect("invalid url"),
        )
        .expect("valid base url");
        SessionStore::new(api, storage, Arc::new(NoopPushRegistrar))
    }

    fn session(token: &str) -> Session {
        Session {
            user_id: "1".into(),
            display_name: "Ana".into(),
            email: "ana@example.com".into(),
            bearer_token: token.into(),
            token_kind: "bearer".into(),
        }
    }

    #[tokio::test]
    async fn restore_without_storage_is_unauthenticated() {
        let store = store_with(Arc::new(MemoryStorage::new()));
        assert_eq!(store.restore().await, None);
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn restore_reads_storage_once() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .save(
                SESSION_STORAGE_KEY,
                serde_json::to_string(&session("t-1")).expect("serialize"),
            )
            .await
            .expect("seed storage");
        let store = store_with(storage.clone());

        assert_eq!(store.restore().await, Some(session("t-1")));

        storage
            .remove(SESSION_STORAGE_KEY)
            .await
            .expect("clear storage");
        assert_eq!(store.restore().await, Some(session("t-1")));
    }

    #[tokio::test]
    async fn restore_discards_unreadable_session() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .save(SESSION_STORAGE_KEY, "{not json".into())
            .await
            .expect("seed storage");
        let store = store_with(storage.clone());

        assert_eq!(store.restore().await, None);
        assert!(storage.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn logout_is_idempotent_and_notifies_once() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .save(
                SESSION_STORAGE_KEY,
                serde_json::to_string(&session("t-1")).expect("serialize"),
            )
            .await
            .expect("seed storage");
        let store = store_with(storage.clone());
        store.restore().await;

        let mut rx = store.subscribe();
        rx.mark_unchanged();

        store.logout().await;
        assert!(rx.has_changed().expect("sender alive"));
        rx.mark_unchanged();

        store.logout().await;
        assert!(!rx.has_changed().expect("sender alive"));
        assert_eq!(store.current(), None);
        assert!(storage.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn invalidate_ignores_stale_tokens() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .save(
                SESSION_STORAGE_KEY,
                serde_json::to_string(&session("fresh")).expect("serialize"),
            )
            .await
            .expect("seed storage");
        let store = store_with(storage.clone());
        store.restore().await;

        store.invalidate("stale").await;
        assert_eq!(store.bearer_token().as_deref(), Some("fresh"));

        store.invalidate("fresh").await;
        assert_eq!(store.current(), None);
        assert!(storage.snapshot().await.is_empty());
    }
}
