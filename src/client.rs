use crate::api::BackendApi;
use crate::association::DeviceAssociationFlow;
use crate::config::Config;
use crate::error::ClientError;
use crate::session::{AccountApi, PushRegistrar, SessionStorage, SessionStore};
use crate::sync::{ListScope, ResourceSynchronizer};
use crate::transport::AuthorizedTransport;
use std::sync::Arc;
use tracing::info;

/// Entry point wiring configuration, storage, session and transport together.
///
/// Cheap to clone; every clone shares the same session.
#[derive(Clone)]
pub struct AquaClient {
    cfg: Arc<Config>,
    session: SessionStore,
    transport: Arc<AuthorizedTransport>,
    account: AccountApi,
}

impl AquaClient {
    /// Builds a client whose session is persisted in the SQLite store named by
    /// `basic.storage_url`.
    pub async fn connect(cfg: Config, registrar: Arc<dyn PushRegistrar>) -> Result<Self, ClientError> {
        let db = crate::db::spawn(&cfg.basic.storage_url).await?;
        Self::with_storage(cfg, Arc::new(db), registrar)
    }

    /// Builds a client over any session storage.
    pub fn with_storage(
        cfg: Config,
        storage: Arc<dyn SessionStorage>,
        registrar: Arc<dyn PushRegistrar>,
    ) -> Result<Self, ClientError> {
        let backend = &cfg.backend;

        // Log the effective backend config here so `main` stays wiring-only.
        info!(
            base_url = %backend.base_url,
            proxy = %backend.proxy.as_ref().map_or("<none>", |u| u.as_str()),
            timeout_secs = backend.timeout_secs,
            connect_timeout_secs = backend.connect_timeout_secs,
            retry_max_times = backend.retry_max_times,
            enable_multiplexing = backend.enable_multiplexing,
            "Backend config (effective)"
        );

        let api = BackendApi::from_config(backend)?;
        let session = SessionStore::new(api.clone(), storage, registrar);
        let transport = Arc::new(AuthorizedTransport::new(api.clone(), session.clone(), backend));
        let account = AccountApi::new(api);

        Ok(Self {
            cfg: Arc::new(cfg),
            session,
            transport,
            account,
        })
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn account(&self) -> &AccountApi {
        &self.account
    }

    pub fn transport(&self) -> Arc<AuthorizedTransport> {
        self.transport.clone()
    }

    /// A fresh list for one screen, using the scope's default favorite discipline.
    pub fn synchronizer(&self, scope: ListScope) -> ResourceSynchronizer<AuthorizedTransport> {
        ResourceSynchronizer::new(self.transport.clone(), scope)
    }

    pub fn association_flow(&self) -> DeviceAssociationFlow<AuthorizedTransport> {
        DeviceAssociationFlow::new(self.transport.clone())
    }
}
