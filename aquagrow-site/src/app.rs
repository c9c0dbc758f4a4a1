//! Wiring of store, gateway and admin gate from a [`SiteConfig`].

use aquagrow_gateway::{ContentGateway, LlmBackend};
use aquagrow_store::{RecordStore, SledStorage, StoragePort};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::functions::FunctionsServer;
use crate::session::{AdminConsole, AdminGate, AdminSession, AuthError};

/// A running site: the record store and content gateway share nothing.
pub struct Site {
    config: SiteConfig,
    store: Arc<RecordStore>,
    gateway: Arc<ContentGateway>,
    gate: AdminGate,
}

impl Site {
    /// Open the sled database under `data_dir` and build the configured backend.
    pub fn open(config: SiteConfig) -> Result<Self, SiteError> {
        std::fs::create_dir_all(&config.data_dir)?;
        let storage = SledStorage::open(config.records_db_path())?;
        let backend = config.llm.build_backend()?;
        info!(data_dir = %config.data_dir.display(), http_port = config.http_port, "Site opened");
        Ok(Self::from_parts(config, Arc::new(storage), backend))
    }

    /// Open only the record side, for admin work without a content backend.
    pub fn open_admin(config: &SiteConfig) -> Result<(AdminGate, AdminConsole), SiteError> {
        std::fs::create_dir_all(&config.data_dir)?;
        let storage = SledStorage::open(config.records_db_path())?;
        let store = RecordStore::new(Arc::new(storage)).with_config(config.store.clone());
        Ok((
            AdminGate::new(config.admin.clone()),
            AdminConsole::new(Arc::new(store)),
        ))
    }

    /// Assemble a site over explicit storage and backend.
    pub fn from_parts(
        config: SiteConfig,
        storage: Arc<dyn StoragePort>,
        backend: Arc<dyn LlmBackend>,
    ) -> Self {
        let store = RecordStore::new(storage).with_config(config.store.clone());
        let gateway = ContentGateway::with_config(backend, config.content.clone());
        let gate = AdminGate::new(config.admin.clone());

        Self {
            config,
            store: Arc::new(store),
            gateway: Arc::new(gateway),
            gate,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn gateway(&self) -> &ContentGateway {
        &self.gateway
    }

    pub fn console(&self) -> AdminConsole {
        AdminConsole::new(self.store.clone())
    }

    pub fn login(&self, username: &str, password: &str) -> Result<AdminSession, AuthError> {
        self.gate.login(username, password)
    }

    pub fn logout(&self, session: AdminSession) {
        self.gate.logout(session)
    }

    /// Functions server bound to all interfaces on the configured port.
    pub fn functions_server(&self) -> FunctionsServer {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        FunctionsServer::new(self.gateway.clone(), addr)
    }
}
