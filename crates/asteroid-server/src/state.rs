use anyhow::Result;
use asteroid_auth::Authenticator;
use asteroid_identity::IdentityService;
use asteroid_notes::NoteService;
use asteroid_sessions::SessionService;
use asteroid_storage::{DocumentRepository, MemoryLogStore, OpContext, RocksDbLogStore, Store};
use std::sync::Arc;

use crate::config::{Config, StoreBackend};

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub repository: Arc<DocumentRepository>,
    pub identity_service: Arc<IdentityService>,
    pub auth_service: Arc<Authenticator<IdentityService>>,
    pub session_service: Arc<SessionService<IdentityService>>,
    pub note_service: Arc<NoteService<IdentityService>>,
}

impl AppState {
    /// Open the configured store and wire the services around it
    pub async fn new(config: Config) -> Result<Self> {
        let store: Arc<dyn Store> = match config.store_backend {
            StoreBackend::RocksDb => {
                std::fs::create_dir_all(&config.store_path)?;
                Arc::new(RocksDbLogStore::open(&config.store_path, config.store_name.clone())?)
            }
            StoreBackend::Memory => Arc::new(MemoryLogStore::new(config.store_name.clone())),
        };

        let state = Self::with_store(config, store);
        state.repository.load(&state.op_context()).await?;
        Ok(state)
    }

    /// Wire the services around an already opened store
    pub fn with_store(config: Config, store: Arc<dyn Store>) -> Self {
        let repository = Arc::new(DocumentRepository::new(store));

        let identity_service = Arc::new(IdentityService::new(repository.clone()));

        let auth_service = Arc::new(Authenticator::new(identity_service.clone()));

        let session_service = Arc::new(SessionService::with_ttl(
            identity_service.clone(),
            config.jwt_secret.clone(),
            config.session_ttl,
        ));

        let note_service = Arc::new(NoteService::new(
            repository.clone(),
            identity_service.clone(),
        ));

        AppState {
            config,
            repository,
            identity_service,
            auth_service,
            session_service,
            note_service,
        }
    }

    /// Per-request bound for store operations
    pub fn op_context(&self) -> OpContext {
        OpContext::new(self.config.store_timeout)
    }

    /// Close the store
    pub async fn shutdown(&self) -> Result<()> {
        self.repository.close().await?;
        tracing::info!(address = %self.repository.address(), "Store closed");
        Ok(())
    }
}
