//! Application state

use proofmint_core::Address;
use proofmint_registry::CredentialRegistry;
use proofmint_store::{FileSnapshotStore, RegistrySnapshot, SnapshotStore, StoreError};
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard};

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,

    /// The registry; writers hold the write lock for the whole operation
    registry: Arc<RwLock<CredentialRegistry>>,

    /// Snapshot persistence (None = in-memory only)
    store: Option<Arc<dyn SnapshotStore>>,

    pub started_at: std::time::Instant,
}

impl AppState {
    /// Fresh registry, no persistence
    pub fn new(config: ServerConfig) -> Self {
        let registry = fresh_registry(&config);
        Self::with_storage(config, registry, None)
    }

    pub fn with_storage(
        config: ServerConfig,
        registry: CredentialRegistry,
        store: Option<Arc<dyn SnapshotStore>>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(RwLock::new(registry)),
            store,
            started_at: std::time::Instant::now(),
        }
    }

    /// Build state from configuration, restoring the snapshot if one exists
    pub async fn bootstrap(config: ServerConfig) -> Result<Self, StoreError> {
        let Some(path) = config.snapshot_path.clone() else {
            tracing::info!("No snapshot path configured, registry is in-memory only");
            return Ok(Self::new(config));
        };

        let store: Arc<dyn SnapshotStore> = Arc::new(FileSnapshotStore::new(&path));
        Self::restore(config, store).await
    }

    /// Build state on top of an existing store
    pub async fn restore(
        config: ServerConfig,
        store: Arc<dyn SnapshotStore>,
    ) -> Result<Self, StoreError> {
        let registry = match store.load().await? {
            Some(snapshot) => {
                tracing::info!(
                    saved_at = %snapshot.saved_at,
                    events = snapshot.event_count,
                    "Restored registry snapshot"
                );
                snapshot.into_registry()
            }
            None => {
                let registry = fresh_registry(&config);
                store.save(&RegistrySnapshot::capture(&registry)).await?;
                registry
            }
        };

        Ok(Self::with_storage(config, registry, Some(store)))
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, CredentialRegistry> {
        self.registry.read().await
    }

    /// Apply a mutation under the write lock.
    ///
    /// With a store configured the mutation runs on a copy, which replaces
    /// the live registry only once its snapshot is saved. Operations that
    /// never change the registry belong under [`AppState::read`] instead.
    pub async fn mutate<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut CredentialRegistry) -> proofmint_registry::Result<T>,
    {
        let mut registry = self.registry.write().await;

        match &self.store {
            None => Ok(op(&mut registry)?),
            Some(store) => {
                let mut next = registry.clone();
                let value = op(&mut next)?;
                store.save(&RegistrySnapshot::capture(&next)).await?;
                *registry = next;
                Ok(value)
            }
        }
    }
}

fn fresh_registry(config: &ServerConfig) -> CredentialRegistry {
    let admin = config.admin.unwrap_or_else(|| {
        let generated = Address::random();
        tracing::warn!(
            admin = %generated,
            "PROOFMINT_ADMIN not set, generated an ephemeral admin address"
        );
        generated
    });

    CredentialRegistry::with_metadata(admin, config.name.clone(), config.symbol.clone())
}
