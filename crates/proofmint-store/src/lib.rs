//! ProofMint Store
//!
//! Snapshot persistence for the credential registry. The whole registry is
//! serialized after each successful mutation and restored at startup.

use chrono::{DateTime, Utc};
use proofmint_registry::CredentialRegistry;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

/// Snapshot format version written by this crate
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// A persisted copy of the registry.
///
/// Saving borrows the live registry; loading always yields an owned one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySnapshot<'a> {
    pub version: u32,

    /// When the snapshot was taken
    pub saved_at: DateTime<Utc>,

    /// Journal length at snapshot time
    pub event_count: u64,

    pub registry: Cow<'a, CredentialRegistry>,
}

impl<'a> RegistrySnapshot<'a> {
    pub fn capture(registry: &'a CredentialRegistry) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            event_count: registry.event_count(),
            registry: Cow::Borrowed(registry),
        }
    }

    /// Take ownership of the restored registry
    pub fn into_registry(self) -> CredentialRegistry {
        self.registry.into_owned()
    }
}

impl RegistrySnapshot<'static> {
    fn decode(bytes: &[u8]) -> Result<Self, StoreError> {
        let snapshot: RegistrySnapshot<'static> = serde_json::from_slice(bytes)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion(snapshot.version));
        }
        Ok(snapshot)
    }
}

/// Trait for snapshot storage backends
#[async_trait::async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Persist a snapshot, replacing any previous one
    async fn save(&self, snapshot: &RegistrySnapshot<'_>) -> Result<(), StoreError>;

    /// Load the latest snapshot, if one exists
    async fn load(&self) -> Result<Option<RegistrySnapshot<'static>>, StoreError>;

    /// Remove the stored snapshot
    async fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory snapshot store (for development/testing)
#[derive(Default)]
pub struct InMemorySnapshotStore {
    encoded: RwLock<Option<Vec<u8>>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn save(&self, snapshot: &RegistrySnapshot<'_>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(snapshot)?;
        *self.encoded.write().await = Some(bytes);
        Ok(())
    }

    async fn load(&self) -> Result<Option<RegistrySnapshot<'static>>, StoreError> {
        match self.encoded.read().await.as_deref() {
            Some(bytes) => RegistrySnapshot::decode(bytes).map(Some),
            None => Ok(None),
        }
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.encoded.write().await = None;
        Ok(())
    }
}

/// JSON file snapshot store.
///
/// Writes go to a sibling temp file, are flushed to disk, and only then
/// renamed over the target. A crash mid-write leaves the previous snapshot
/// intact.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "snapshot".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait::async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn save(&self, snapshot: &RegistrySnapshot<'_>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(snapshot)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.temp_path();
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(
            path = %self.path.display(),
            events = snapshot.event_count,
            "Snapshot saved"
        );
        Ok(())
    }

    async fn load(&self) -> Result<Option<RegistrySnapshot<'static>>, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => RegistrySnapshot::decode(&bytes).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
