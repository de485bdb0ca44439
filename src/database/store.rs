use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

/// Errors raised while loading or saving a document
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

/// A whole-document store: every read returns the full document and every
/// write replaces it.
#[async_trait]
pub trait DocumentStore<D>: Send + Sync
where
    D: Send + Sync + 'static,
{
    async fn load(&self) -> Result<D, StoreError>;

    async fn save(&self, document: &D) -> Result<(), StoreError>;
}

/// Document persisted as a single pretty-printed JSON file
pub struct JsonFileStore<D> {
    path: PathBuf,
    _phantom: PhantomData<fn() -> D>,
}

impl<D> JsonFileStore<D>
where
    D: Serialize + DeserializeOwned + Default + Send + Sync + 'static,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _phantom: PhantomData,
        }
    }

    /// Open the store at `path`, writing an empty document if the file does
    /// not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self::new(path);

        if !tokio::fs::try_exists(&store.path).await? {
            if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            store.save(&D::default()).await?;
            info!("Initialized empty store at {}", store.path.display());
        }

        Ok(store)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl<D> DocumentStore<D> for JsonFileStore<D>
where
    D: Serialize + DeserializeOwned + Default + Send + Sync + 'static,
{
    async fn load(&self) -> Result<D, StoreError> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn save(&self, document: &D) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(document)?;

        // Write beside the target and swap it in so readers never see a torn file
        let temp = self.temp_path();
        tokio::fs::write(&temp, bytes).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}

/// In-process document, used by tests and throwaway servers
pub struct MemoryStore<D> {
    document: RwLock<D>,
}

impl<D: Default> Default for MemoryStore<D> {
    fn default() -> Self {
        Self::new(D::default())
    }
}

impl<D> MemoryStore<D> {
    pub fn new(document: D) -> Self {
        Self {
            document: RwLock::new(document),
        }
    }
}

#[async_trait]
impl<D> DocumentStore<D> for MemoryStore<D>
where
    D: Clone + Send + Sync + 'static,
{
    async fn load(&self) -> Result<D, StoreError> {
        Ok(self.document.read().await.clone())
    }

    async fn save(&self, document: &D) -> Result<(), StoreError> {
        *self.document.write().await = document.clone();
        Ok(())
    }
}
