//! File-backed key-value storage.
//!
//! All keys live in one JSON object file. Writes go to a sibling temp file
//! first and are then renamed over the original.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use medportal_application::ports::{KeyValueStorage, StorageError};
use tokio::fs;
use tokio::sync::Mutex;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

const APP_DIR: &str = "medportal";
const FILE_NAME: &str = "storage.json";

/// Returns `<data_dir>/medportal/storage.json` for the current user.
#[must_use]
pub fn default_storage_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
}

/// Key-value storage persisted as a single JSON file.
#[derive(Debug)]
pub struct FileKeyValueStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileKeyValueStorage {
    /// Creates storage backed by `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Creates storage at the default location.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the system has no data directory.
    pub fn at_default_location() -> Result<Self, StorageError> {
        default_storage_path()
            .map(Self::new)
            .ok_or_else(|| StorageError::Unavailable("no data directory".to_string()))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(BTreeMap::new()),
            Ok(bytes) => match from_json_bytes(&bytes) {
                Ok(values) => Ok(values),
                Err(e) => {
                    // Read as empty so the next write replaces the file.
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        "ignoring corrupt storage file"
                    );
                    Ok(BTreeMap::new())
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn save(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let bytes = to_json_stable_bytes(values)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &self.path).await?;
        tracing::trace!(path = %self.path.display(), keys = values.len(), "storage saved");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStorage for FileKeyValueStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut values = self.load().await?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut values = self.load().await?;
        if values.remove(key).is_some() {
            self.save(&values).await?;
        }
        Ok(())
    }
}
