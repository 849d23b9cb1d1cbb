//! In-crate test doubles for the ports.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use medportal_domain::{ApiResponse, OutgoingRequest};
use parking_lot::Mutex;

use crate::ports::{HttpTransport, KeyValueStorage, StorageError, TransportError};

/// Key-value storage held in memory, counting removals per key.
#[derive(Debug, Default)]
pub struct MemoryKv {
    values: Mutex<HashMap<String, String>>,
    removals: Mutex<HashMap<String, usize>>,
}

impl MemoryKv {
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }

    pub fn removals(&self, key: &str) -> usize {
        self.removals.lock().get(key).copied().unwrap_or(0)
    }
}

#[async_trait]
impl KeyValueStorage for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.lock().remove(key);
        *self.removals.lock().entry(key.to_string()).or_default() += 1;
        Ok(())
    }
}

/// Storage that rejects writes to chosen keys and otherwise behaves like
/// `MemoryKv`.
#[derive(Debug, Default)]
pub struct FailingKv {
    inner: MemoryKv,
    read_only: Mutex<HashSet<String>>,
}

impl FailingKv {
    pub fn reject_writes_to(&self, key: &str) -> &Self {
        self.read_only.lock().insert(key.to_string());
        self
    }

    fn check(&self, key: &str) -> Result<(), StorageError> {
        if self.read_only.lock().contains(key) {
            return Err(StorageError::Unavailable(format!("{key} is read-only")));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStorage for FailingKv {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check(key)?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check(key)?;
        self.inner.remove(key).await
    }
}

/// Transport that replays queued results and records what was sent.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<Result<ApiResponse, TransportError>>>>,
    sent: Arc<Mutex<Vec<OutgoingRequest>>>,
}

impl MockTransport {
    pub fn respond(&self, result: Result<ApiResponse, TransportError>) -> &Self {
        self.responses.lock().push_back(result);
        self
    }

    pub fn sent(&self) -> Vec<OutgoingRequest> {
        self.sent.lock().clone()
    }
}

impl HttpTransport for MockTransport {
    async fn execute(&self, request: OutgoingRequest) -> Result<ApiResponse, TransportError> {
        self.sent.lock().push(request);
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Other("no response queued".to_string())))
    }
}
