use super::{Namespace, StorageBackend};
use crate::error::{DrawspaceError, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory storage backend.
///
/// Used for ephemeral sessions and for exercising fault handling in tests:
/// reads and writes can be made to fail on demand.
#[derive(Default)]
pub struct MemoryBackend {
    data: RwLock<HashMap<Namespace, HashMap<String, Vec<u8>>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    /// Number of writes allowed before `fail_writes_after` kicks in
    writes_before_failure: AtomicUsize,
    fail_after_armed: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every read (`get`, `entries`) fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every write (`put`, `delete`) fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Let `n` more writes succeed, then fail every write after them.
    pub fn fail_writes_after(&self, n: usize) {
        self.writes_before_failure.store(n, Ordering::SeqCst);
        self.fail_after_armed.store(true, Ordering::SeqCst);
    }

    /// Store a raw value directly, bypassing fault simulation.
    pub fn insert_raw(&self, ns: Namespace, key: &str, value: impl Into<Vec<u8>>) {
        self.data
            .write()
            .entry(ns)
            .or_default()
            .insert(key.to_string(), value.into());
    }

    /// Number of keys currently held in a namespace.
    pub fn len(&self, ns: Namespace) -> usize {
        self.data.read().get(&ns).map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().values().all(HashMap::is_empty)
    }

    fn check_read(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DrawspaceError::storage("Simulated read error"));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DrawspaceError::storage("Simulated write error"));
        }
        if self.fail_after_armed.load(Ordering::SeqCst) {
            let remaining = self.writes_before_failure.load(Ordering::SeqCst);
            if remaining == 0 {
                return Err(DrawspaceError::storage("Simulated write error"));
            }
            self.writes_before_failure
                .store(remaining - 1, Ordering::SeqCst);
        }
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn get(&self, ns: Namespace, key: &str) -> Result<Option<Vec<u8>>> {
        self.check_read()?;
        Ok(self
            .data
            .read()
            .get(&ns)
            .and_then(|entries| entries.get(key).cloned()))
    }

    async fn put(&self, ns: Namespace, key: &str, value: &[u8]) -> Result<()> {
        self.check_write()?;
        self.data
            .write()
            .entry(ns)
            .or_default()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, ns: Namespace, key: &str) -> Result<()> {
        self.check_write()?;
        if let Some(entries) = self.data.write().get_mut(&ns) {
            entries.remove(key);
        }
        Ok(())
    }

    async fn entries(&self, ns: Namespace) -> Result<Vec<(String, Vec<u8>)>> {
        self.check_read()?;
        Ok(self
            .data
            .read()
            .get(&ns)
            .map(|entries| {
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}
