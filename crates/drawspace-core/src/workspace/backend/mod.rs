//! Raw key-value storage backends.
//!
//! A backend only knows about two flat namespaces of `id -> bytes`; the
//! [`WorkspaceStorage`](super::WorkspaceStorage) layer decides what the bytes
//! mean.

mod fs;
mod memory;

use crate::error::Result;
use async_trait::async_trait;

pub use fs::FsBackend;
pub use memory::MemoryBackend;

/// Logical namespace within a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Full workspace records
    Workspaces,
    /// Metadata index entries
    Metadata,
}

impl Namespace {
    /// Stable name, also used as the on-disk directory
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Workspaces => "workspaces",
            Namespace::Metadata => "workspace-metadata",
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable key-value access used by the workspace store.
///
/// Every call is an independent unit of work. Implementations need not
/// serialize concurrent writes to the same key; the last write wins.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read a value. `Ok(None)` if the key is absent.
    async fn get(&self, ns: Namespace, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write a value, replacing any previous one.
    async fn put(&self, ns: Namespace, key: &str, value: &[u8]) -> Result<()>;

    /// Remove a key. Removing an absent key succeeds.
    async fn delete(&self, ns: Namespace, key: &str) -> Result<()>;

    /// Every `(key, value)` pair in a namespace, in no particular order.
    async fn entries(&self, ns: Namespace) -> Result<Vec<(String, Vec<u8>)>>;
}
