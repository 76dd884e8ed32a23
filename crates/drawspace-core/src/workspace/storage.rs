//! Workspace persistence layer
//!
//! Keeps full records and the metadata index in two namespaces of a
//! [`StorageBackend`]. Every operation returns a typed result; deciding
//! whether a fault is fatal is left to the caller.

use super::backend::{FsBackend, MemoryBackend, Namespace, StorageBackend};
use super::clock::{Clock, SystemClock};
use super::types::{normalize_name, Workspace, WorkspaceId, WorkspaceMetadata};
use crate::error::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Store for workspace records and their metadata index
#[derive(Clone)]
pub struct WorkspaceStorage {
    backend: Arc<dyn StorageBackend>,
    clock: Arc<dyn Clock>,
}

impl WorkspaceStorage {
    /// Create a store over an explicit backend and clock
    pub fn new(backend: Arc<dyn StorageBackend>, clock: Arc<dyn Clock>) -> Self {
        Self { backend, clock }
    }

    /// Filesystem-backed store rooted at `data_dir`
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FsBackend::new(data_dir)), Arc::new(SystemClock))
    }

    /// Volatile store (nothing survives the process)
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()), Arc::new(SystemClock))
    }

    /// Create and persist an empty workspace
    pub async fn create_workspace(&self, name: &str) -> Result<Workspace> {
        let name = normalize_name(name)?;
        let now = self.clock.now_ms();
        let workspace = Workspace::new(WorkspaceId::generate(now), name, now);

        self.write_both(&workspace).await?;
        tracing::debug!(id = %workspace.id, name = %workspace.name, "created workspace");

        Ok(workspace)
    }

    /// Stamp `updated_at` and overwrite both the record and its metadata
    pub async fn save_workspace(&self, workspace: &mut Workspace) -> Result<()> {
        workspace.touch(self.clock.now_ms());
        self.write_both(workspace).await?;
        tracing::debug!(
            id = %workspace.id,
            elements = workspace.elements.len(),
            files = workspace.files.len(),
            "saved workspace"
        );
        Ok(())
    }

    /// Load a full record. `Ok(None)` if the id is unknown.
    pub async fn load_workspace(&self, id: &WorkspaceId) -> Result<Option<Workspace>> {
        match self.backend.get(Namespace::Workspaces, id.as_str()).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// List metadata, most recently updated first.
    ///
    /// Undecodable index entries are skipped with a warning so one bad file
    /// does not hide every other workspace.
    pub async fn get_all_workspaces(&self) -> Result<Vec<WorkspaceMetadata>> {
        let entries = self.backend.entries(Namespace::Metadata).await?;

        let mut list: Vec<WorkspaceMetadata> = entries
            .into_iter()
            .filter_map(|(key, bytes)| match serde_json::from_slice(&bytes) {
                Ok(meta) => Some(meta),
                Err(e) => {
                    tracing::warn!(
                        key = %key,
                        error = %e,
                        "skipping unreadable metadata entry"
                    );
                    None
                }
            })
            .collect();

        list.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(list)
    }

    /// Remove a workspace from both namespaces. Absent ids are fine.
    pub async fn delete_workspace(&self, id: &WorkspaceId) -> Result<()> {
        self.backend
            .delete(Namespace::Workspaces, id.as_str())
            .await?;
        self.backend.delete(Namespace::Metadata, id.as_str()).await?;
        tracing::debug!(id = %id, "deleted workspace");
        Ok(())
    }

    /// Rename a workspace. Returns `false` if it does not exist.
    pub async fn update_workspace_name(&self, id: &WorkspaceId, name: &str) -> Result<bool> {
        let name = normalize_name(name)?;
        let Some(mut workspace) = self.load_workspace(id).await? else {
            return Ok(false);
        };

        workspace.name = name;
        self.save_workspace(&mut workspace).await?;
        Ok(true)
    }

    /// Full record first, then the index entry. A fault between the two
    /// leaves them out of step; nothing rolls the first write back.
    async fn write_both(&self, workspace: &Workspace) -> Result<()> {
        let id = workspace.id.as_str();

        let record = serde_json::to_vec(workspace)?;
        self.backend.put(Namespace::Workspaces, id, &record).await?;

        let metadata = serde_json::to_vec(&workspace.metadata())?;
        self.backend.put(Namespace::Metadata, id, &metadata).await?;

        Ok(())
    }
}
