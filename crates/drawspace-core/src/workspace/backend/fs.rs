use super::{Namespace, StorageBackend};
use crate::error::{DrawspaceError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

const VALUE_EXT: &str = "json";

/// Filesystem storage backend.
///
/// ```text
/// <root>/
/// ├── workspaces/<id>.json
/// └── workspace-metadata/<id>.json
/// ```
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn namespace_dir(&self, ns: Namespace) -> PathBuf {
        self.root.join(ns.as_str())
    }

    fn value_path(&self, ns: Namespace, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self
            .namespace_dir(ns)
            .join(format!("{}.{}", key, VALUE_EXT)))
    }
}

/// Keys become file names, so anything that could escape the namespace
/// directory is rejected.
fn validate_key(key: &str) -> Result<()> {
    let bad = key.is_empty()
        || key.starts_with('.')
        || key.contains(['/', '\\', '\0'])
        || key.contains("..");
    if bad {
        return Err(DrawspaceError::storage(format!(
            "Invalid storage key: {:?}",
            key
        )));
    }
    Ok(())
}

fn io_error(context: &str, path: &Path, e: std::io::Error) -> DrawspaceError {
    DrawspaceError::Io(std::io::Error::new(
        e.kind(),
        format!("{} {}: {}", context, path.display(), e),
    ))
}

#[async_trait]
impl StorageBackend for FsBackend {
    async fn get(&self, ns: Namespace, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.value_path(ns, key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("Failed to read", &path, e)),
        }
    }

    async fn put(&self, ns: Namespace, key: &str, value: &[u8]) -> Result<()> {
        let path = self.value_path(ns, key)?;
        let dir = self.namespace_dir(ns);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| io_error("Failed to create directory", &dir, e))?;

        // Unique temp file per write; overlapping writes to a key must not
        // share one. The `.tmp` extension keeps it out of `entries`.
        let temp_path = dir.join(format!(
            ".{}.{}.{}.tmp",
            key,
            Uuid::new_v4().simple(),
            VALUE_EXT
        ));
        if let Err(e) = fs::write(&temp_path, value).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(io_error("Failed to write", &temp_path, e));
        }
        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(io_error("Failed to save", &path, e));
        }

        Ok(())
    }

    async fn delete(&self, ns: Namespace, key: &str) -> Result<()> {
        let path = self.value_path(ns, key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("Failed to delete", &path, e)),
        }
    }

    async fn entries(&self, ns: Namespace) -> Result<Vec<(String, Vec<u8>)>> {
        let dir = self.namespace_dir(ns);
        let mut read_dir = match fs::read_dir(&dir).await {
            Ok(rd) => rd,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error("Failed to list", &dir, e)),
        };

        let mut entries = Vec::new();
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| io_error("Failed to list", &dir, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(VALUE_EXT) {
                continue;
            }
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match fs::read(&path).await {
                Ok(bytes) => entries.push((key.to_string(), bytes)),
                // Deleted between listing and reading
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(io_error("Failed to read", &path, e)),
            }
        }

        Ok(entries)
    }
}
