//! Workspace type definitions
//!
//! Core types for workspace persistence - serializable with the camelCase keys
//! the drawing frontend writes.

use crate::error::{DrawspaceError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

/// A single drawing element. Opaque to this layer.
pub type Element = Value;

/// Partial application state snapshot (arbitrary key/value subset)
pub type AppStateSnapshot = Map<String, Value>;

/// Attached files keyed by file-reference id
pub type BinaryFiles = HashMap<String, BinaryFile>;

/// Unique workspace identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceId(String);

impl WorkspaceId {
    /// Length of the random suffix appended to generated ids
    const SUFFIX_LEN: usize = 9;

    /// Generate a fresh id from a creation timestamp plus a random suffix
    pub fn generate(now_ms: i64) -> Self {
        let random = Uuid::new_v4().simple().to_string();
        Self(format!(
            "workspace_{}_{}",
            now_ms,
            &random[..Self::SUFFIX_LEN]
        ))
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for WorkspaceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for WorkspaceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Binary file payload attached to a drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryFile {
    /// File-reference id used by image elements
    pub id: String,

    /// MIME type of the payload
    pub mime_type: String,

    /// Payload encoded as a data URL
    #[serde(rename = "dataURL")]
    pub data_url: String,

    /// When the file was first attached (epoch millis)
    pub created: i64,

    /// Last time the file was read back (epoch millis)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_retrieved: Option<i64>,
}

/// Full workspace record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    /// Unique identifier, immutable once assigned
    pub id: WorkspaceId,

    /// Human-readable name
    pub name: String,

    /// Creation timestamp (Unix epoch millis)
    pub created_at: i64,

    /// Last mutation timestamp (Unix epoch millis)
    pub updated_at: i64,

    /// Drawing elements in z-order
    #[serde(default)]
    pub elements: Vec<Element>,

    /// Application state subset
    #[serde(default)]
    pub app_state: AppStateSnapshot,

    /// Attached binary files
    #[serde(default)]
    pub files: BinaryFiles,
}

impl Workspace {
    /// Create an empty workspace stamped at `now_ms`
    pub fn new(id: WorkspaceId, name: impl Into<String>, now_ms: i64) -> Self {
        Self {
            id,
            name: name.into(),
            created_at: now_ms,
            updated_at: now_ms,
            elements: Vec::new(),
            app_state: AppStateSnapshot::new(),
            files: BinaryFiles::new(),
        }
    }

    /// Refresh `updated_at`, never letting it fall below `created_at`
    pub fn touch(&mut self, now_ms: i64) {
        self.updated_at = now_ms.max(self.created_at);
    }

    /// Replace the drawing content wholesale
    pub fn replace_content(&mut self, snapshot: DrawingSnapshot) {
        self.elements = snapshot.elements;
        self.app_state = snapshot.app_state;
        self.files = snapshot.files;
    }

    /// Project the index entry for this record
    pub fn metadata(&self) -> WorkspaceMetadata {
        WorkspaceMetadata::from(self)
    }
}

/// Lightweight index entry for listing workspaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceMetadata {
    pub id: WorkspaceId,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&Workspace> for WorkspaceMetadata {
    fn from(ws: &Workspace) -> Self {
        Self {
            id: ws.id.clone(),
            name: ws.name.clone(),
            created_at: ws.created_at,
            updated_at: ws.updated_at,
        }
    }
}

/// Drawing content supplied by the drawing-state provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingSnapshot {
    #[serde(default)]
    pub elements: Vec<Element>,

    #[serde(default)]
    pub app_state: AppStateSnapshot,

    #[serde(default)]
    pub files: BinaryFiles,
}

impl DrawingSnapshot {
    pub fn new(elements: Vec<Element>, app_state: AppStateSnapshot, files: BinaryFiles) -> Self {
        Self {
            elements,
            app_state,
            files,
        }
    }
}

/// Trim a workspace name, rejecting blank input
pub fn normalize_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DrawspaceError::invalid_name(name));
    }
    Ok(trimmed.to_string())
}
