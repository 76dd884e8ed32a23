//! Workspace management module
//!
//! Persists named drawing workspaces and tracks which one the running
//! session is bound to.
//!
//! # Architecture
//!
//! ```text
//! WorkspaceManager (session: current id + autosave timer)
//!     │
//!     ├── AutosaveScheduler ── AutosaveTimer ──> AutosaveHook (caller supplied)
//!     │
//!     └── WorkspaceStorage (typed results, dual write)
//!         └── StorageBackend
//!             ├── workspaces          id -> full record
//!             └── workspace-metadata  id -> {id, name, createdAt, updatedAt}
//! ```
//!
//! # Example
//!
//! ```ignore
//! use drawspace_core::{DrawingSnapshot, DrawspaceConfig, WorkspaceManager};
//!
//! let manager = WorkspaceManager::from_config(&DrawspaceConfig::default())?;
//!
//! // Create a workspace (becomes current, autosave armed)
//! let ws = manager.create_workspace("Trip Plan").await?;
//!
//! // Persist what is on the canvas
//! manager.save_current_workspace(DrawingSnapshot::default()).await?;
//!
//! // List for the picker dialog
//! for meta in manager.get_all_workspaces().await {
//!     println!("{} ({})", meta.name, meta.id);
//! }
//! ```

mod autosave;
mod backend;
mod clock;
mod manager;
mod storage;
mod types;

pub use autosave::{
    autosave_hook, AutosaveHook, AutosaveScheduler, AutosaveTimer, ManualScheduler,
    TokioScheduler, DEFAULT_AUTOSAVE_INTERVAL,
};
pub use backend::{FsBackend, MemoryBackend, Namespace, StorageBackend};
pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::WorkspaceManager;
pub use storage::WorkspaceStorage;
pub use types::{
    normalize_name, AppStateSnapshot, BinaryFile, BinaryFiles, DrawingSnapshot, Element,
    Workspace, WorkspaceId, WorkspaceMetadata,
};
