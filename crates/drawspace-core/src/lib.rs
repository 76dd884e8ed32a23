//! Drawspace Core - Workspace persistence for a drawing app
//!
//! This crate provides the UI-agnostic workspace layer:
//! - Workspace store (full records + metadata index over a key-value backend)
//! - Session manager (current workspace, autosave timer)
//! - Configuration loading
//! - Change notifications for the UI
//!
//! Any UI can consume this crate through the `WorkspaceManager` interface.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────┐   calls         ┌──────────────────┐
//! │   Any UI          │ ───────────────→│ WorkspaceManager │
//! │ (dialogs, menus)  │                 │        │         │
//! │                   │ ←───────────────│ WorkspaceStorage │
//! └───────────────────┘  Notification   └──────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod notifications;

// Workspace persistence and session
pub mod workspace;

// Re-export commonly used types
pub use config::{load_config, DrawspaceConfig};
pub use error::{DrawspaceError, Result};
pub use logging::init_tracing;
pub use notifications::WorkspaceNotification;

// Re-export workspace types
pub use workspace::{
    autosave_hook, AutosaveHook, DrawingSnapshot, Workspace, WorkspaceId, WorkspaceManager,
    WorkspaceMetadata, WorkspaceStorage,
};

/// Get the crate version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
