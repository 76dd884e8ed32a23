//! Notifications that the workspace session sends to any UI
//!
//! These inform the UI about changes to the workspace list and the current
//! binding so it can refresh without polling. They are serializable for
//! frontends that live across an IPC boundary.

use crate::error::DrawspaceError;
use crate::workspace::{WorkspaceId, WorkspaceMetadata};
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

/// Capacity of the notification channel
const CHANNEL_CAPACITY: usize = 256;

/// Notifications emitted by [`WorkspaceManager`](crate::WorkspaceManager)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorkspaceNotification {
    /// A workspace was created
    Created { workspace: WorkspaceMetadata },

    /// A workspace snapshot was written
    Saved { workspace: WorkspaceMetadata },

    /// A workspace was renamed
    Renamed { id: WorkspaceId, name: String },

    /// A workspace was removed
    Deleted { id: WorkspaceId },

    /// The current workspace binding changed (`None` = unsaved session)
    CurrentChanged { id: Option<WorkspaceId> },
}

/// Bounded fan-out of notifications. Never blocks the sender.
pub(crate) struct Notifier {
    tx: Sender<WorkspaceNotification>,
    rx: Receiver<WorkspaceNotification>,
}

impl Notifier {
    pub(crate) fn new() -> Self {
        let (tx, rx) = bounded(CHANNEL_CAPACITY);
        Self { tx, rx }
    }

    pub(crate) fn subscribe(&self) -> Receiver<WorkspaceNotification> {
        self.rx.clone()
    }

    /// Queue a notification, dropping it if nobody is draining the channel
    pub(crate) fn emit(&self, notification: WorkspaceNotification) {
        if let Err(e) = self.tx.try_send(notification) {
            let err = DrawspaceError::from(e);
            tracing::debug!(error = %err, "dropped workspace notification");
        }
    }
}
