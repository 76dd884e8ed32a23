//! WorkspaceManager - Session coordinator for drawing workspaces
//!
//! Tracks which workspace is current, delegates persistence to
//! [`WorkspaceStorage`] and keeps one autosave timer armed for the bound
//! workspace.
//!
//! Fault policy: reads (`load_workspace`, `get_all_workspaces`) and deletes
//! degrade to "nothing found" and log; create, save and rename propagate.

use super::autosave::{
    AutosaveHook, AutosaveScheduler, AutosaveTimer, TokioScheduler, DEFAULT_AUTOSAVE_INTERVAL,
};
use super::storage::WorkspaceStorage;
use super::types::{DrawingSnapshot, Workspace, WorkspaceId, WorkspaceMetadata};
use crate::config::{DrawspaceConfig, StorageBackendKind};
use crate::error::{DrawspaceError, Result};
use crate::notifications::{Notifier, WorkspaceNotification};
use crossbeam_channel::Receiver;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;

/// Process-local session state, never persisted
#[derive(Default)]
struct Session {
    current: Option<WorkspaceId>,
    timer: Option<AutosaveTimer>,
}

/// Coordinates the current workspace, persistence and autosave
pub struct WorkspaceManager {
    /// Storage backend
    storage: WorkspaceStorage,

    /// Arms autosave timers
    scheduler: Arc<dyn AutosaveScheduler>,

    /// Autosave period; `None` disables autosave
    autosave_interval: Option<Duration>,

    /// Callback run on each autosave tick
    autosave_hook: RwLock<Option<AutosaveHook>>,

    /// Current binding and its timer
    session: Mutex<Session>,

    /// UI-facing change notifications
    notifier: Notifier,
}

impl WorkspaceManager {
    /// Create a manager with the default 30 second autosave period
    pub fn new(storage: WorkspaceStorage, scheduler: Arc<dyn AutosaveScheduler>) -> Self {
        Self {
            storage,
            scheduler,
            autosave_interval: Some(DEFAULT_AUTOSAVE_INTERVAL),
            autosave_hook: RwLock::new(None),
            session: Mutex::new(Session::default()),
            notifier: Notifier::new(),
        }
    }

    /// Build storage and a tokio scheduler from configuration.
    ///
    /// Must be called from within a tokio runtime.
    pub fn from_config(config: &DrawspaceConfig) -> Result<Self> {
        let storage = match config.storage.backend {
            StorageBackendKind::Memory => WorkspaceStorage::in_memory(),
            StorageBackendKind::Filesystem => {
                let data_dir = config.storage.effective_data_dir().ok_or_else(|| {
                    DrawspaceError::config("Could not determine data directory")
                })?;
                WorkspaceStorage::with_data_dir(data_dir)
            }
        };
        let scheduler = Arc::new(TokioScheduler::current()?);

        let interval = config
            .autosave
            .enabled
            .then(|| config.autosave.interval());
        Ok(Self::new(storage, scheduler).with_autosave_interval(interval))
    }

    /// Override the autosave period (`None` disables autosave)
    pub fn with_autosave_interval(mut self, interval: Option<Duration>) -> Self {
        self.autosave_interval = interval;
        self
    }

    /// Install the tick callback at construction time
    pub fn with_autosave_hook(self, hook: AutosaveHook) -> Self {
        *self.autosave_hook.write() = Some(hook);
        self
    }

    /// Replace the tick callback. A running timer is re-armed with it.
    pub fn set_autosave_hook(&self, hook: Option<AutosaveHook>) {
        *self.autosave_hook.write() = hook;

        let mut session = self.session.lock();
        if let Some(id) = session.current.clone() {
            self.start_autosave(&mut session, id);
        }
    }

    /// Subscribe to change notifications
    pub fn notifications(&self) -> Receiver<WorkspaceNotification> {
        self.notifier.subscribe()
    }

    pub fn storage(&self) -> &WorkspaceStorage {
        &self.storage
    }

    // ========== Workspace CRUD ==========

    /// Create a workspace and make it current
    pub async fn create_workspace(&self, name: &str) -> Result<Workspace> {
        let workspace = self.storage.create_workspace(name).await?;

        self.notifier.emit(WorkspaceNotification::Created {
            workspace: workspace.metadata(),
        });
        self.bind(Some(workspace.id.clone()));

        Ok(workspace)
    }

    /// Load a workspace and, if it exists, make it current.
    ///
    /// Unknown ids and read faults return `None` and leave the binding alone.
    pub async fn load_workspace(&self, id: &WorkspaceId) -> Option<Workspace> {
        match self.storage.load_workspace(id).await {
            Ok(Some(workspace)) => {
                self.bind(Some(id.clone()));
                Some(workspace)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "failed to load workspace");
                None
            }
        }
    }

    /// Full record of the current workspace, if one is bound and readable
    pub async fn current_workspace(&self) -> Option<Workspace> {
        let id = self.current_workspace_id()?;
        match self.storage.load_workspace(&id).await {
            Ok(workspace) => workspace,
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "failed to load current workspace");
                None
            }
        }
    }

    /// Overwrite the current workspace's content. No-op when nothing is bound.
    pub async fn save_current_workspace(&self, snapshot: DrawingSnapshot) -> Result<()> {
        let Some(id) = self.current_workspace_id() else {
            return Ok(());
        };
        if !self.save_to_workspace(&id, snapshot).await? {
            tracing::debug!(id = %id, "current workspace vanished, nothing saved");
        }
        Ok(())
    }

    /// Overwrite a specific workspace's content without changing the binding.
    ///
    /// Returns `false` if the workspace does not exist.
    pub async fn save_to_workspace(
        &self,
        id: &WorkspaceId,
        snapshot: DrawingSnapshot,
    ) -> Result<bool> {
        let Some(mut workspace) = self.storage.load_workspace(id).await? else {
            return Ok(false);
        };

        workspace.replace_content(snapshot);
        self.storage.save_workspace(&mut workspace).await?;

        self.notifier.emit(WorkspaceNotification::Saved {
            workspace: workspace.metadata(),
        });
        Ok(true)
    }

    /// List workspaces, most recently updated first. Empty on read faults.
    pub async fn get_all_workspaces(&self) -> Vec<WorkspaceMetadata> {
        match self.storage.get_all_workspaces().await {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(error = %e, "failed to list workspaces");
                Vec::new()
            }
        }
    }

    /// Delete a workspace (best-effort). Unbinds it if it was current.
    pub async fn delete_workspace(&self, id: &WorkspaceId) {
        match self.storage.delete_workspace(id).await {
            Ok(()) => self
                .notifier
                .emit(WorkspaceNotification::Deleted { id: id.clone() }),
            Err(e) => tracing::warn!(id = %id, error = %e, "failed to delete workspace"),
        }

        if self.current_workspace_id().as_ref() == Some(id) {
            self.bind(None);
        }
    }

    /// Rename a workspace. Returns `false` if it does not exist.
    pub async fn update_workspace_name(&self, id: &WorkspaceId, name: &str) -> Result<bool> {
        let renamed = self.storage.update_workspace_name(id, name).await?;
        if renamed {
            self.notifier.emit(WorkspaceNotification::Renamed {
                id: id.clone(),
                name: name.trim().to_string(),
            });
        }
        Ok(renamed)
    }

    // ========== Current Workspace ==========

    pub fn current_workspace_id(&self) -> Option<WorkspaceId> {
        self.session.lock().current.clone()
    }

    /// Bind a workspace without touching storage; `None` unbinds.
    pub fn set_current_workspace_id(&self, id: Option<WorkspaceId>) {
        self.bind(id);
    }

    /// Whether an autosave timer is currently armed
    pub fn is_autosave_running(&self) -> bool {
        self.session
            .lock()
            .timer
            .as_ref()
            .is_some_and(|t| !t.is_cancelled())
    }

    /// Stop autosave. The binding itself is kept.
    pub fn cleanup(&self) {
        Self::stop_autosave(&mut self.session.lock());
    }

    // ========== Autosave ==========

    fn bind(&self, id: Option<WorkspaceId>) {
        let mut session = self.session.lock();
        let changed = session.current != id;
        session.current = id.clone();

        match id.clone() {
            Some(id) => self.start_autosave(&mut session, id),
            None => Self::stop_autosave(&mut session),
        }
        drop(session);

        if changed {
            self.notifier
                .emit(WorkspaceNotification::CurrentChanged { id });
        }
    }

    fn start_autosave(&self, session: &mut Session, id: WorkspaceId) {
        Self::stop_autosave(session);

        let Some(interval) = self.autosave_interval else {
            return;
        };
        let hook = self.autosave_hook.read().clone();
        tracing::debug!(id = %id, ?interval, "starting autosave");
        session.timer = Some(self.scheduler.start(id, interval, hook));
    }

    fn stop_autosave(session: &mut Session) {
        if let Some(timer) = session.timer.take() {
            tracing::debug!(id = %timer.workspace_id(), "stopping autosave");
            timer.cancel();
        }
    }
}

impl Drop for WorkspaceManager {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workspace::autosave::{autosave_hook, ManualScheduler};
    use crate::workspace::backend::{MemoryBackend, Namespace};
    use crate::workspace::clock::ManualClock;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    struct Harness {
        manager: WorkspaceManager,
        backend: Arc<MemoryBackend>,
        clock: Arc<ManualClock>,
        scheduler: Arc<ManualScheduler>,
    }

    fn test_manager() -> Harness {
        let backend = Arc::new(MemoryBackend::new());
        let clock = Arc::new(ManualClock::new(1_000));
        let scheduler = Arc::new(ManualScheduler::new());
        let storage = WorkspaceStorage::new(backend.clone(), clock.clone());
        let manager = WorkspaceManager::new(storage, scheduler.clone());

        Harness {
            manager,
            backend,
            clock,
            scheduler,
        }
    }

    fn snapshot(elements: Vec<serde_json::Value>, zoom: i64) -> DrawingSnapshot {
        let mut app_state = serde_json::Map::new();
        app_state.insert("zoom".into(), json!(zoom));
        DrawingSnapshot::new(elements, app_state, Default::default())
    }

    #[tokio::test]
    async fn test_initial_state_has_no_workspace() {
        let h = test_manager();
        assert_eq!(h.manager.current_workspace_id(), None);
        assert!(!h.manager.is_autosave_running());
        assert!(h.manager.get_all_workspaces().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_binds_and_starts_autosave() {
        let h = test_manager();
        let ws = h.manager.create_workspace("First").await.unwrap();

        assert_eq!(h.manager.current_workspace_id(), Some(ws.id.clone()));
        assert!(h.manager.is_autosave_running());
        assert_eq!(h.scheduler.active(), vec![ws.id.clone()]);
        assert_eq!(
            h.scheduler.last_interval(),
            Some(DEFAULT_AUTOSAVE_INTERVAL)
        );

        let list = h.manager.get_all_workspaces().await;
        assert_eq!(list, vec![ws.metadata()]);
    }

    #[tokio::test]
    async fn test_trip_plan_scenario() {
        let h = test_manager();
        let ws = h.manager.create_workspace("Trip Plan").await.unwrap();
        h.manager.set_current_workspace_id(Some(ws.id.clone()));

        let elem_a = json!({"id": "elemA", "type": "ellipse"});
        h.manager
            .save_current_workspace(snapshot(vec![elem_a.clone()], 1))
            .await
            .unwrap();

        let loaded = h.manager.load_workspace(&ws.id).await.unwrap();
        assert_eq!(loaded.elements, vec![elem_a]);
        assert_eq!(loaded.app_state.get("zoom"), Some(&json!(1)));
        assert!(loaded.files.is_empty());
    }

    #[tokio::test]
    async fn test_save_current_replaces_content_wholesale() {
        let h = test_manager();
        let ws = h.manager.create_workspace("Overwrite").await.unwrap();

        h.manager
            .save_current_workspace(snapshot(vec![json!({"id": "a"}), json!({"id": "b"})], 2))
            .await
            .unwrap();
        h.manager
            .save_current_workspace(DrawingSnapshot::new(
                vec![json!({"id": "c"})],
                Default::default(),
                Default::default(),
            ))
            .await
            .unwrap();

        let loaded = h.manager.storage().load_workspace(&ws.id).await.unwrap().unwrap();
        assert_eq!(loaded.elements, vec![json!({"id": "c"})]);
        assert!(loaded.app_state.is_empty());
    }

    #[tokio::test]
    async fn test_save_current_without_binding_is_noop() {
        let h = test_manager();
        let ws = h.manager.create_workspace("Untouched").await.unwrap();
        h.manager.set_current_workspace_id(None);
        h.clock.advance(100);

        h.manager
            .save_current_workspace(snapshot(vec![json!({"id": "x"})], 3))
            .await
            .unwrap();

        let loaded = h.manager.storage().load_workspace(&ws.id).await.unwrap().unwrap();
        assert!(loaded.elements.is_empty());
        assert_eq!(loaded.updated_at, ws.updated_at);
    }

    #[tokio::test]
    async fn test_save_current_propagates_write_faults() {
        let h = test_manager();
        h.manager.create_workspace("Fragile").await.unwrap();
        h.backend.set_fail_writes(true);

        let result = h
            .manager
            .save_current_workspace(snapshot(vec![json!({"id": "x"})], 1))
            .await;
        assert!(matches!(result, Err(DrawspaceError::Storage(_))));
    }

    #[tokio::test]
    async fn test_create_propagates_write_faults_and_keeps_binding() {
        let h = test_manager();
        let ws = h.manager.create_workspace("Existing").await.unwrap();
        h.backend.set_fail_writes(true);

        assert!(h.manager.create_workspace("Nope").await.is_err());
        assert_eq!(h.manager.current_workspace_id(), Some(ws.id));
    }

    #[tokio::test]
    async fn test_load_unknown_leaves_binding_untouched() {
        let h = test_manager();
        let ws = h.manager.create_workspace("Stay").await.unwrap();
        let started = h.scheduler.started();

        let missing = h
            .manager
            .load_workspace(&WorkspaceId::from("workspace_0_missing"))
            .await;
        assert!(missing.is_none());
        assert_eq!(h.manager.current_workspace_id(), Some(ws.id.clone()));
        assert_eq!(h.scheduler.started(), started);
        assert_eq!(h.scheduler.active(), vec![ws.id]);
    }

    #[tokio::test]
    async fn test_load_read_fault_degrades_to_none() {
        let h = test_manager();
        let ws = h.manager.create_workspace("Unreadable").await.unwrap();
        h.manager.set_current_workspace_id(None);
        h.backend.set_fail_reads(true);

        assert!(h.manager.load_workspace(&ws.id).await.is_none());
        assert_eq!(h.manager.current_workspace_id(), None);
        assert!(h.manager.get_all_workspaces().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_rebinds_and_restarts_autosave() {
        let h = test_manager();
        let a = h.manager.create_workspace("A").await.unwrap();
        let b = h.manager.create_workspace("B").await.unwrap();
        assert_eq!(h.scheduler.active(), vec![b.id.clone()]);

        let loaded = h.manager.load_workspace(&a.id).await.unwrap();
        assert_eq!(loaded.id, a.id);
        assert_eq!(h.manager.current_workspace_id(), Some(a.id.clone()));
        assert_eq!(h.scheduler.active(), vec![a.id]);
        assert_eq!(h.scheduler.started(), 3);
    }

    #[tokio::test]
    async fn test_load_binds_the_requested_key() {
        let h = test_manager();
        let ws = h.manager.create_workspace("Original").await.unwrap();
        h.manager.set_current_workspace_id(None);

        // Record copied under another key still carries its old id inside
        let record = serde_json::to_vec(&ws).unwrap();
        h.backend.insert_raw(Namespace::Workspaces, "copy", record);
        let copy_id = WorkspaceId::from("copy");

        let loaded = h.manager.load_workspace(&copy_id).await.unwrap();
        assert_eq!(loaded.id, ws.id);
        assert_eq!(h.manager.current_workspace_id(), Some(copy_id.clone()));
        assert_eq!(h.scheduler.active(), vec![copy_id]);
    }

    #[tokio::test]
    async fn test_set_current_none_stops_autosave() {
        let h = test_manager();
        h.manager.create_workspace("Quick").await.unwrap();

        h.manager.set_current_workspace_id(None);
        assert_eq!(h.manager.current_workspace_id(), None);
        assert!(!h.manager.is_autosave_running());
        assert!(h.scheduler.active().is_empty());
    }

    #[tokio::test]
    async fn test_set_current_does_not_touch_storage() {
        let h = test_manager();
        let id = WorkspaceId::from("workspace_0_ephemeral");

        h.manager.set_current_workspace_id(Some(id.clone()));
        assert_eq!(h.manager.current_workspace_id(), Some(id.clone()));
        assert_eq!(h.scheduler.active(), vec![id]);
        assert!(h.backend.is_empty());
    }

    #[tokio::test]
    async fn test_delete_current_clears_binding_and_autosave() {
        let h = test_manager();
        let ws = h.manager.create_workspace("Doomed").await.unwrap();

        h.manager.delete_workspace(&ws.id).await;

        assert_eq!(h.manager.current_workspace_id(), None);
        assert!(!h.manager.is_autosave_running());
        assert!(h.scheduler.active().is_empty());
        assert_eq!(h.scheduler.tick().await, 0);
        assert!(h.manager.load_workspace(&ws.id).await.is_none());
    }

    #[tokio::test]
    async fn test_delete_other_keeps_binding() {
        let h = test_manager();
        let other = h.manager.create_workspace("Other").await.unwrap();
        let current = h.manager.create_workspace("Current").await.unwrap();

        h.manager.delete_workspace(&other.id).await;
        h.manager.delete_workspace(&other.id).await;

        assert_eq!(h.manager.current_workspace_id(), Some(current.id.clone()));
        assert_eq!(h.scheduler.active(), vec![current.id]);
    }

    #[tokio::test]
    async fn test_delete_fault_is_swallowed() {
        let h = test_manager();
        let ws = h.manager.create_workspace("Sticky").await.unwrap();
        h.backend.set_fail_writes(true);

        h.manager.delete_workspace(&ws.id).await;
        assert_eq!(h.manager.current_workspace_id(), None);
    }

    #[tokio::test]
    async fn test_rename_delegates() {
        let h = test_manager();
        let ws = h.manager.create_workspace("Before").await.unwrap();
        h.clock.advance(10);

        assert!(h.manager.update_workspace_name(&ws.id, " After ").await.unwrap());
        let list = h.manager.get_all_workspaces().await;
        assert_eq!(list[0].name, "After");
        assert_eq!(list[0].updated_at, 1_010);

        let before = h.manager.get_all_workspaces().await;
        let renamed = h
            .manager
            .update_workspace_name(&WorkspaceId::from("workspace_0_nope"), "X")
            .await
            .unwrap();
        assert!(!renamed);
        assert_eq!(h.manager.get_all_workspaces().await, before);
    }

    #[tokio::test]
    async fn test_save_to_other_workspace_keeps_binding() {
        let h = test_manager();
        let target = h.manager.create_workspace("Target").await.unwrap();
        let current = h.manager.create_workspace("Current").await.unwrap();

        let saved = h
            .manager
            .save_to_workspace(&target.id, snapshot(vec![json!({"id": "moved"})], 1))
            .await
            .unwrap();
        assert!(saved);
        assert_eq!(h.manager.current_workspace_id(), Some(current.id));

        let loaded = h.manager.storage().load_workspace(&target.id).await.unwrap().unwrap();
        assert_eq!(loaded.elements, vec![json!({"id": "moved"})]);

        let missing = h
            .manager
            .save_to_workspace(&WorkspaceId::from("workspace_0_gone"), DrawingSnapshot::default())
            .await
            .unwrap();
        assert!(!missing);
    }

    #[tokio::test]
    async fn test_current_workspace_record() {
        let h = test_manager();
        assert!(h.manager.current_workspace().await.is_none());

        let ws = h.manager.create_workspace("Now").await.unwrap();
        assert_eq!(h.manager.current_workspace().await, Some(ws));
    }

    #[tokio::test]
    async fn test_cleanup_stops_autosave_but_keeps_binding() {
        let h = test_manager();
        let ws = h.manager.create_workspace("Shutdown").await.unwrap();

        h.manager.cleanup();
        assert!(!h.manager.is_autosave_running());
        assert_eq!(h.scheduler.tick().await, 0);
        assert_eq!(h.manager.current_workspace_id(), Some(ws.id));
    }

    #[tokio::test]
    async fn test_drop_cancels_timer() {
        let h = test_manager();
        h.manager.create_workspace("Dropped").await.unwrap();
        let scheduler = h.scheduler.clone();

        drop(h);
        assert!(scheduler.active().is_empty());
    }

    #[tokio::test]
    async fn test_autosave_disabled() {
        let h = test_manager();
        let manager = WorkspaceManager::new(h.manager.storage().clone(), h.scheduler.clone())
            .with_autosave_interval(None);

        manager.create_workspace("No timer").await.unwrap();
        assert!(!manager.is_autosave_running());
        assert_eq!(h.scheduler.started(), 0);
    }

    #[tokio::test]
    async fn test_autosave_hook_receives_bound_id() {
        let h = test_manager();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        h.manager.set_autosave_hook(Some(autosave_hook(move |id| {
            let sink = sink.clone();
            async move { sink.lock().push(id) }
        })));

        let a = h.manager.create_workspace("A").await.unwrap();
        h.scheduler.tick().await;
        let b = h.manager.create_workspace("B").await.unwrap();
        h.scheduler.tick().await;
        h.scheduler.tick().await;

        assert_eq!(*seen.lock(), vec![a.id, b.id.clone(), b.id]);
    }

    #[tokio::test]
    async fn test_installing_hook_rearms_running_timer() {
        let h = test_manager();
        h.manager.create_workspace("Late hook").await.unwrap();
        assert_eq!(h.scheduler.started(), 1);

        let fired = Arc::new(Mutex::new(0usize));
        let counter = fired.clone();
        h.manager.set_autosave_hook(Some(autosave_hook(move |_| {
            let counter = counter.clone();
            async move { *counter.lock() += 1 }
        })));

        assert_eq!(h.scheduler.started(), 2);
        assert_eq!(h.scheduler.tick().await, 1);
        assert_eq!(*fired.lock(), 1);
    }

    #[tokio::test]
    async fn test_autosave_hook_can_save_latest_snapshot() {
        let h = test_manager();
        let manager = Arc::new(h.manager);
        let latest = Arc::new(Mutex::new(DrawingSnapshot::default()));

        let weak = Arc::downgrade(&manager);
        let source = latest.clone();
        manager.set_autosave_hook(Some(autosave_hook(move |_id| {
            let weak = weak.clone();
            let snapshot = source.lock().clone();
            async move {
                if let Some(manager) = weak.upgrade() {
                    manager.save_current_workspace(snapshot).await.unwrap();
                }
            }
        })));

        let ws = manager.create_workspace("Autosaved").await.unwrap();
        *latest.lock() = snapshot(vec![json!({"id": "drawn"})], 2);
        h.clock.advance(30_000);
        h.scheduler.tick().await;

        let loaded = manager.storage().load_workspace(&ws.id).await.unwrap().unwrap();
        assert_eq!(loaded.elements, vec![json!({"id": "drawn"})]);
        assert_eq!(loaded.updated_at, 31_000);
    }

    #[tokio::test]
    async fn test_notifications_follow_lifecycle() {
        let h = test_manager();
        let rx = h.manager.notifications();

        let ws = h.manager.create_workspace("Notify").await.unwrap();
        h.manager
            .update_workspace_name(&ws.id, "Renamed")
            .await
            .unwrap();
        h.manager.delete_workspace(&ws.id).await;

        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![
                WorkspaceNotification::Created {
                    workspace: ws.metadata()
                },
                WorkspaceNotification::CurrentChanged {
                    id: Some(ws.id.clone())
                },
                WorkspaceNotification::Renamed {
                    id: ws.id.clone(),
                    name: "Renamed".into()
                },
                WorkspaceNotification::Deleted { id: ws.id.clone() },
                WorkspaceNotification::CurrentChanged { id: None },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_from_config_uses_configured_backend_and_interval() {
        let mut config = DrawspaceConfig::default();
        config.storage.backend = StorageBackendKind::Memory;
        config.autosave.interval_secs = 5;

        let manager = WorkspaceManager::from_config(&config).unwrap();
        let fired = Arc::new(Mutex::new(0usize));
        let counter = fired.clone();
        manager.set_autosave_hook(Some(autosave_hook(move |_| {
            let counter = counter.clone();
            async move { *counter.lock() += 1 }
        })));

        manager.create_workspace("Configured").await.unwrap();
        tokio::time::sleep(Duration::from_secs(11)).await;
        assert_eq!(*fired.lock(), 2);

        manager.cleanup();
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(*fired.lock(), 2);
    }
}
