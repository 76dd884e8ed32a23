//! Autosave scheduling
//!
//! The session manager arms one recurring timer per bound workspace. What a
//! tick does is decided by the owning application through an [`AutosaveHook`];
//! the scheduler only decides *when*.

use super::types::WorkspaceId;
use crate::error::{DrawspaceError, Result};
use futures::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Default autosave period
pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

/// Callback run on every autosave tick with the bound workspace id
pub type AutosaveHook = Arc<dyn Fn(WorkspaceId) -> BoxFuture<'static, ()> + Send + Sync>;

/// Build an [`AutosaveHook`] from an async closure
pub fn autosave_hook<F, Fut>(f: F) -> AutosaveHook
where
    F: Fn(WorkspaceId) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move |id| f(id).boxed())
}

/// Something that can arm recurring autosave timers
pub trait AutosaveScheduler: Send + Sync {
    /// Arm a timer firing every `interval`, first after one full interval.
    fn start(
        &self,
        workspace_id: WorkspaceId,
        interval: Duration,
        hook: Option<AutosaveHook>,
    ) -> AutosaveTimer;
}

/// Handle to an armed timer. Dropping it cancels the timer.
#[derive(Debug)]
pub struct AutosaveTimer {
    workspace_id: WorkspaceId,
    token: CancellationToken,
}

impl AutosaveTimer {
    pub fn new(workspace_id: WorkspaceId, token: CancellationToken) -> Self {
        Self {
            workspace_id,
            token,
        }
    }

    pub fn workspace_id(&self) -> &WorkspaceId {
        &self.workspace_id
    }

    /// Stop future ticks. A tick already running its hook finishes.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for AutosaveTimer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn run_hook(workspace_id: WorkspaceId, hook: Option<&AutosaveHook>) {
    match hook {
        Some(hook) => {
            tracing::trace!(id = %workspace_id, "autosave tick");
            hook(workspace_id).await;
        }
        None => tracing::trace!(id = %workspace_id, "autosave tick (no hook installed)"),
    }
}

/// Scheduler backed by tokio timers
#[derive(Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime the caller is running on
    pub fn current() -> Result<Self> {
        let handle = Handle::try_current().map_err(|e| {
            DrawspaceError::config(format!("Autosave needs a tokio runtime: {}", e))
        })?;
        Ok(Self::new(handle))
    }
}

impl AutosaveScheduler for TokioScheduler {
    fn start(
        &self,
        workspace_id: WorkspaceId,
        interval: Duration,
        hook: Option<AutosaveHook>,
    ) -> AutosaveTimer {
        let token = CancellationToken::new();
        let cancel = token.clone();
        let id = workspace_id.clone();

        self.handle.spawn(async move {
            let first = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(first, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                run_hook(id.clone(), hook.as_ref()).await;
            }
            tracing::trace!(id = %id, "autosave timer stopped");
        });

        AutosaveTimer::new(workspace_id, token)
    }
}

struct ManualTimer {
    workspace_id: WorkspaceId,
    interval: Duration,
    hook: Option<AutosaveHook>,
    token: CancellationToken,
}

/// Scheduler whose ticks are fired explicitly, for deterministic tests
#[derive(Default)]
pub struct ManualScheduler {
    timers: Mutex<Vec<ManualTimer>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Workspaces with a live (uncancelled) timer
    pub fn active(&self) -> Vec<WorkspaceId> {
        self.timers
            .lock()
            .iter()
            .filter(|t| !t.token.is_cancelled())
            .map(|t| t.workspace_id.clone())
            .collect()
    }

    /// Total timers ever armed
    pub fn started(&self) -> usize {
        self.timers.lock().len()
    }

    /// Interval of the most recently armed timer
    pub fn last_interval(&self) -> Option<Duration> {
        self.timers.lock().last().map(|t| t.interval)
    }

    /// Fire one tick on every live timer. Returns how many fired.
    pub async fn tick(&self) -> usize {
        let due: Vec<_> = self
            .timers
            .lock()
            .iter()
            .filter(|t| !t.token.is_cancelled())
            .map(|t| (t.workspace_id.clone(), t.hook.clone()))
            .collect();

        for (id, hook) in &due {
            run_hook(id.clone(), hook.as_ref()).await;
        }
        due.len()
    }
}

impl AutosaveScheduler for ManualScheduler {
    fn start(
        &self,
        workspace_id: WorkspaceId,
        interval: Duration,
        hook: Option<AutosaveHook>,
    ) -> AutosaveTimer {
        let token = CancellationToken::new();
        self.timers.lock().push(ManualTimer {
            workspace_id: workspace_id.clone(),
            interval,
            hook,
            token: token.clone(),
        });
        AutosaveTimer::new(workspace_id, token)
    }
}
