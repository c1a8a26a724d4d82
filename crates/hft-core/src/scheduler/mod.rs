//! Periodic refresh of dynamic labels.
//!
//! One tokio task per dynamic label, keyed by name. Each task owns a
//! [`tokio_util::sync::CancellationToken`]; stopping a task cancels the token
//! and joins the task before the label is hidden, so a task can never redraw
//! a label after `stop` returned. Starting a name that already has a task
//! stops the old one first: two tasks for one name never overlap.
mod context;
pub use context::{CLOCK_PREFIX, RefreshContext};

mod state;
pub use state::TaskState;

mod task;
use task::RefreshTask;

use std::{
    collections::HashMap,
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

use tracing::{debug, info, instrument, warn};

use hft_model::{LabelDefinition, LabelName};

use crate::backend::RenderError;

pub struct RefreshScheduler {
    ctx: RefreshContext,
    tasks: Mutex<HashMap<LabelName, RefreshTask>>,
    /// Gates the bulk operations only; each task's token governs its own lifetime.
    running: AtomicBool,
}

impl RefreshScheduler {
    pub fn new(ctx: RefreshContext) -> Self {
        Self {
            ctx,
            tasks: Mutex::new(HashMap::new()),
            running: AtomicBool::new(false),
        }
    }

    pub fn context(&self) -> &RefreshContext {
        &self.ctx
    }

    /// Start refreshing `name`, replacing any task it already has.
    ///
    /// The drawn object is created before the task is spawned, so a refusing
    /// draw primitive is reported here and no task is left behind. Returns
    /// `Ok(false)` for static definitions, which never get a task.
    #[instrument(level = "debug", skip(self, def), fields(label = %name))]
    pub async fn start(&self, name: &str, def: &LabelDefinition) -> Result<bool, RenderError> {
        let Some(period) = def.kind.refresh_interval() else {
            warn!("attempted to start a refresh task for a static label");
            return Ok(false);
        };
        if self.stop(name).await {
            debug!("previous refresh task stopped before restart");
        }
        self.ctx.registry().ensure(name, def)?;

        let task = RefreshTask::spawn(self.ctx.clone(), name.to_string(), def.clone(), period);
        let raced = self.tasks().insert(name.to_string(), task);
        if let Some(older) = raced {
            warn!("another refresh task was registered concurrently, stopping it");
            older.shutdown(name).await;
        }
        Ok(true)
    }

    /// Stop refreshing `name` and hide it. Idempotent.
    ///
    /// Returns `true` if a task existed.
    #[instrument(level = "debug", skip(self), fields(label = %name))]
    pub async fn stop(&self, name: &str) -> bool {
        let task = self.tasks().remove(name);
        let existed = task.is_some();
        if let Some(task) = task {
            task.shutdown(name).await;
        }
        self.ctx.registry().hide(name);
        existed
    }

    /// Start `name` unless its task is already running.
    ///
    /// A task that gave up (render error) is restarted.
    pub async fn ensure_running(&self, name: &str, def: &LabelDefinition) -> Result<bool, RenderError> {
        match self.task_state(name) {
            Some(TaskState::Running) => Ok(false),
            _ => self.start(name, def).await,
        }
    }

    /// Start a task for every dynamic label in `labels`.
    ///
    /// Logged no-op if the scheduler is already running. Returns how many
    /// tasks were started.
    pub async fn start_all<'a, I>(&self, labels: I) -> usize
    where
        I: IntoIterator<Item = (&'a str, &'a LabelDefinition)>,
    {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("all dynamic text updates are already running");
            return 0;
        }

        let mut started = 0;
        for (name, def) in labels.into_iter().filter(|(_, def)| def.is_dynamic()) {
            match self.start(name, def).await {
                Ok(true) => started += 1,
                Ok(false) => {}
                Err(e) => warn!(label = name, error = %e, "cannot show dynamic label"),
            }
        }
        info!(count = started, "dynamic text updates started");
        started
    }

    /// Stop every task and hide its label.
    ///
    /// Logged no-op if the scheduler is stopped and has no tasks. All tokens
    /// are cancelled first, then the tasks are joined one by one.
    pub async fn stop_all(&self) -> usize {
        let was_running = self.running.swap(false, Ordering::SeqCst);
        let drained: Vec<(LabelName, RefreshTask)> = self.tasks().drain().collect();
        if !was_running && drained.is_empty() {
            warn!("all dynamic text updates are already stopped");
            return 0;
        }

        for (_, task) in &drained {
            task.cancel();
        }
        let count = drained.len();
        for (name, task) in drained {
            task.shutdown(&name).await;
            self.ctx.registry().hide(&name);
        }
        info!(count, "dynamic text updates stopped");
        count
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn task_state(&self, name: &str) -> Option<TaskState> {
        self.tasks().get(name).map(RefreshTask::state)
    }

    /// Number of registered tasks, including ones that already gave up.
    pub fn task_count(&self) -> usize {
        self.tasks().len()
    }

    /// Names with a registered task, sorted.
    pub fn task_names(&self) -> Vec<LabelName> {
        let mut names: Vec<_> = self.tasks().keys().cloned().collect();
        names.sort();
        names
    }

    fn tasks(&self) -> MutexGuard<'_, HashMap<LabelName, RefreshTask>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
