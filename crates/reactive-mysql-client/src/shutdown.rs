//! Shutdown hooks.
//!
//! The host owns a [`ShutdownContext`], bootstrap registers close tasks on it,
//! and the host calls [`ShutdownContext::run_shutdown_tasks`] once when it
//! stops. Tasks run in reverse registration order.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::pool::MySqlPool;

type ShutdownTask = Box<dyn FnOnce() + Send>;

/// Ordered set of tasks to run at application shutdown.
#[derive(Default)]
pub struct ShutdownContext {
    tasks: Mutex<Vec<(String, ShutdownTask)>>,
    completed: AtomicBool,
}

impl fmt::Debug for ShutdownContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShutdownContext")
            .field("pending", &self.pending())
            .field("completed", &self.is_shut_down())
            .finish()
    }
}

impl ShutdownContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn tasks(&self) -> MutexGuard<'_, Vec<(String, ShutdownTask)>> {
        // A task that panicked while registering leaves the list itself intact.
        self.tasks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a task to run at shutdown.
    ///
    /// Registering after shutdown has already run executes the task immediately.
    pub fn add_shutdown_task(&self, label: impl Into<String>, task: impl FnOnce() + Send + 'static) {
        let label = label.into();
        let mut tasks = self.tasks();
        // `completed` only flips while the task lock is held.
        if self.is_shut_down() {
            drop(tasks);
            warn!(task = %label, "shutdown already ran, running task immediately");
            task();
            return;
        }
        debug!(task = %label, "shutdown task registered");
        tasks.push((label, Box::new(task)));
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.tasks().len()
    }

    /// Run every registered task, last registered first. Only the first call
    /// runs anything; it returns the number of tasks executed.
    pub fn run_shutdown_tasks(&self) -> usize {
        let tasks = {
            let mut tasks = self.tasks();
            if self.completed.swap(true, Ordering::AcqRel) {
                debug!("shutdown tasks already ran");
                return 0;
            }
            std::mem::take(&mut *tasks)
        };
        let count = tasks.len();
        for (label, task) in tasks.into_iter().rev() {
            debug!(task = %label, "running shutdown task");
            task();
        }
        info!(tasks = count, "shutdown tasks completed");
        count
    }

    pub fn is_shut_down(&self) -> bool {
        self.completed.load(Ordering::Acquire)
    }
}

/// Close `pool` when `shutdown` runs.
pub fn register_pool_close(shutdown: &ShutdownContext, data_source_name: &str, pool: &MySqlPool) {
    let pool = pool.clone();
    shutdown.add_shutdown_task(format!("close mysql pool {data_source_name}"), move || {
        pool.close();
    });
}
