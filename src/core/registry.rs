//! # Task registry - ad-hoc tasks created by commands and background jobs.
//!
//! ## Rules
//! - Ids are `count + 1` at creation time; entries are never removed, so an id is
//!   never reused for the lifetime of the registry.
//! - Id assignment and every status flip happen under one write lock.
//! - Lookup failures are reported as [`CommandError::TaskNotFound`], never panics.
//! - A background completion only moves `Running → Completed`; it never overwrites
//!   a `Terminated` set by `kill_task`.
//! - Every mutation is published on the [`Bus`].
//!
//! ```text
//! add/register ──► Running ──┬── kill ─────────► Terminated
//!                            ├── finish(Ok) ───► Completed
//!                            └── finish(Err) ──► Terminated (+ TaskFailed)
//! ```

use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::error::{CommandError, TaskError};
use crate::events::{Bus, Event, EventKind};

/// Priority assigned by `add_task`.
pub const DEFAULT_PRIORITY: &str = "normal";
/// Priority assigned to background tasks.
pub const BACKGROUND_PRIORITY: &str = "background";

/// Status of a registered task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Running,
    Terminated,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Running => "Running",
            TaskStatus::Terminated => "Terminated",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInfo {
    pub id: u64,
    pub name: String,
    pub status: TaskStatus,
    /// Free-form; stored verbatim.
    pub priority: String,
}

impl fmt::Display for TaskInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} - {} (priority: {})",
            self.id, self.name, self.status, self.priority
        )
    }
}

struct Entry {
    info: TaskInfo,
    /// Present for background tasks; cancelled on kill.
    cancel: Option<CancellationToken>,
}

/// Shared registry of tasks.
pub struct TaskRegistry {
    tasks: RwLock<Vec<Entry>>,
    bus: Bus,
}

impl TaskRegistry {
    /// Creates an empty registry publishing to `bus`.
    pub fn new(bus: Bus) -> Arc<Self> {
        Arc::new(Self {
            tasks: RwLock::new(Vec::new()),
            bus,
        })
    }

    /// Registers a plain task (`Running`, priority `normal`) and returns its id.
    pub async fn add(&self, name: &str) -> u64 {
        self.register(name, DEFAULT_PRIORITY, None).await
    }

    /// Registers a task with an explicit priority and optional cancellation handle.
    pub(crate) async fn register(
        &self,
        name: &str,
        priority: &str,
        cancel: Option<CancellationToken>,
    ) -> u64 {
        let mut tasks = self.tasks.write().await;
        let id = tasks.len() as u64 + 1;
        tasks.push(Entry {
            info: TaskInfo {
                id,
                name: name.to_string(),
                status: TaskStatus::Running,
                priority: priority.to_string(),
            },
            cancel,
        });
        drop(tasks);

        self.bus.publish(
            Event::new(EventKind::TaskAdded)
                .with_task_id(id)
                .with_task(name)
                .with_task_status(TaskStatus::Running),
        );
        id
    }

    /// Marks the task `Terminated` and cancels its work, if any.
    pub async fn kill(&self, id: u64) -> Result<TaskInfo, CommandError> {
        let info = {
            let mut tasks = self.tasks.write().await;
            let entry = Self::find_mut(&mut tasks, id)?;
            entry.info.status = TaskStatus::Terminated;
            if let Some(token) = &entry.cancel {
                token.cancel();
            }
            entry.info.clone()
        };

        self.bus.publish(
            Event::new(EventKind::TaskTerminated)
                .with_task_id(id)
                .with_task(info.name.as_str())
                .with_task_status(TaskStatus::Terminated),
        );
        Ok(info)
    }

    /// Replaces the task's priority with `priority` (any string).
    pub async fn prioritize(&self, id: u64, priority: &str) -> Result<TaskInfo, CommandError> {
        let info = {
            let mut tasks = self.tasks.write().await;
            let entry = Self::find_mut(&mut tasks, id)?;
            entry.info.priority = priority.to_string();
            entry.info.clone()
        };

        self.bus.publish(
            Event::new(EventKind::TaskPrioritized)
                .with_task_id(id)
                .with_task(info.name.as_str())
                .with_reason(priority),
        );
        Ok(info)
    }

    /// Applies the outcome of a background task body.
    ///
    /// Returns the updated task if a transition happened, `None` if the task was
    /// no longer `Running` (already killed) or is unknown.
    pub(crate) async fn finish(&self, id: u64, outcome: &Result<(), TaskError>) -> Option<TaskInfo> {
        let info = {
            let mut tasks = self.tasks.write().await;
            let entry = Self::find_mut(&mut tasks, id).ok()?;
            if entry.info.status != TaskStatus::Running {
                return None;
            }
            entry.info.status = match outcome {
                Ok(()) => TaskStatus::Completed,
                Err(_) => TaskStatus::Terminated,
            };
            entry.info.clone()
        };

        let ev = match outcome {
            Ok(()) => Event::new(EventKind::TaskCompleted),
            Err(TaskError::Canceled) => Event::new(EventKind::TaskTerminated),
            Err(e) => Event::new(EventKind::TaskFailed).with_reason(e.to_string()),
        };
        self.bus.publish(
            ev.with_task_id(id)
                .with_task(info.name.as_str())
                .with_task_status(info.status),
        );
        Some(info)
    }

    /// Returns one task by id.
    pub async fn get(&self, id: u64) -> Option<TaskInfo> {
        let tasks = self.tasks.read().await;
        tasks
            .iter()
            .find(|e| e.info.id == id)
            .map(|e| e.info.clone())
    }

    /// Returns every task in insertion order.
    pub async fn list(&self) -> Vec<TaskInfo> {
        let tasks = self.tasks.read().await;
        tasks.iter().map(|e| e.info.clone()).collect()
    }

    /// Number of registered tasks (all statuses).
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Returns true if no task was ever registered.
    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }

    /// Renders the `list_tasks` response.
    pub async fn render(&self) -> String {
        let tasks = self.list().await;
        if tasks.is_empty() {
            return "No active tasks.".to_string();
        }
        tasks
            .iter()
            .map(TaskInfo::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn find_mut(tasks: &mut [Entry], id: u64) -> Result<&mut Entry, CommandError> {
        tasks
            .iter_mut()
            .find(|e| e.info.id == id)
            .ok_or(CommandError::TaskNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Arc<TaskRegistry> {
        TaskRegistry::new(Bus::new(64))
    }

    #[tokio::test]
    async fn ids_follow_insertion_order() {
        let reg = registry();
        assert_eq!(reg.add("x").await, 1);
        assert_eq!(reg.add("y").await, 2);

        let names: Vec<_> = reg.list().await.into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["x", "y"]);
        assert_eq!(
            reg.render().await,
            "1. x - Running (priority: normal)\n2. y - Running (priority: normal)"
        );
    }

    #[tokio::test]
    async fn empty_list_text() {
        assert_eq!(registry().render().await, "No active tasks.");
    }

    #[tokio::test]
    async fn kill_unknown_changes_nothing() {
        let reg = registry();
        assert_eq!(reg.kill(999).await, Err(CommandError::TaskNotFound(999)));
        assert!(reg.is_empty().await);

        reg.add("keep").await;
        assert_eq!(reg.kill(999).await, Err(CommandError::TaskNotFound(999)));
        assert_eq!(reg.get(1).await.unwrap().status, TaskStatus::Running);
    }

    #[tokio::test]
    async fn prioritize_touches_only_priority() {
        let reg = registry();
        let id = reg.add("build").await;
        let before = reg.get(id).await.unwrap();

        let after = reg.prioritize(id, "high").await.unwrap();
        assert_eq!(after.priority, "high");
        assert_eq!(after.name, before.name);
        assert_eq!(after.status, before.status);
        assert_eq!(after.id, before.id);
    }

    #[tokio::test]
    async fn finish_never_overwrites_terminated() {
        let reg = registry();
        let token = CancellationToken::new();
        let id = reg.register("sync", BACKGROUND_PRIORITY, Some(token.clone())).await;

        reg.kill(id).await.unwrap();
        assert!(token.is_cancelled());
        assert_eq!(reg.finish(id, &Ok(())).await, None);
        assert_eq!(reg.get(id).await.unwrap().status, TaskStatus::Terminated);
    }

    #[tokio::test]
    async fn failed_body_terminates_and_publishes() {
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let reg = TaskRegistry::new(bus);
        let id = reg.register("sync", BACKGROUND_PRIORITY, None).await;

        let outcome = Err(TaskError::Fail { error: "disk".into() });
        let info = reg.finish(id, &outcome).await.unwrap();
        assert_eq!(info.status, TaskStatus::Terminated);

        assert_eq!(rx.recv().await.unwrap().kind, EventKind::TaskAdded);
        let failed = rx.recv().await.unwrap();
        assert_eq!(failed.kind, EventKind::TaskFailed);
        assert_eq!(failed.task_id, Some(id));
    }
}
