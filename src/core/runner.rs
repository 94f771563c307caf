//! # Run a background task to completion.
//!
//! The one fire-and-forget operation of the manager: the task is registered
//! synchronously (the caller gets its id), then its body runs on a spawned tokio
//! task and the outcome is written back to the [`TaskRegistry`].
//!
//! ## Event flow
//! ```text
//! spawn_background(task)
//!   ├─► registry.register(name, "background", child token)   → TaskAdded
//!   ├─► sink: "Background task <id> (<name>) started."
//!   └─► tokio::spawn:
//!         task.run(token)
//!           ├─ Ok        → finish → Completed   → TaskCompleted,  sink "... completed."
//!           ├─ Canceled  → finish (no-op after kill, else Terminated)
//!           └─ Fail      → finish → Terminated  → TaskFailed,     sink "... failed: <err>"
//! ```
//!
//! ## Rules
//! - The token is a child of the manager's runtime token: killing the task or
//!   dropping the manager cancels it.
//! - A completion never overwrites `Terminated` (see `TaskRegistry::finish`).

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::core::registry::{BACKGROUND_PRIORITY, TaskRegistry};
use crate::error::TaskError;
use crate::sinks::LogSink;
use crate::tasks::TaskRef;

/// Registers `task` and spawns its body. Returns the task id immediately.
pub(crate) async fn spawn_background(
    task: TaskRef,
    registry: &Arc<TaskRegistry>,
    sink: &Arc<dyn LogSink>,
    parent: &CancellationToken,
) -> u64 {
    let token = parent.child_token();
    let name = task.name().to_string();
    let id = registry
        .register(&name, BACKGROUND_PRIORITY, Some(token.clone()))
        .await;
    sink.append(&format!("Background task {id} ({name}) started."));

    let registry = registry.clone();
    let sink = sink.clone();
    tokio::spawn(async move {
        let outcome = task.run(token).await;
        let applied = registry.finish(id, &outcome).await;
        debug!(id, task = %name, applied = applied.is_some(), "background task finished");

        if applied.is_none() {
            return;
        }
        match outcome {
            Ok(()) => sink.append(&format!("Background task {id} ({name}) completed.")),
            Err(TaskError::Canceled) => {
                sink.append(&format!("Background task {id} ({name}) cancelled."))
            }
            Err(e) => sink.append(&format!("Background task {id} ({name}) failed: {e}")),
        }
    });

    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::TaskStatus;
    use crate::events::Bus;
    use crate::sinks::MemorySink;
    use crate::tasks::{TaskFn, sleeper};
    use std::time::Duration;

    fn fixture() -> (Arc<TaskRegistry>, Arc<MemorySink>, Arc<dyn LogSink>) {
        let mem = Arc::new(MemorySink::new());
        let sink: Arc<dyn LogSink> = mem.clone();
        (TaskRegistry::new(Bus::new(64)), mem, sink)
    }

    #[tokio::test(start_paused = true)]
    async fn completes_after_duration() {
        let (reg, mem, sink) = fixture();
        let root = CancellationToken::new();

        let id = spawn_background(sleeper("backup", Duration::from_secs(5)), &reg, &sink, &root).await;
        let info = reg.get(id).await.unwrap();
        assert_eq!(info.status, TaskStatus::Running);
        assert_eq!(info.priority, "background");
        assert_eq!(mem.lines(), vec!["Background task 1 (backup) started."]);

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(reg.get(id).await.unwrap().status, TaskStatus::Completed);
        assert!(mem.contains("Background task 1 (backup) completed."));
    }

    #[tokio::test(start_paused = true)]
    async fn kill_wins_over_completion() {
        let (reg, mem, sink) = fixture();
        let root = CancellationToken::new();

        let id = spawn_background(sleeper("backup", Duration::from_secs(5)), &reg, &sink, &root).await;
        reg.kill(id).await.unwrap();

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(reg.get(id).await.unwrap().status, TaskStatus::Terminated);
        assert_eq!(mem.lines().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_is_logged() {
        let (reg, mem, sink) = fixture();
        let root = CancellationToken::new();
        let task: TaskRef = TaskFn::arc("sync", |_ctx: CancellationToken| async {
            Err(TaskError::Fail { error: "disk full".into() })
        });

        let id = spawn_background(task, &reg, &sink, &root).await;
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(reg.get(id).await.unwrap().status, TaskStatus::Terminated);
        assert!(mem.contains("Background task 1 (sync) failed: execution failed: disk full"));
    }
}
