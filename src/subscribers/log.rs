//! # LogWriter - event to `tracing` bridge
//!
//! A minimal subscriber that turns incoming [`Event`]s into `tracing` records
//! under the `fastboot::events` target. Install any `tracing` subscriber
//! (e.g. `tracing_subscriber::fmt`) to see them.
//!
//! ## Example output (fmt layer)
//! ```text
//! INFO fastboot::events: status status=booting
//! INFO fastboot::events: service started service="Filesystem"
//! INFO fastboot::events: boot completed elapsed_ms=1001
//! INFO fastboot::events: task added id=1 task="build"
//! WARN fastboot::events: task failed id=2 task="sync" reason="execution failed: disk"
//! ```

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let service = e.service.as_deref().unwrap_or("-");
        let task = e.task.as_deref().unwrap_or("-");
        let reason = e.reason.as_deref().unwrap_or("-");

        match e.kind {
            EventKind::StatusChanged => {
                let status = e.status.map(|s| s.as_str()).unwrap_or("-");
                info!(target: "fastboot::events", status, "status");
            }
            EventKind::BootCompleted => {
                info!(target: "fastboot::events", elapsed_ms = e.elapsed_ms, "boot completed");
            }
            EventKind::ShutdownCompleted => {
                info!(target: "fastboot::events", "shutdown completed");
            }
            EventKind::ServiceStarted => {
                info!(target: "fastboot::events", service, "service started");
            }
            EventKind::ServiceStopped => {
                info!(target: "fastboot::events", service, "service stopped");
            }
            EventKind::TaskAdded => {
                info!(target: "fastboot::events", id = e.task_id, task, "task added");
            }
            EventKind::TaskTerminated => {
                info!(target: "fastboot::events", id = e.task_id, task, "task terminated");
            }
            EventKind::TaskPrioritized => {
                info!(target: "fastboot::events", id = e.task_id, task, priority = reason, "task prioritized");
            }
            EventKind::TaskCompleted => {
                info!(target: "fastboot::events", id = e.task_id, task, "task completed");
            }
            EventKind::TaskFailed => {
                warn!(target: "fastboot::events", id = e.task_id, task, reason, "task failed");
            }
            EventKind::CommandDispatched => {
                debug!(target: "fastboot::events", command = reason, "command");
            }
            EventKind::SubscriberOverflow => {
                warn!(target: "fastboot::events", reason, "subscriber overflow");
            }
            EventKind::SubscriberPanicked => {
                warn!(target: "fastboot::events", reason, "subscriber panicked");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
