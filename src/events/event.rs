//! # Runtime events emitted by the manager, its controllers and the task registry.
//!
//! The [`EventKind`] enum classifies event types across four categories:
//! - **Lifecycle events**: boot/shutdown progress and manager status changes
//! - **Service events**: a single service started or stopped
//! - **Task events**: task registry mutations and background completions
//! - **Subscriber events**: delivery problems inside the fan-out
//!
//! The [`Event`] struct carries the metadata (service, task id/name, status, elapsed).
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use fastboot::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::TaskAdded)
//!     .with_task_id(1)
//!     .with_task("build");
//!
//! assert_eq!(ev.kind, EventKind::TaskAdded);
//! assert_eq!(ev.task.as_deref(), Some("build"));
//! assert_eq!(ev.task_id, Some(1));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::core::{ManagerStatus, TaskStatus};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Lifecycle events ===
    /// Manager status changed.
    ///
    /// Sets:
    /// - `status`: the new status
    StatusChanged,

    /// Boot finished; every service is running.
    ///
    /// Sets:
    /// - `elapsed_ms`: boot duration
    BootCompleted,

    /// Shutdown finished; every service is stopped.
    ShutdownCompleted,

    // === Service events ===
    /// A service finished starting.
    ///
    /// Sets:
    /// - `service`: service name
    ServiceStarted,

    /// A service finished stopping.
    ///
    /// Sets:
    /// - `service`: service name
    ServiceStopped,

    // === Task events ===
    /// A task was registered.
    ///
    /// Sets:
    /// - `task_id`, `task`, `task_status`
    TaskAdded,

    /// A task was killed.
    ///
    /// Sets:
    /// - `task_id`, `task`
    TaskTerminated,

    /// A task's priority changed.
    ///
    /// Sets:
    /// - `task_id`, `task`
    /// - `reason`: the new priority
    TaskPrioritized,

    /// A background task finished its work.
    ///
    /// Sets:
    /// - `task_id`, `task`
    TaskCompleted,

    /// A background task body returned an error.
    ///
    /// Sets:
    /// - `task_id`, `task`
    /// - `reason`: error message
    TaskFailed,

    // === Command events ===
    /// A command line was dispatched (recorded in history).
    ///
    /// Sets:
    /// - `reason`: the raw command line
    CommandDispatched,

    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `reason`: `subscriber=<name> info=<panic message>`
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `reason`: `subscriber=<name> reason=<full|closed>`
    SubscriberOverflow,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Service name, for service events.
    pub service: Option<Arc<str>>,
    /// Task id, for task events.
    pub task_id: Option<u64>,
    /// Task name, for task events.
    pub task: Option<Arc<str>>,
    /// Task status after the change, for task events.
    pub task_status: Option<TaskStatus>,
    /// Manager status, for `StatusChanged`.
    pub status: Option<ManagerStatus>,
    /// Elapsed time in milliseconds (compact).
    pub elapsed_ms: Option<u64>,
    /// Human-readable detail (errors, priorities, command lines).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            service: None,
            task_id: None,
            task: None,
            task_status: None,
            status: None,
            elapsed_ms: None,
            reason: None,
        }
    }

    /// Attaches a service name.
    #[inline]
    pub fn with_service(mut self, service: impl Into<Arc<str>>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Attaches a task id.
    #[inline]
    pub fn with_task_id(mut self, id: u64) -> Self {
        self.task_id = Some(id);
        self
    }

    /// Attaches a task name.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Attaches a task status.
    #[inline]
    pub fn with_task_status(mut self, status: TaskStatus) -> Self {
        self.task_status = Some(status);
        self
    }

    /// Attaches a manager status.
    #[inline]
    pub fn with_status(mut self, status: ManagerStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Attaches an elapsed duration (stored as milliseconds).
    #[inline]
    pub fn with_elapsed(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u64::MAX)) as u64;
        self.elapsed_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_reason(format!("subscriber={subscriber} info={info}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_is_monotonic() {
        let a = Event::new(EventKind::ServiceStarted);
        let b = Event::new(EventKind::ServiceStarted);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn elapsed_is_stored_in_millis() {
        let ev = Event::new(EventKind::BootCompleted).with_elapsed(Duration::from_millis(1_250));
        assert_eq!(ev.elapsed_ms, Some(1_250));
    }
}
