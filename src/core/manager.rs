//! # Manager: the one owned object behind the presentation shell.
//!
//! The [`Manager`] owns the lifecycle state (status, services, boot clock), the task
//! registry, the command processor and the event plumbing. The shell drives it with
//! three calls and renders what comes back:
//!
//! ```text
//! shell                          Manager
//!   boot()      ─────────────►   BootController::run(sink)
//!   shutdown()  ─────────────►   ShutdownController::run(sink)
//!   dispatch(l) ─────────────►   CommandProcessor::dispatch ──► Response
//!
//!   LogSink     ◄─────────────   progress lines (ordered, synchronous)
//!   subscribe() ◄─────────────   Bus ──► status stream (Event)
//!
//! Bus ──► subscriber_listener ──► SubscriberSet ──► Subscribe::on_event
//! ```
//!
//! Dropping the manager cancels its runtime token: the subscriber listener exits and
//! running background tasks observe cancellation.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use fastboot::{Config, Manager, ManagerStatus, MemorySink};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), fastboot::RuntimeError> {
//!     let mut cfg = Config::default();
//!     cfg.start_latency = Duration::from_millis(5);
//!     cfg.stop_latency = Duration::from_millis(5);
//!
//!     let log = Arc::new(MemorySink::new());
//!     let mgr = Manager::builder(cfg).with_sink(log.clone()).build();
//!
//!     mgr.boot().await?;
//!     assert_eq!(mgr.status(), ManagerStatus::Running);
//!     assert_eq!(mgr.dispatch("STATUS").await.to_string(), "OS Status: Running");
//!
//!     mgr.shutdown().await?;
//!     assert!(log.contains("OS Shutdown complete."));
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::commands::{CommandProcessor, Response};
use crate::config::Config;
use crate::core::boot::BootController;
use crate::core::builder::ManagerBuilder;
use crate::core::lifecycle::Lifecycle;
use crate::core::registry::TaskRegistry;
use crate::core::runner;
use crate::core::services::ServiceState;
use crate::core::shutdown::ShutdownController;
use crate::core::status::ManagerStatus;
use crate::error::RuntimeError;
use crate::events::{Bus, Event};
use crate::sinks::{LogSink, NullSink};
use crate::subscribers::SubscriberSet;
use crate::tasks::{TaskRef, sleeper};

/// Simulated fast-boot service manager.
pub struct Manager {
    lc: Lifecycle,
    tasks: Arc<TaskRegistry>,
    processor: CommandProcessor,
    sink: Arc<dyn LogSink>,
    subs: Arc<SubscriberSet>,
    runtime_token: CancellationToken,
}

impl Manager {
    /// Creates a builder for a manager with the given configuration.
    pub fn builder(cfg: Config) -> ManagerBuilder {
        ManagerBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        cfg: Config,
        bus: Bus,
        sink: Arc<dyn LogSink>,
        subs: Arc<SubscriberSet>,
    ) -> Self {
        let processor = CommandProcessor::new(&cfg);
        let tasks = TaskRegistry::new(bus.clone());
        Self {
            lc: Lifecycle::new(cfg, bus),
            tasks,
            processor,
            sink,
            subs,
            runtime_token: CancellationToken::new(),
        }
    }

    /// Starts every service in parallel and returns the elapsed boot time.
    ///
    /// Accepted from `Idle` or `Stopped`; any other status (including a boot in
    /// progress) fails with [`RuntimeError::InvalidTransition`].
    pub async fn boot(&self) -> Result<Duration, RuntimeError> {
        BootController::new(&self.lc).run(&self.sink).await
    }

    /// Stops every service in parallel. Accepted only from `Running`.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        ShutdownController::new(&self.lc).run(&self.sink).await
    }

    /// Shuts down with the given sink instead of the configured one.
    pub(crate) async fn shutdown_with(&self, sink: &Arc<dyn LogSink>) -> Result<(), RuntimeError> {
        ShutdownController::new(&self.lc).run(sink).await
    }

    /// Shuts down without log output if the system is running (used by `exit`).
    pub(crate) async fn shutdown_quietly(&self) {
        if self.status() != ManagerStatus::Running {
            return;
        }
        let null: Arc<dyn LogSink> = Arc::new(NullSink);
        if let Err(e) = self.shutdown_with(&null).await {
            debug!(error = %e, label = e.as_label(), "quiet shutdown skipped");
        }
    }

    /// Interprets one command line. Never fails: errors are rendered as text.
    pub async fn dispatch(&self, raw: &str) -> Response {
        self.processor.dispatch(self, raw).await
    }

    /// Current manager status.
    pub fn status(&self) -> ManagerStatus {
        self.lc.status()
    }

    /// Point-in-time copy of every service state, in configured order.
    pub fn services(&self) -> Vec<(String, ServiceState)> {
        self.lc.services.snapshot()
    }

    /// Names of the services currently running, in configured order.
    pub fn running_services(&self) -> Vec<String> {
        self.lc.services.running()
    }

    /// One `<service>: Running|Stopped` line per service.
    pub fn service_lines(&self) -> Vec<String> {
        self.services()
            .into_iter()
            .map(|(name, state)| format!("{name}: {state}"))
            .collect()
    }

    /// Duration of the last completed boot; `None` before the first boot and
    /// after shutdown.
    pub fn boot_time(&self) -> Option<Duration> {
        self.lc.clock().boot_time
    }

    /// `Boot Time: X.XX sec`, or `Boot Time: N/A` when unknown.
    pub fn boot_time_label(&self) -> String {
        match self.boot_time() {
            Some(d) => format!("Boot Time: {:.2} sec", d.as_secs_f64()),
            None => "Boot Time: N/A".to_string(),
        }
    }

    /// Time since the current boot started.
    ///
    /// `None` until that boot has completed, and again after shutdown.
    pub fn uptime(&self) -> Option<Duration> {
        let clock = self.lc.clock();
        clock.boot_time.and(clock.started).map(|s| s.elapsed())
    }

    /// The task registry.
    pub fn tasks(&self) -> &Arc<TaskRegistry> {
        &self.tasks
    }

    /// Registers a background task that completes after `duration`. Returns its id
    /// immediately.
    pub async fn run_background_task(&self, name: &str, duration: Duration) -> u64 {
        self.spawn_background(sleeper(name.to_string(), duration)).await
    }

    /// Registers `task` as a background task and runs its body concurrently.
    pub async fn spawn_background(&self, task: TaskRef) -> u64 {
        runner::spawn_background(task, &self.tasks, &self.sink, &self.runtime_token).await
    }

    /// Subscribes to the status stream. Only events published afterwards are seen.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.lc.bus.subscribe()
    }

    /// The newest `n` command lines, oldest first.
    pub fn history(&self, n: usize) -> Vec<String> {
        self.processor.history(n)
    }

    /// The configuration the manager was built with.
    pub fn config(&self) -> &Config {
        &self.lc.cfg
    }

    pub(crate) fn publish(&self, ev: Event) {
        self.lc.bus.publish(ev);
    }

    /// Forwards bus events to the subscriber set until the manager is dropped.
    pub(crate) fn subscriber_listener(&self) {
        if self.subs.is_empty() {
            return;
        }
        let mut rx = self.lc.bus.subscribe();
        let set = Arc::clone(&self.subs);
        let token = self.runtime_token.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    msg = rx.recv() => match msg {
                        Ok(ev) => set.emit(&ev),
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            debug!(skipped = n, "subscriber listener lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
        });
    }
}

impl Drop for Manager {
    fn drop(&mut self) {
        self.runtime_token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::TaskStatus;
    use crate::events::EventKind;
    use crate::sinks::MemorySink;

    fn manager() -> (Arc<Manager>, Arc<MemorySink>) {
        let log = Arc::new(MemorySink::new());
        let mgr = Manager::builder(Config::default())
            .with_sink(log.clone())
            .build();
        (mgr, log)
    }

    async fn say(mgr: &Manager, line: &str) -> String {
        mgr.dispatch(line).await.to_string()
    }

    #[tokio::test(start_paused = true)]
    async fn boot_runs_every_service_before_returning() {
        let (mgr, log) = manager();
        let elapsed = mgr.boot().await.unwrap();

        assert_eq!(mgr.status(), ManagerStatus::Running);
        assert!(mgr.services().iter().all(|(_, s)| *s == ServiceState::Running));
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_secs(2));

        let lines = log.lines();
        assert_eq!(lines.first().map(String::as_str), Some("Booting PyFastOS..."));
        assert_eq!(lines.iter().filter(|l| l.ends_with(" started.")).count(), 6);
        assert_eq!(
            lines.last().map(String::as_str),
            Some("OS Boot Complete in 1.00 seconds.")
        );
        assert_eq!(mgr.boot_time_label(), "Boot Time: 1.00 sec");
    }

    #[tokio::test(start_paused = true)]
    async fn boot_then_shutdown_stops_everything() {
        let (mgr, log) = manager();
        mgr.boot().await.unwrap();
        mgr.shutdown().await.unwrap();

        assert_eq!(mgr.status(), ManagerStatus::Stopped);
        assert!(mgr.services().iter().all(|(_, s)| *s == ServiceState::Stopped));
        assert_eq!(mgr.boot_time(), None);
        assert_eq!(mgr.boot_time_label(), "Boot Time: N/A");
        assert_eq!(
            log.lines().last().map(String::as_str),
            Some("OS Shutdown complete.")
        );
        assert_eq!(say(&mgr, "services").await, "Running services: None");
        assert_eq!(say(&mgr, "uptime").await, "OS is not running.");
    }

    #[tokio::test(start_paused = true)]
    async fn reboot_after_shutdown() {
        let (mgr, _log) = manager();
        mgr.boot().await.unwrap();
        mgr.shutdown().await.unwrap();
        mgr.boot().await.unwrap();
        assert_eq!(mgr.status(), ManagerStatus::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_boots_never_both_run() {
        let (mgr, log) = manager();
        let (a, b) = tokio::join!(mgr.boot(), mgr.boot());

        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let err = a.err().or(b.err()).unwrap();
        assert_eq!(
            err,
            RuntimeError::InvalidTransition {
                from: ManagerStatus::Booting,
                to: ManagerStatus::Booting
            }
        );
        assert_eq!(log.lines().iter().filter(|l| l.starts_with("Booting")).count(), 1);
        assert_eq!(mgr.status(), ManagerStatus::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_requires_running() {
        let (mgr, _log) = manager();
        assert!(matches!(
            mgr.shutdown().await,
            Err(RuntimeError::InvalidTransition { .. })
        ));
        assert_eq!(mgr.status(), ManagerStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn status_keyword_ignores_case() {
        let (mgr, _log) = manager();
        assert_eq!(say(&mgr, "STATUS").await, say(&mgr, "status").await);
        assert_eq!(say(&mgr, "status").await, "OS Status: Idle");

        mgr.boot().await.unwrap();
        assert_eq!(say(&mgr, "Status").await, "OS Status: Running");
    }

    #[tokio::test]
    async fn task_commands() {
        let (mgr, _log) = manager();
        assert_eq!(say(&mgr, "list_tasks").await, "No active tasks.");
        assert_eq!(say(&mgr, "add_task x").await, "Task 1 added: x");
        assert_eq!(say(&mgr, "add_task y").await, "Task 2 added: y");
        assert_eq!(
            say(&mgr, "list_tasks").await,
            "1. x - Running (priority: normal)\n2. y - Running (priority: normal)"
        );

        assert_eq!(say(&mgr, "prioritize_task 2 high").await, "Task 2 (y) priority set to high.");
        assert_eq!(say(&mgr, "kill_task 1").await, "Task 1 (x) terminated.");
        assert_eq!(say(&mgr, "kill_task 999").await, "Task 999 not found.");
        assert_eq!(
            say(&mgr, "list_tasks").await,
            "1. x - Terminated (priority: normal)\n2. y - Running (priority: high)"
        );
    }

    #[tokio::test]
    async fn invalid_task_id_is_recorded_once() {
        let (mgr, _log) = manager();
        assert_eq!(say(&mgr, "kill_task abc").await, "Invalid task ID.");
        assert_eq!(mgr.history(10), vec!["kill_task abc"]);
        assert!(mgr.tasks().is_empty().await);
    }

    #[tokio::test]
    async fn log_shows_last_ten_in_order() {
        let (mgr, _log) = manager();
        for i in 1..=12 {
            mgr.dispatch(&format!("echo {i}")).await;
        }
        let shown = say(&mgr, "log").await;
        let expected: Vec<String> = (4..=12)
            .map(|i| format!("echo {i}"))
            .chain(std::iter::once("log".to_string()))
            .collect();
        assert_eq!(shown, expected.join("\n"));
    }

    #[tokio::test]
    async fn simple_commands() {
        let (mgr, _log) = manager();
        assert_eq!(say(&mgr, "unknown_cmd").await, "Unknown command: unknown_cmd");
        assert_eq!(say(&mgr, "echo Hello World").await, "Hello World");
        assert!(mgr.dispatch("clear").await.is_clear());
        assert!(say(&mgr, "help").await.contains("prioritize_task <id> <priority>"));
        assert!(say(&mgr, "memory").await.starts_with("Memory Usage:"));
        assert_eq!(say(&mgr, "date").await.len(), "2024-01-01 00:00:00".len());
        assert_eq!(
            say(&mgr, "prioritize_task 1").await,
            "Usage: prioritize_task <id> <priority>"
        );
    }

    #[tokio::test]
    async fn require_running_gates_system_commands() {
        let mut cfg = Config::default();
        cfg.require_running = true;
        let mgr = Manager::builder(cfg).build();

        assert_eq!(say(&mgr, "services").await, "OS is not running.");
        assert_eq!(say(&mgr, "add_task x").await, "OS is not running.");
        assert_eq!(say(&mgr, "status").await, "OS Status: Idle");
        assert!(mgr.tasks().is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn require_running_accepts_after_boot() {
        let mut cfg = Config::default();
        cfg.require_running = true;
        let mgr = Manager::builder(cfg).build();

        mgr.boot().await.unwrap();
        assert_eq!(say(&mgr, "add_task x").await, "Task 1 added: x");
        assert_eq!(say(&mgr, "list_tasks").await, "1. x - Running (priority: normal)");

        mgr.shutdown().await.unwrap();
        assert_eq!(say(&mgr, "add_task y").await, "OS is not running.");
    }

    #[tokio::test(start_paused = true)]
    async fn services_and_uptime_after_boot() {
        let (mgr, _log) = manager();
        mgr.boot().await.unwrap();

        assert_eq!(
            say(&mgr, "services").await,
            "Running services: Filesystem, Networking, User Interface, Applications, \
             Security, Background Tasks"
        );

        // The clock starts with the boot, which itself took one second.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(say(&mgr, "uptime").await, "Uptime: 3.00 seconds");
    }

    #[tokio::test(start_paused = true)]
    async fn uptime_waits_for_boot_to_complete() {
        let (mgr, _log) = manager();
        let check = async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            assert_eq!(mgr.status(), ManagerStatus::Booting);
            assert_eq!(mgr.uptime(), None);
            say(&mgr, "uptime").await
        };

        let (booted, during) = tokio::join!(mgr.boot(), check);
        booted.unwrap();
        assert_eq!(during, "OS is not running.");
        assert_eq!(mgr.uptime(), Some(Duration::from_secs(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_boot_leaves_everything_stopped() {
        let sink: Arc<dyn LogSink> = Arc::new(|line: &str| {
            if line == "Security started." {
                panic!("display gone");
            }
        });
        let mgr = Manager::builder(Config::default()).with_sink(sink).build();

        let err = mgr.boot().await.unwrap_err();
        assert_eq!(
            err,
            RuntimeError::UnitPanicked {
                service: "Security".to_string()
            }
        );
        assert_eq!(mgr.status(), ManagerStatus::Stopped);
        assert!(mgr.running_services().is_empty());
        assert_eq!(say(&mgr, "services").await, "Running services: None");
        assert_eq!(mgr.boot_time_label(), "Boot Time: N/A");
        assert_eq!(mgr.uptime(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn background_task_completes() {
        let (mgr, log) = manager();
        assert_eq!(
            say(&mgr, "run_task 3 backup").await,
            "Task 1 running in background: backup (3.00 seconds)"
        );
        assert_eq!(mgr.tasks().get(1).await.unwrap().priority, "background");

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(mgr.tasks().get(1).await.unwrap().status, TaskStatus::Completed);
        assert!(log.contains("Background task 1 (backup) completed."));
    }

    #[tokio::test(start_paused = true)]
    async fn exit_shuts_down_quietly() {
        let (mgr, log) = manager();
        mgr.boot().await.unwrap();
        let before = log.lines().len();

        let resp = mgr.dispatch("quit").await;
        assert_eq!(resp, Response::Exit("Goodbye!".into()));
        assert_eq!(mgr.status(), ManagerStatus::Stopped);
        assert_eq!(log.lines().len(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn status_stream_reports_boot() {
        let (mgr, _log) = manager();
        let mut rx = mgr.subscribe();
        mgr.boot().await.unwrap();

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        assert_eq!(kinds.first(), Some(&EventKind::StatusChanged));
        assert_eq!(kinds.last(), Some(&EventKind::BootCompleted));
        assert_eq!(
            kinds.iter().filter(|k| **k == EventKind::ServiceStarted).count(),
            6
        );
    }
}
