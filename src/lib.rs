//! # fastboot
//!
//! **fastboot** is a simulated fast-boot service manager.
//!
//! A fixed set of named services is started and stopped concurrently, with the
//! aggregate boot time and per-service status tracked. A small command interpreter
//! queries and mutates that state and manages ad-hoc tasks. Windows and widgets are
//! left to a presentation shell, which calls into the [`Manager`] and renders the
//! log lines and status updates it gets back.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!            presentation shell (terminal, GUI, tests)
//!        boot() │ shutdown() │ dispatch(line) ▲ Response     ▲ LogSink lines
//!               ▼            ▼                │              │
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Manager                                                          │
//! │  - Lifecycle (StatusCell, ServiceRegistry, boot clock)            │
//! │  - BootController / ShutdownController (bounded join set)         │
//! │  - CommandProcessor (grammar, history, require_running gate)      │
//! │  - TaskRegistry (ad-hoc and background tasks)                     │
//! └──────┬──────────────────┬──────────────────┬───────────────┬──────┘
//!        ▼                  ▼                  ▼               │
//!   start/stop unit    start/stop unit    background task      │
//!        │ Publishes:       │                  │ Publishes:    │
//!        │ - ServiceStarted │                  │ - TaskAdded   │
//!        │ - ServiceStopped │                  │ - TaskCompleted
//!        ▼                  ▼                  ▼               ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! │                   (capacity: Config::bus_capacity)                │
//! └───────────┬─────────────────────────────────────┬─────────────────┘
//!             ▼                                     ▼
//!   subscriber_listener ──► SubscriberSet     Manager::subscribe()
//!                          (per-sub queues)   (status stream for the shell)
//! ```
//!
//! ### Lifecycle
//! ```text
//! Idle ──boot()──► Booting ──(all start units joined)──► Running
//!                     │                                     │
//!                     └──(unit failed)──► Stopped ◄─────────┤
//!                                            ▲        shutdown()
//!                                            │              ▼
//!                                            └──(all joined)── ShuttingDown
//! ```
//! Every transition is a compare-and-swap: a second `boot()` while one is in
//! flight fails with [`RuntimeError::InvalidTransition`].
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                     |
//! |-------------------|--------------------------------------------------------------|----------------------------------------|
//! | **Manager**       | Boot, shutdown and command dispatch.                         | [`Manager`], [`ManagerBuilder`]        |
//! | **Commands**      | Fixed grammar, tagged responses.                             | [`Command`], [`Response`]              |
//! | **Tasks**         | Ad-hoc and background tasks.                                 | [`TaskRegistry`], [`Task`], [`TaskFn`] |
//! | **Log lines**     | Ordered progress output for the shell.                       | [`LogSink`], [`MemorySink`]            |
//! | **Subscriber API**| Hook into the status stream.                                 | [`Subscribe`], [`Event`]               |
//! | **Errors**        | Typed errors for lifecycle, commands and task bodies.        | [`RuntimeError`], [`CommandError`]     |
//! | **Configuration** | Services, latencies, command options.                        | [`Config`], [`ArgumentCase`]           |
//!
//! ## Optional features
//! - `logging`: exports the built-in [`LogWriter`] subscriber (enabled by default).
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use fastboot::{Config, Manager, MemorySink, Response};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut cfg = Config::default();
//!     cfg.start_latency = Duration::from_millis(10);
//!     cfg.stop_latency = Duration::from_millis(10);
//!
//!     // Build subscribers (optional)
//!     #[cfg(feature = "logging")]
//!     let subs: Vec<Arc<dyn fastboot::Subscribe>> = vec![Arc::new(fastboot::LogWriter::default())];
//!     #[cfg(not(feature = "logging"))]
//!     let subs: Vec<Arc<dyn fastboot::Subscribe>> = Vec::new();
//!
//!     let log = Arc::new(MemorySink::new());
//!     let mgr = Manager::builder(cfg)
//!         .with_sink(log.clone())
//!         .with_subscribers(subs)
//!         .build();
//!
//!     mgr.boot().await?;
//!     assert!(log.contains("Networking started."));
//!
//!     assert_eq!(mgr.dispatch("add_task indexer").await.to_string(), "Task 1 added: indexer");
//!     assert_eq!(mgr.dispatch("exit").await, Response::Exit("Goodbye!".into()));
//!     Ok(())
//! }
//! ```

mod commands;
mod config;
mod core;
mod error;
mod events;
mod sinks;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use commands::{Command, Report, Response};
pub use config::{ArgumentCase, Config};
pub use core::{
    BACKGROUND_PRIORITY, DEFAULT_PRIORITY, Manager, ManagerBuilder, ManagerStatus,
    ServiceRegistry, ServiceState, TaskInfo, TaskRegistry, TaskStatus,
};
pub use error::{CommandError, RuntimeError, TaskError};
pub use events::{Bus, Event, EventKind};
pub use sinks::{LogSink, MemorySink, NullSink};
pub use subscribers::{Subscribe, SubscriberSet};
pub use tasks::{Task, TaskFn, TaskRef, sleeper};

// Optional: expose a simple built-in logger subscriber (demo/reference).
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
