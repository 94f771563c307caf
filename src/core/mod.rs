//! Runtime core: lifecycle, orchestration and the task registry.
//!
//! The public entry point is [`Manager`] (built through [`ManagerBuilder`]).
//!
//! Internal modules:
//! - [`status`]: manager status and its compare-and-swap state machine;
//! - [`services`]: fixed service set with per-slot state;
//! - [`units`]: bounded, joined start/stop units;
//! - [`boot`] / [`shutdown`]: the two lifecycle controllers;
//! - [`registry`]: ad-hoc tasks;
//! - [`runner`]: background task execution;
//! - [`history`]: command history.

mod boot;
mod builder;
mod history;
mod lifecycle;
mod manager;
mod registry;
mod runner;
mod services;
mod shutdown;
mod status;
mod units;

pub use builder::ManagerBuilder;
pub(crate) use history::CommandHistory;
pub use manager::Manager;
pub use registry::{BACKGROUND_PRIORITY, DEFAULT_PRIORITY, TaskInfo, TaskRegistry, TaskStatus};
pub use services::{ServiceRegistry, ServiceState};
pub use status::ManagerStatus;
