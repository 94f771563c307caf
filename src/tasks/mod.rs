//! # Background task bodies.
//!
//! - [`Task`] - trait for implementing async cancelable work
//! - [`TaskFn`] - function-backed task implementation
//! - [`TaskRef`] - shared reference to a task (`Arc<dyn Task>`)
//! - [`sleeper`] - simulated work used by `run_background_task`

mod task;
mod task_fn;

pub use task::{Task, TaskRef};
pub use task_fn::{TaskFn, sleeper};
