//! # Background task body.
//!
//! This module defines the [`Task`] trait (async, cancelable): the work a background
//! task performs between being registered as `Running` and being flipped to
//! `Completed`. The common handle type is [`TaskRef`], an `Arc<dyn Task>`.
//!
//! A task receives a [`CancellationToken`] that is cancelled when the task is killed
//! (`kill_task <id>`); it should check it and exit promptly.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// Shared handle to a task body.
pub type TaskRef = Arc<dyn Task>;

/// # Asynchronous, cancelable unit of background work.
///
/// # Example
/// ```
/// use tokio_util::sync::CancellationToken;
/// use async_trait::async_trait;
/// use fastboot::{Task, TaskError};
///
/// struct Indexer;
///
/// #[async_trait]
/// impl Task for Indexer {
///     fn name(&self) -> &str { "indexer" }
///
///     async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError> {
///         if ctx.is_cancelled() {
///             return Err(TaskError::Canceled);
///         }
///         // index files...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Returns the name shown by `list_tasks`.
    fn name(&self) -> &str;

    /// Performs the work until completion or cancellation.
    async fn run(&self, ctx: CancellationToken) -> Result<(), TaskError>;
}
