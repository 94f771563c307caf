//! Error types used by the fastboot runtime, its command interpreter and background tasks.
//!
//! This module defines three enums:
//!
//! - [`RuntimeError`] - errors raised by the lifecycle orchestration itself (boot/shutdown).
//! - [`CommandError`] - user-facing failures of a dispatched command line.
//! - [`TaskError`] - errors raised by background task bodies.
//!
//! None of them is fatal: a [`CommandError`] is rendered straight into the response text,
//! and a [`RuntimeError`] leaves the manager in a consistent state.
//! All types provide `as_label` (stable snake_case label) for logs.

use thiserror::Error;

use crate::core::ManagerStatus;

/// # Errors produced by the lifecycle runtime.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Boot or shutdown was requested from a status the state machine does not allow.
    ///
    /// This is also how a second concurrent `boot()` is rejected: the first call has
    /// already moved the status to [`ManagerStatus::Booting`].
    #[error("cannot move from {from} to {to}")]
    InvalidTransition {
        /// Status observed when the request was made.
        from: ManagerStatus,
        /// Status the request tried to enter.
        to: ManagerStatus,
    },

    /// A service name that is not part of the configured set.
    #[error("unknown service: {0}")]
    UnknownService(String),

    /// A start/stop unit panicked before reporting back.
    #[error("unit for service {service:?} panicked")]
    UnitPanicked {
        /// Service the unit was responsible for.
        service: String,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use fastboot::{ManagerStatus, RuntimeError};
    ///
    /// let err = RuntimeError::InvalidTransition {
    ///     from: ManagerStatus::Booting,
    ///     to: ManagerStatus::Booting,
    /// };
    /// assert_eq!(err.as_label(), "runtime_invalid_transition");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::InvalidTransition { .. } => "runtime_invalid_transition",
            RuntimeError::UnknownService(_) => "runtime_unknown_service",
            RuntimeError::UnitPanicked { .. } => "runtime_unit_panicked",
        }
    }
}

/// # Failures of a dispatched command.
///
/// The `Display` output of each variant is exactly the text the shell shows,
/// so the command processor returns `err.to_string()` as the response.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Task id argument is not an integer.
    #[error("Invalid task ID.")]
    InvalidTaskId,

    /// Wrong number or shape of arguments; carries the usage line.
    #[error("Usage: {0}")]
    Usage(&'static str),

    /// No task with this id exists.
    #[error("Task {0} not found.")]
    TaskNotFound(u64),

    /// Command needs a running system and `require_running` is set.
    #[error("OS is not running.")]
    NotRunning,

    /// Unrecognized keyword; carries the input as typed.
    #[error("Unknown command: {0}")]
    Unknown(String),
}

impl CommandError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            CommandError::InvalidTaskId => "command_invalid_task_id",
            CommandError::Usage(_) => "command_usage",
            CommandError::TaskNotFound(_) => "command_task_not_found",
            CommandError::NotRunning => "command_not_running",
            CommandError::Unknown(_) => "command_unknown",
        }
    }
}

/// # Errors produced by background task bodies.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Task body failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Task observed its cancellation token (killed).
    #[error("context cancelled")]
    Canceled,
}

impl TaskError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use fastboot::TaskError;
    ///
    /// let err = TaskError::Fail { error: "boom".into() };
    /// assert_eq!(err.as_label(), "task_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Canceled => "task_canceled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_errors_render_response_text() {
        assert_eq!(CommandError::InvalidTaskId.to_string(), "Invalid task ID.");
        assert_eq!(CommandError::TaskNotFound(999).to_string(), "Task 999 not found.");
        assert_eq!(
            CommandError::Unknown("unknown_cmd".into()).to_string(),
            "Unknown command: unknown_cmd"
        );
        assert_eq!(
            CommandError::Usage("kill_task <id>").to_string(),
            "Usage: kill_task <id>"
        );
    }

    #[test]
    fn transition_error_names_both_states() {
        let err = RuntimeError::InvalidTransition {
            from: ManagerStatus::Idle,
            to: ManagerStatus::ShuttingDown,
        };
        assert_eq!(err.to_string(), "cannot move from idle to shutting down");
    }
}
