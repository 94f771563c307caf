//! # Manager status and its state machine.
//!
//! ```text
//!   Idle ──┐
//!          ├──► Booting ──► Running ──► ShuttingDown ──► Stopped
//!   Stopped┘                                               │
//!      ▲                                                   │
//!      └───────────────────────────────────────────────────┘
//! ```
//!
//! [`StatusCell`] holds the single process-wide value for one manager and only
//! moves it with compare-and-swap, so two concurrent `boot()` calls can never both
//! observe `Idle` and start units.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::RuntimeError;

/// Lifecycle status of the whole manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ManagerStatus {
    /// Constructed, never booted.
    Idle = 0,
    /// Start units are in flight.
    Booting = 1,
    /// Every service is running.
    Running = 2,
    /// Stop units are in flight.
    ShuttingDown = 3,
    /// Every service is stopped after a shutdown.
    Stopped = 4,
}

impl ManagerStatus {
    /// Lowercase label, e.g. `shutting down`.
    pub fn as_str(self) -> &'static str {
        match self {
            ManagerStatus::Idle => "idle",
            ManagerStatus::Booting => "booting",
            ManagerStatus::Running => "running",
            ManagerStatus::ShuttingDown => "shutting down",
            ManagerStatus::Stopped => "stopped",
        }
    }

    /// Capitalized label for display, e.g. `Shutting down`.
    pub fn capitalized(self) -> &'static str {
        match self {
            ManagerStatus::Idle => "Idle",
            ManagerStatus::Booting => "Booting",
            ManagerStatus::Running => "Running",
            ManagerStatus::ShuttingDown => "Shutting down",
            ManagerStatus::Stopped => "Stopped",
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            1 => ManagerStatus::Booting,
            2 => ManagerStatus::Running,
            3 => ManagerStatus::ShuttingDown,
            4 => ManagerStatus::Stopped,
            _ => ManagerStatus::Idle,
        }
    }
}

impl fmt::Display for ManagerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Atomic holder of a [`ManagerStatus`].
#[derive(Debug)]
pub(crate) struct StatusCell {
    inner: AtomicU8,
}

impl StatusCell {
    pub(crate) fn new(status: ManagerStatus) -> Self {
        Self {
            inner: AtomicU8::new(status as u8),
        }
    }

    pub(crate) fn get(&self) -> ManagerStatus {
        ManagerStatus::from_u8(self.inner.load(Ordering::Acquire))
    }

    /// Moves to `to` if the current status is one of `from`.
    ///
    /// Returns the status that was replaced.
    pub(crate) fn transition(
        &self,
        from: &[ManagerStatus],
        to: ManagerStatus,
    ) -> Result<ManagerStatus, RuntimeError> {
        let mut current = self.get();
        loop {
            if !from.contains(&current) {
                return Err(RuntimeError::InvalidTransition { from: current, to });
            }
            match self.inner.compare_exchange(
                current as u8,
                to as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Ok(current),
                Err(actual) => current = ManagerStatus::from_u8(actual),
            }
        }
    }
}
