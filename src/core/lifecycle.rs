//! # Lifecycle state shared by the boot and shutdown controllers.
//!
//! Holds the manager status, the service registry and the boot clock. Status
//! changes go through [`Lifecycle::transition`], which publishes `StatusChanged`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::info;

use crate::config::Config;
use crate::core::services::ServiceRegistry;
use crate::core::status::{ManagerStatus, StatusCell};
use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind};

/// Timing of the current/last boot.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct BootClock {
    /// When the current boot started; `None` before the first boot and after shutdown.
    pub started: Option<Instant>,
    /// Duration of the last completed boot; reset on shutdown.
    pub boot_time: Option<Duration>,
}

pub(crate) struct Lifecycle {
    pub cfg: Config,
    pub bus: Bus,
    pub services: Arc<ServiceRegistry>,
    status: StatusCell,
    clock: Mutex<BootClock>,
}

impl Lifecycle {
    pub(crate) fn new(cfg: Config, bus: Bus) -> Self {
        let services = Arc::new(ServiceRegistry::new(&cfg.services));
        Self {
            cfg,
            bus,
            services,
            status: StatusCell::new(ManagerStatus::Idle),
            clock: Mutex::new(BootClock::default()),
        }
    }

    pub(crate) fn status(&self) -> ManagerStatus {
        self.status.get()
    }

    /// Moves the status to `to` if it is currently one of `from`.
    pub(crate) fn transition(
        &self,
        from: &[ManagerStatus],
        to: ManagerStatus,
    ) -> Result<(), RuntimeError> {
        let prev = self.status.transition(from, to)?;
        info!(from = %prev, to = %to, "status changed");
        self.bus
            .publish(Event::new(EventKind::StatusChanged).with_status(to));
        Ok(())
    }

    pub(crate) fn clock(&self) -> BootClock {
        *self.lock_clock()
    }

    pub(crate) fn update_clock(&self, f: impl FnOnce(&mut BootClock)) {
        f(&mut self.lock_clock());
    }

    fn lock_clock(&self) -> MutexGuard<'_, BootClock> {
        self.clock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
