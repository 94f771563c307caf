//! # BootController: parallel start of every service.
//!
//! ```text
//! Idle|Stopped ──► Booting
//!   sink: "Booting <name>..."
//!   run_units(Running, start_latency)   ── barrier ──┐
//!                                                    ▼
//!                           Running (only after every unit finished)
//!   sink: "OS Boot Complete in X.XX seconds."
//! ```
//!
//! ## Rules
//! - Boot never returns, and the status never becomes `Running`, while a start unit
//!   is in flight.
//! - A second boot while one is in progress fails with `InvalidTransition`
//!   (the status is already `Booting`).
//! - If a unit fails, the barrier still completes, every service is put back to
//!   `Stopped`, the status falls back to `Stopped` so the boot can be retried,
//!   and the error is returned.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::warn;

use crate::core::lifecycle::Lifecycle;
use crate::core::services::ServiceState;
use crate::core::status::ManagerStatus;
use crate::core::units::{UnitPlan, run_units};
use crate::error::RuntimeError;
use crate::events::{Event, EventKind};
use crate::sinks::LogSink;

pub(crate) struct BootController<'a> {
    lc: &'a Lifecycle,
}

impl<'a> BootController<'a> {
    pub(crate) fn new(lc: &'a Lifecycle) -> Self {
        Self { lc }
    }

    /// Starts every service and returns the elapsed boot time.
    pub(crate) async fn run(&self, sink: &Arc<dyn LogSink>) -> Result<Duration, RuntimeError> {
        let lc = self.lc;
        lc.transition(
            &[ManagerStatus::Idle, ManagerStatus::Stopped],
            ManagerStatus::Booting,
        )?;

        let start = Instant::now();
        lc.update_clock(|c| {
            c.started = Some(start);
            c.boot_time = None;
        });
        sink.append(&format!("Booting {}...", lc.cfg.name));

        let plan = UnitPlan {
            target: ServiceState::Running,
            latency: lc.cfg.start_latency,
            workers: lc.cfg.worker_limit(),
        };
        if let Err(e) = run_units(plan, &lc.services, sink, &lc.bus).await {
            warn!(error = %e, "boot failed");
            lc.update_clock(|c| c.started = None);
            lc.services.reset_all(ServiceState::Stopped);
            lc.transition(&[ManagerStatus::Booting], ManagerStatus::Stopped)?;
            return Err(e);
        }

        let elapsed = start.elapsed();
        lc.update_clock(|c| c.boot_time = Some(elapsed));
        lc.transition(&[ManagerStatus::Booting], ManagerStatus::Running)?;

        sink.append(&format!(
            "OS Boot Complete in {:.2} seconds.",
            elapsed.as_secs_f64()
        ));
        lc.bus
            .publish(Event::new(EventKind::BootCompleted).with_elapsed(elapsed));
        Ok(elapsed)
    }
}
