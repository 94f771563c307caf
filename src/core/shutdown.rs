//! # ShutdownController: parallel stop of every service.
//!
//! Mirrors [`BootController`](super::boot::BootController):
//!
//! ```text
//! Running ──► ShuttingDown
//!   sink: "Shutting down <name>..."
//!   run_units(Stopped, stop_latency)   ── barrier ──► Stopped
//!   boot clock reset (boot time "unknown")
//!   sink: "OS Shutdown complete."
//! ```
//!
//! Shutdown is only accepted from `Running`. A failed unit still ends in
//! `Stopped`; the error is returned after the barrier.

use std::sync::Arc;

use tracing::warn;

use crate::core::lifecycle::Lifecycle;
use crate::core::services::ServiceState;
use crate::core::status::ManagerStatus;
use crate::core::units::{UnitPlan, run_units};
use crate::error::RuntimeError;
use crate::events::{Event, EventKind};
use crate::sinks::LogSink;

pub(crate) struct ShutdownController<'a> {
    lc: &'a Lifecycle,
}

impl<'a> ShutdownController<'a> {
    pub(crate) fn new(lc: &'a Lifecycle) -> Self {
        Self { lc }
    }

    pub(crate) async fn run(&self, sink: &Arc<dyn LogSink>) -> Result<(), RuntimeError> {
        let lc = self.lc;
        lc.transition(&[ManagerStatus::Running], ManagerStatus::ShuttingDown)?;
        sink.append(&format!("Shutting down {}...", lc.cfg.name));

        let plan = UnitPlan {
            target: ServiceState::Stopped,
            latency: lc.cfg.stop_latency,
            workers: lc.cfg.worker_limit(),
        };
        let res = run_units(plan, &lc.services, sink, &lc.bus).await;

        lc.update_clock(|c| *c = Default::default());
        lc.transition(&[ManagerStatus::ShuttingDown], ManagerStatus::Stopped)?;

        if let Err(e) = res {
            warn!(error = %e, "shutdown finished with a failed unit");
            return Err(e);
        }
        sink.append("OS Shutdown complete.");
        lc.bus.publish(Event::new(EventKind::ShutdownCompleted));
        Ok(())
    }
}
