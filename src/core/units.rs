//! # Per-service start/stop units with a join barrier.
//!
//! ```text
//! run_units(plan)
//!   ├─► Semaphore(worker_limit)           (bounded pool, lives for this call only)
//!   ├─► JoinSet::spawn(unit) × N          (one unit per service)
//!   │       unit: acquire permit → sleep(latency) → set_state → sink line → publish
//!   └─► join_next() until empty           (barrier: returns only after all N finished)
//! ```
//!
//! A panicking unit is caught (`catch_unwind`) and reported as
//! [`RuntimeError::UnitPanicked`] once the barrier completes; the remaining units
//! still run to completion.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::{sync::Semaphore, task::JoinSet, time};
use tracing::{debug, warn};

use crate::core::services::{ServiceRegistry, ServiceState};
use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind};
use crate::sinks::LogSink;

/// What a batch of units does to every service.
#[derive(Debug, Clone, Copy)]
pub(crate) struct UnitPlan {
    /// State each unit writes.
    pub target: ServiceState,
    /// Simulated latency of each unit (uniform).
    pub latency: Duration,
    /// Pool size.
    pub workers: usize,
}

impl UnitPlan {
    fn verb(&self) -> &'static str {
        match self.target {
            ServiceState::Running => "started",
            ServiceState::Stopped => "stopped",
        }
    }

    fn event_kind(&self) -> EventKind {
        match self.target {
            ServiceState::Running => EventKind::ServiceStarted,
            ServiceState::Stopped => EventKind::ServiceStopped,
        }
    }
}

/// Runs one unit per service and waits for all of them.
pub(crate) async fn run_units(
    plan: UnitPlan,
    services: &Arc<ServiceRegistry>,
    sink: &Arc<dyn LogSink>,
    bus: &Bus,
) -> Result<(), RuntimeError> {
    let semaphore = Arc::new(Semaphore::new(plan.workers.max(1)));
    let mut set = JoinSet::new();

    for name in services.names() {
        let semaphore = semaphore.clone();
        let services = services.clone();
        let sink = sink.clone();
        let bus = bus.clone();

        set.spawn(async move {
            let unit = async {
                let _permit = semaphore.acquire_owned().await.ok();
                time::sleep(plan.latency).await;
                services.set_state(&name, plan.target)?;
                sink.append(&format!("{name} {}.", plan.verb()));
                bus.publish(Event::new(plan.event_kind()).with_service(name.clone()));
                debug!(service = %name, state = %plan.target, "unit finished");
                Ok::<(), RuntimeError>(())
            };
            match std::panic::AssertUnwindSafe(unit).catch_unwind().await {
                Ok(res) => res,
                Err(_) => Err(RuntimeError::UnitPanicked {
                    service: name.to_string(),
                }),
            }
        });
    }

    let mut first_err = None;
    while let Some(joined) = set.join_next().await {
        let res = joined.unwrap_or_else(|_| {
            Err(RuntimeError::UnitPanicked {
                service: "<unknown>".to_string(),
            })
        });
        if let Err(e) = res {
            warn!(error = %e, label = e.as_label(), "unit failed");
            first_err.get_or_insert(e);
        }
    }

    match first_err {
        None => Ok(()),
        Some(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;
    use tokio::time::Instant;

    struct PanickingSink;

    impl LogSink for PanickingSink {
        fn append(&self, line: &str) {
            if line.starts_with("B ") {
                panic!("sink exploded");
            }
        }
    }

    fn plan(workers: usize) -> UnitPlan {
        UnitPlan {
            target: ServiceState::Running,
            latency: Duration::from_secs(1),
            workers,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn units_run_in_parallel() {
        let services = Arc::new(ServiceRegistry::new(["A", "B", "C", "D"]));
        let mem = Arc::new(MemorySink::new());
        let sink: Arc<dyn LogSink> = mem.clone();

        let started = Instant::now();
        run_units(plan(4), &services, &sink, &Bus::new(16)).await.unwrap();

        assert_eq!(started.elapsed(), Duration::from_secs(1));
        assert_eq!(services.running().len(), 4);
        assert_eq!(mem.lines().len(), 4);
        assert!(mem.contains("C started."));
    }

    #[tokio::test(start_paused = true)]
    async fn pool_size_bounds_parallelism() {
        let services = Arc::new(ServiceRegistry::new(["A", "B", "C", "D"]));
        let sink: Arc<dyn LogSink> = Arc::new(MemorySink::new());

        let started = Instant::now();
        run_units(plan(2), &services, &sink, &Bus::new(16)).await.unwrap();

        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn panic_is_reported_after_barrier() {
        let services = Arc::new(ServiceRegistry::new(["A", "B", "C"]));
        let sink: Arc<dyn LogSink> = Arc::new(PanickingSink);

        let err = run_units(plan(3), &services, &sink, &Bus::new(16))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            RuntimeError::UnitPanicked {
                service: "B".to_string()
            }
        );
        assert_eq!(services.state("A"), Some(ServiceState::Running));
        assert_eq!(services.state("C"), Some(ServiceState::Running));
    }
}
