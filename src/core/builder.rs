use std::sync::Arc;

use crate::{
    config::Config,
    events::Bus,
    sinks::{LogSink, NullSink},
    subscribers::{Subscribe, SubscriberSet},
};

use super::manager::Manager;

/// Builder for constructing a [`Manager`] with optional collaborators.
pub struct ManagerBuilder {
    cfg: Config,
    sink: Arc<dyn LogSink>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl ManagerBuilder {
    /// Creates a new builder with the given configuration.
    ///
    /// Without [`with_sink`](Self::with_sink) progress lines are discarded.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            sink: Arc::new(NullSink),
            subscribers: Vec::new(),
        }
    }

    /// Sets the sink that receives progress lines (`Booting ...`, `<service> started.`).
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Sets event subscribers.
    ///
    /// Subscribers receive the status stream through dedicated workers with
    /// bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the manager.
    ///
    /// Must be called from within a tokio runtime when subscribers are set
    /// (their workers are spawned here).
    pub fn build(self) -> Arc<Manager> {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(self.subscribers, bus.clone()));

        let mgr = Arc::new(Manager::new_internal(self.cfg, bus, self.sink, subs));
        mgr.subscriber_listener();
        mgr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::status::ManagerStatus;
    use crate::events::{Event, EventKind};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct Kinds(Mutex<Vec<EventKind>>);

    #[async_trait]
    impl Subscribe for Kinds {
        async fn on_event(&self, event: &Event) {
            self.0.lock().unwrap().push(event.kind);
        }
        fn name(&self) -> &'static str {
            "kinds"
        }
    }

    #[tokio::test]
    async fn defaults_to_idle_without_output() {
        let mgr = ManagerBuilder::new(Config::default()).build();
        assert_eq!(mgr.status(), ManagerStatus::Idle);
        assert_eq!(mgr.services().len(), 6);
        assert_eq!(mgr.boot_time_label(), "Boot Time: N/A");
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_the_status_stream() {
        let kinds = Arc::new(Kinds::default());
        let mgr = Manager::builder(Config::default())
            .with_subscribers(vec![kinds.clone()])
            .build();

        mgr.boot().await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        let seen = kinds.0.lock().unwrap().clone();
        assert!(seen.contains(&EventKind::BootCompleted));
        assert_eq!(
            seen.iter().filter(|k| **k == EventKind::ServiceStarted).count(),
            6
        );
    }
}
