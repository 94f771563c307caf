//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for plugging custom event handlers into the
//! manager, e.g. a GUI that repaints service labels on every `ServiceStarted`.
//! Each subscriber is driven by a dedicated worker loop fed by a bounded
//! queue that is owned by the [`SubscriberSet`](crate::SubscriberSet).
//!
//! ## Contract
//! - Implementations may be slow – they do **not** block the publisher
//!   nor other subscribers.
//! - Each subscriber **declares** its preferred queue capacity via
//!   [`Subscribe::queue_capacity`]. If a queue overflows, events for that
//!   subscriber are **dropped**.
//!
//! ## Example
//! ```rust
//! use fastboot::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct ServiceLabels;
//!
//! #[async_trait]
//! impl Subscribe for ServiceLabels {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::ServiceStarted {
//!             // repaint label for ev.service ...
//!         }
//!     }
//!     fn name(&self) -> &'static str { "service-labels" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Contract for event subscribers.
///
/// Called from a subscriber-dedicated worker task. Implementations should avoid
/// blocking the async runtime.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event for this subscriber.
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred capacity of this subscriber's queue.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
