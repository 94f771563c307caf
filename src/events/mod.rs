//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to events emitted by the manager, the boot/shutdown units,
//! the task registry and the subscriber workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Manager`, start/stop units, `TaskRegistry`, background tasks,
//!   `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: `Manager::subscriber_listener()` (fans out to `SubscriberSet`)
//!   and any receiver handed out by `Manager::subscribe()`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
