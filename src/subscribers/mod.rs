//! # Event subscribers for the fastboot manager.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out and
//! the built-in [`LogWriter`].
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   start/stop unit ── publish(Event) ──► Bus ──► subscriber_listener ──► SubscriberSet
//!                                                                           │
//!                                                              ┌────────────┼─────────┐
//!                                                              ▼            ▼         ▼
//!                                                          LogWriter    GUI labels  Custom
//! ```
//!
//! Subscribers observe the *status stream*. The human-readable progress lines
//! ("Filesystem started.") go to the [`LogSink`](crate::LogSink) instead, synchronously
//! and in order, so that they are complete by the time `boot()` returns.

#[cfg(feature = "logging")]
mod log;
mod subscribe;
mod subscriber_set;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use subscribe::Subscribe;
pub use subscriber_set::SubscriberSet;
