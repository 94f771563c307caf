//! # Log sinks: ordered receivers of human-readable progress lines.
//!
//! A [`LogSink`] is what the presentation shell hands to the manager to receive
//! lines such as `Booting PyFastOS...` or `Networking started.`
//!
//! ## Contract
//! - `append` may be called concurrently from several start/stop units.
//! - Every call carries one complete line; implementations must append it as a
//!   single unit (no partial or interleaved lines).
//! - Calls are synchronous: a line is in the sink when `append` returns.
//!
//! Closures implement the trait directly:
//! ```rust
//! use std::sync::Arc;
//! use fastboot::LogSink;
//!
//! let sink: Arc<dyn LogSink> = Arc::new(|line: &str| println!("{line}"));
//! sink.append("hello");
//! ```

mod memory;

pub use memory::MemorySink;

/// Ordered, append-only consumer of log lines.
pub trait LogSink: Send + Sync + 'static {
    /// Appends one complete line.
    fn append(&self, line: &str);
}

impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync + 'static,
{
    fn append(&self, line: &str) {
        self(line)
    }
}

/// Sink that discards every line.
///
/// Used by `exit`/`quit`, whose shutdown output is not shown.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn append(&self, _line: &str) {}
}
