//! # Global manager configuration.
//!
//! Provides [`Config`], the centralized settings for the boot manager.
//!
//! ## Sentinel values
//! - `max_workers = 0` → pool sized to the number of services
//! - `history_capacity = 0` → unbounded command history
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use fastboot::Config;
//!
//! let mut cfg = Config::default();
//! cfg.start_latency = Duration::from_millis(200);
//! cfg.require_running = true;
//!
//! assert_eq!(cfg.worker_limit(), 6);
//! assert_eq!(cfg.history_limit(), None);
//! ```

use std::time::Duration;

/// Default service set, in boot display order.
const DEFAULT_SERVICES: [&str; 6] = [
    "Filesystem",
    "Networking",
    "User Interface",
    "Applications",
    "Security",
    "Background Tasks",
];

/// How the command processor treats argument casing.
///
/// The keyword is always matched case-insensitively; this only decides what
/// happens to the text after it (e.g. `echo Hello` → `Hello` or `hello`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArgumentCase {
    /// Arguments are passed on exactly as typed.
    #[default]
    Preserve,
    /// The whole line is lowercased before the keyword is split off.
    Lowercase,
}

/// Global configuration for the boot manager.
///
/// ## Field semantics
/// - `name`, `version`: shown in log lines and `help`
/// - `services`: fixed service set (order is kept for display)
/// - `start_latency` / `stop_latency`: simulated per-service latency (uniform)
/// - `max_workers`: pool size for start/stop units (`0` = one per service)
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus)
/// - `history_capacity`: max retained commands (`0` = unbounded)
/// - `history_window`: how many entries the `log` command shows
/// - `require_running`: reject system commands unless the OS is running
/// - `argument_case`: see [`ArgumentCase`]
#[derive(Clone, Debug)]
pub struct Config {
    /// System name, e.g. `PyFastOS`.
    pub name: String,

    /// System version string.
    pub version: String,

    /// Names of the managed services.
    ///
    /// Fixed for the lifetime of a manager; duplicates are collapsed on construction.
    pub services: Vec<String>,

    /// Simulated time it takes a single service to start.
    pub start_latency: Duration,

    /// Simulated time it takes a single service to stop.
    pub stop_latency: Duration,

    /// Maximum number of start/stop units running at once.
    ///
    /// - `0` = as many as there are services (fully parallel)
    /// - `n > 0` = at most `n` units in flight
    pub max_workers: usize,

    /// Capacity of the event bus broadcast channel ring buffer.
    pub bus_capacity: usize,

    /// Maximum number of commands kept in the history.
    ///
    /// - `0` = unbounded
    /// - `n > 0` = oldest entries are evicted first
    pub history_capacity: usize,

    /// Number of entries returned by the `log` command.
    pub history_window: usize,

    /// When set, system commands are answered with "OS is not running."
    /// unless the manager status is `Running`.
    pub require_running: bool,

    /// Argument casing behavior of the command processor.
    pub argument_case: ArgumentCase,
}

impl Config {
    /// Returns the worker pool size for start/stop units (never 0).
    #[inline]
    pub fn worker_limit(&self) -> usize {
        if self.max_workers == 0 {
            self.services.len().max(1)
        } else {
            self.max_workers
        }
    }

    /// Returns the history cap as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(n)` → at most `n` entries retained
    #[inline]
    pub fn history_limit(&self) -> Option<usize> {
        if self.history_capacity == 0 {
            None
        } else {
            Some(self.history_capacity)
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `name = "PyFastOS"`, `version = "2.1"`
    /// - six services: Filesystem, Networking, User Interface, Applications, Security, Background Tasks
    /// - `start_latency = 1s`, `stop_latency = 500ms`
    /// - `max_workers = 0` (one worker per service)
    /// - `bus_capacity = 1024`
    /// - `history_capacity = 0` (unbounded), `history_window = 10`
    /// - `require_running = false`, `argument_case = Preserve`
    fn default() -> Self {
        Self {
            name: "PyFastOS".to_string(),
            version: "2.1".to_string(),
            services: DEFAULT_SERVICES.iter().map(|s| s.to_string()).collect(),
            start_latency: Duration::from_secs(1),
            stop_latency: Duration::from_millis(500),
            max_workers: 0,
            bus_capacity: 1024,
            history_capacity: 0,
            history_window: 10,
            require_running: false,
            argument_case: ArgumentCase::Preserve,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_workers_means_one_per_service() {
        let mut cfg = Config::default();
        assert_eq!(cfg.worker_limit(), 6);

        cfg.max_workers = 2;
        assert_eq!(cfg.worker_limit(), 2);

        cfg.max_workers = 0;
        cfg.services.clear();
        assert_eq!(cfg.worker_limit(), 1);
    }

    #[test]
    fn history_sentinel() {
        let mut cfg = Config::default();
        assert_eq!(cfg.history_limit(), None);
        cfg.history_capacity = 50;
        assert_eq!(cfg.history_limit(), Some(50));
    }

    #[test]
    fn bus_capacity_never_zero() {
        let cfg = Config {
            bus_capacity: 0,
            ..Config::default()
        };
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
