//! # Service registry with pre-sized slots.
//!
//! The service set is fixed at construction, so the registry is a plain `Vec` of
//! slots and never resizes. Each slot's state is an atomic flag: start/stop units
//! are partitioned by service name, so no two units ever write the same slot and
//! no map-level lock is needed.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::RuntimeError;

/// Lifecycle state of a single service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceState {
    /// Not running (initial state).
    Stopped,
    /// Started by the last boot.
    Running,
}

impl ServiceState {
    /// Capitalized label, e.g. `Running`.
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceState::Stopped => "Stopped",
            ServiceState::Running => "Running",
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One service: its name and its running flag.
#[derive(Debug)]
struct ServiceSlot {
    name: Arc<str>,
    running: AtomicBool,
}

/// Fixed set of named services and their states, in configuration order.
#[derive(Debug)]
pub struct ServiceRegistry {
    slots: Vec<ServiceSlot>,
}

impl ServiceRegistry {
    /// Creates one `Stopped` service per name. Duplicate names are collapsed.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut slots: Vec<ServiceSlot> = Vec::new();
        for name in names {
            let name = name.as_ref();
            if slots.iter().any(|s| &*s.name == name) {
                continue;
            }
            slots.push(ServiceSlot {
                name: Arc::from(name),
                running: AtomicBool::new(false),
            });
        }
        Self { slots }
    }

    /// Number of services.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no service is configured.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Service names in configuration order.
    pub fn names(&self) -> Vec<Arc<str>> {
        self.slots.iter().map(|s| s.name.clone()).collect()
    }

    /// Sets the state of `name`.
    pub fn set_state(&self, name: &str, state: ServiceState) -> Result<(), RuntimeError> {
        let slot = self
            .slots
            .iter()
            .find(|s| &*s.name == name)
            .ok_or_else(|| RuntimeError::UnknownService(name.to_string()))?;
        slot.running
            .store(state == ServiceState::Running, Ordering::Release);
        Ok(())
    }

    /// Moves every service to `state`.
    pub fn reset_all(&self, state: ServiceState) {
        for slot in &self.slots {
            slot.running
                .store(state == ServiceState::Running, Ordering::Release);
        }
    }

    /// Returns the state of `name`, if known.
    pub fn state(&self, name: &str) -> Option<ServiceState> {
        self.slots
            .iter()
            .find(|s| &*s.name == name)
            .map(Self::load)
    }

    /// Point-in-time copy of every service state, in configuration order.
    pub fn snapshot(&self) -> Vec<(String, ServiceState)> {
        self.slots
            .iter()
            .map(|s| (s.name.to_string(), Self::load(s)))
            .collect()
    }

    /// Names of the services currently running, in configuration order.
    pub fn running(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter(|s| Self::load(s) == ServiceState::Running)
            .map(|s| s.name.to_string())
            .collect()
    }

    fn load(slot: &ServiceSlot) -> ServiceState {
        if slot.running.load(Ordering::Acquire) {
            ServiceState::Running
        } else {
            ServiceState::Stopped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_stopped_in_order() {
        let reg = ServiceRegistry::new(["Filesystem", "Networking", "Security"]);
        assert_eq!(
            reg.snapshot(),
            vec![
                ("Filesystem".to_string(), ServiceState::Stopped),
                ("Networking".to_string(), ServiceState::Stopped),
                ("Security".to_string(), ServiceState::Stopped),
            ]
        );
        assert!(reg.running().is_empty());
    }

    #[test]
    fn set_state_and_running() {
        let reg = ServiceRegistry::new(["Filesystem", "Networking"]);
        reg.set_state("Networking", ServiceState::Running).unwrap();
        assert_eq!(reg.state("Networking"), Some(ServiceState::Running));
        assert_eq!(reg.running(), vec!["Networking".to_string()]);
    }

    #[test]
    fn reset_all_stops_every_slot() {
        let reg = ServiceRegistry::new(["A", "B", "C"]);
        reg.set_state("A", ServiceState::Running).unwrap();
        reg.set_state("C", ServiceState::Running).unwrap();

        reg.reset_all(ServiceState::Stopped);
        assert!(reg.running().is_empty());
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn unknown_service_is_reported() {
        let reg = ServiceRegistry::new(["Filesystem"]);
        let err = reg.set_state("Printer", ServiceState::Running).unwrap_err();
        assert_eq!(err, RuntimeError::UnknownService("Printer".into()));
        assert_eq!(reg.state("Printer"), None);
    }

    #[test]
    fn duplicates_collapse() {
        let reg = ServiceRegistry::new(["A", "B", "A"]);
        assert_eq!(reg.len(), 2);
    }
}
