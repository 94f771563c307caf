//! # Command history.
//!
//! Append-only, ordered record of every raw command line. With a capacity set,
//! the oldest lines are evicted first; order is always preserved.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
pub(crate) struct CommandHistory {
    entries: Mutex<VecDeque<String>>,
    limit: Option<usize>,
}

impl CommandHistory {
    pub(crate) fn new(limit: Option<usize>) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            limit,
        }
    }

    pub(crate) fn push(&self, line: &str) {
        let mut entries = self.guard();
        entries.push_back(line.to_string());
        if let Some(limit) = self.limit {
            while entries.len() > limit {
                entries.pop_front();
            }
        }
    }

    /// The newest `n` entries, oldest first.
    pub(crate) fn last(&self, n: usize) -> Vec<String> {
        let entries = self.guard();
        let skip = entries.len().saturating_sub(n);
        entries.iter().skip(skip).cloned().collect()
    }

    fn guard(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
