//! Per-file event debouncing
//!
//! Editors fire several modification events per save. The debounce map keeps
//! the last accepted timestamp per path and suppresses events that arrive
//! within the window. A suppressed event does not extend the window, so a
//! burst of saves still compiles once per settled window.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Debounce window in milliseconds
pub const DEBOUNCE_MS: u64 = 1000;

/// Delay after an accepted event before the file is read, so a partially
/// written save is not compiled
pub const SETTLE_MS: u64 = 100;

/// Last-accepted-timestamp map, owned by the watch loop
#[derive(Debug)]
pub struct Debounce {
    window: Duration,
    last_accepted: HashMap<PathBuf, Instant>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: HashMap::new(),
        }
    }

    /// Decide whether an event on `path` happening now should compile
    pub fn accept(&mut self, path: &Path) -> bool {
        self.accept_at(path, Instant::now())
    }

    /// Timestamp-explicit variant used by the loop and by tests
    pub fn accept_at(&mut self, path: &Path, at: Instant) -> bool {
        if let Some(prev) = self.last_accepted.get(path) {
            if at.duration_since(*prev) < self.window {
                return false;
            }
        }
        self.last_accepted.insert(path.to_path_buf(), at);
        true
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_MS))
    }
}
