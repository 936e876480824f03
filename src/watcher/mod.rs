//! File watcher for continuous compilation
//!
//! Implements the `watch` command with:
//! - Per-file debouncing (1s)
//! - A settle delay before reading a freshly saved file (100ms)
//! - Graceful Ctrl+C shutdown
//! - NDJSON output for scripting

mod debounce;
mod event;
mod run;

pub use debounce::{Debounce, DEBOUNCE_MS, SETTLE_MS};
pub use event::{WatchEvent, WatchOptions};
pub use run::watch;
