//! Watch event types and options

use crate::compiler::CompileOptions;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Compile settings reused for every triggered run
    pub compile: CompileOptions,
    /// Output as NDJSON
    pub json: bool,
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    WatchStarted {
        templates_dir: String,
        output_dir: String,
        compiler: String,
    },
    FileChanged {
        path: String,
    },
    CompileStarted {
        template: String,
    },
    CompileFinished {
        template: String,
        output: String,
    },
    Error {
        message: String,
    },
    Shutdown,
}

impl WatchEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
