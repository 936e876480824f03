//! The watch loop

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::compiler::compile;
use crate::error::{VitaeError, VitaeResult};

use super::debounce::{Debounce, SETTLE_MS};
use super::event::{WatchEvent, WatchOptions};

/// Watch the templates directory and compile each settled save.
///
/// Runs until `running` is cleared (the Ctrl+C handler flips it). Compile
/// failures are reported through the callback and watching continues; only
/// startup problems (missing directory, watcher registration) are fatal.
pub fn watch(
    options: WatchOptions,
    running: Arc<AtomicBool>,
    event_callback: impl Fn(WatchEvent),
) -> VitaeResult<()> {
    let templates_dir = options.compile.templates_dir.clone();
    if !templates_dir.is_dir() {
        return Err(VitaeError::DirectoryNotFound {
            path: templates_dir,
        });
    }

    event_callback(WatchEvent::WatchStarted {
        templates_dir: templates_dir.display().to_string(),
        output_dir: options.compile.output_dir.display().to_string(),
        compiler: options.compile.program.clone(),
    });

    let (tx, rx) = channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                for path in event.paths {
                    let _ = tx.send(path);
                }
            }
        },
        Config::default(),
    )
    .map_err(|e| VitaeError::Io(std::io::Error::other(e.to_string())))?;

    watcher
        .watch(&templates_dir, RecursiveMode::NonRecursive)
        .map_err(|e| VitaeError::Io(std::io::Error::other(e.to_string())))?;

    let mut debounce = Debounce::default();

    while running.load(Ordering::SeqCst) {
        // Non-blocking with timeout so the shutdown flag is observed
        let path = match rx.recv_timeout(Duration::from_millis(50)) {
            Ok(path) => path,
            Err(_) => continue,
        };

        if !is_template(&path) {
            continue;
        }

        if !debounce.accept(&path) {
            continue;
        }

        // Let the editor finish writing before the engine reads the file
        std::thread::sleep(Duration::from_millis(SETTLE_MS));

        event_callback(WatchEvent::FileChanged {
            path: path.display().to_string(),
        });

        let name = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem.to_string(),
            None => continue,
        };

        event_callback(WatchEvent::CompileStarted {
            template: name.clone(),
        });

        match compile(&options.compile, &name) {
            Ok(outcome) => event_callback(WatchEvent::CompileFinished {
                template: outcome.name,
                output: outcome.pdf.display().to_string(),
            }),
            Err(e) => event_callback(WatchEvent::Error {
                message: e.to_string(),
            }),
        }
    }

    event_callback(WatchEvent::Shutdown);
    Ok(())
}

fn is_template(path: &Path) -> bool {
    path.extension().map(|e| e == "tex").unwrap_or(false)
}
