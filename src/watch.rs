//! Rebuild-on-change loop for `landgen build --watch`.
//!
//! Watches the landing's own directory and the shared section pool. Events
//! are debounced with a short drain window so editor save bursts (write +
//! rename + metadata touch) trigger one rebuild, not five. A failed rebuild
//! is reported and the loop keeps running; the next save gets a fresh
//! attempt with a fresh [`LandingBuilder`] so config errors are re-read from
//! disk.

use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::builder::{self, BuildError, LandingBuilder};
use crate::output;

const DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// File extensions that can affect build output.
const RELEVANT_EXTENSIONS: [&str; 4] = ["json", "html", "css", "js"];

/// Block forever, rebuilding the landing whenever a relevant file changes.
pub fn watch(root: &Path, name: &str) -> Result<(), BuildError> {
    let name = builder::sanitize_landing_name(root, name)?;
    let landing_dir = root.join("landings").join(&name);
    let sections_dir = root.join("sections");

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx)?;
    watcher.watch(&landing_dir, RecursiveMode::Recursive)?;
    watcher.watch(&sections_dir, RecursiveMode::Recursive)?;

    println!("Watching {} for changes (Ctrl-C to stop)", landing_dir.display());
    rebuild(root, &name);

    while let Ok(event) = rx.recv() {
        match event {
            Ok(event) if is_relevant(&event) => {
                // Drain the burst before rebuilding once.
                while rx.recv_timeout(DEBOUNCE_WINDOW).is_ok() {}
                rebuild(root, &name);
            }
            Ok(_) => {}
            Err(err) => output::warn(&format!("watch error: {err}")),
        }
    }
    Ok(())
}

fn rebuild(root: &Path, name: &str) {
    match LandingBuilder::new(root, name).and_then(|b| b.build()) {
        Ok(result) => output::print_build_summary(&result),
        Err(err) => output::warn(&format!("rebuild failed: {err}")),
    }
}

/// Keep only events that can change build output.
fn is_relevant(event: &Event) -> bool {
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }
    event.paths.iter().any(|path| {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| RELEVANT_EXTENSIONS.contains(&ext))
    })
}
