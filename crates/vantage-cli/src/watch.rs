//! Watching view source files for the live-preview loop.
//!
//! The watcher is pointed at the parent directories of the reported source
//! files (editors typically replace files on save, which unwatches a file
//! handle but not its directory) and filters events down to the files
//! themselves. The watched set can be swapped after every regeneration, since
//! a view program may start or stop including files.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use log::{debug, trace, warn};
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::error::CliError;

const DEBOUNCE: Duration = Duration::from_millis(200);

/// Watches a set of files and blocks until one of them changes.
pub(crate) struct SourceWatcher {
    watcher: notify::RecommendedWatcher,
    receiver: mpsc::Receiver<notify::Result<Event>>,
    directories: Vec<PathBuf>,
    files: HashSet<PathBuf>,
}

impl SourceWatcher {
    pub(crate) fn new() -> Result<Self, CliError> {
        let (tx, rx) = mpsc::channel();
        let watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.send(res);
        })
        .map_err(CliError::Watch)?;

        Ok(SourceWatcher {
            watcher,
            receiver: rx,
            directories: Vec::new(),
            files: HashSet::new(),
        })
    }

    /// Replaces the watched set with the given source files.
    ///
    /// Files that do not exist are skipped with a warning; the view program
    /// may report paths relative to a different working directory.
    pub(crate) fn watch_sources(&mut self, sources: &[PathBuf]) -> Result<(), CliError> {
        for dir in self.directories.drain(..) {
            // Unwatching a directory that disappeared is not a failure.
            if let Err(err) = self.watcher.unwatch(&dir) {
                trace!(dir = dir.display().to_string(), err:% = err; "Unwatch failed");
            }
        }
        self.files.clear();

        let mut directories = HashSet::new();
        for source in sources {
            let Ok(canonical) = fs::canonicalize(source) else {
                warn!(source = source.display().to_string(); "Source file not found, not watching");
                continue;
            };
            if let Some(parent) = canonical.parent() {
                directories.insert(parent.to_path_buf());
            }
            self.files.insert(canonical);
        }

        for dir in directories {
            self.watcher
                .watch(&dir, RecursiveMode::NonRecursive)
                .map_err(CliError::Watch)?;
            self.directories.push(dir);
        }

        debug!(files = self.files.len(), directories = self.directories.len(); "Watching sources");
        Ok(())
    }

    /// Blocks until a watched file changes, then drains follow-up events for
    /// a short debounce window.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Watch`] only if the watcher channel closed, which
    /// means the backend shut down.
    pub(crate) fn wait_for_change(&self) -> Result<(), CliError> {
        loop {
            let event = self
                .receiver
                .recv()
                .map_err(|_| CliError::Watch(notify::Error::generic("watcher channel closed")))?;
            if self.is_relevant(&event) {
                break;
            }
        }

        // Editors fire bursts of events per save; coalesce them.
        while let Ok(event) = self.receiver.recv_timeout(DEBOUNCE) {
            let _ = self.is_relevant(&event);
        }
        Ok(())
    }

    fn is_relevant(&self, event: &notify::Result<Event>) -> bool {
        let Ok(event) = event else {
            return false;
        };
        if !matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
        ) {
            return false;
        }
        event.paths.iter().any(|path| self.is_watched(path))
    }

    fn is_watched(&self, path: &Path) -> bool {
        if self.files.contains(path) {
            return true;
        }
        // Paths in events are usually canonical already; fall back for the
        // backends that report them as given.
        fs::canonicalize(path)
            .map(|canonical| self.files.contains(&canonical))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;
    use std::time::Instant;

    #[test]
    fn detects_modification_of_a_watched_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("view.rs");
        fs::write(&file, "// v1").unwrap();

        let mut watcher = SourceWatcher::new().unwrap();
        watcher.watch_sources(&[file.clone()]).unwrap();

        // Give the backend a moment to register the watch.
        std::thread::sleep(Duration::from_millis(200));
        fs::write(&file, "// v2").unwrap();

        watcher.wait_for_change().unwrap();
    }

    #[test]
    fn ignores_changes_to_unwatched_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let watched = dir.path().join("view.rs");
        let sibling = dir.path().join("other.rs");
        fs::write(&watched, "// watched").unwrap();
        fs::write(&sibling, "// other").unwrap();

        let mut watcher = SourceWatcher::new().unwrap();
        watcher.watch_sources(&[watched.clone()]).unwrap();

        std::thread::sleep(Duration::from_millis(200));
        fs::write(&sibling, "// changed").unwrap();

        // The sibling change must not satisfy the wait; the watched change
        // that follows must.
        let start = Instant::now();
        fs::write(&watched, "// changed too").unwrap();
        watcher.wait_for_change().unwrap();
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn missing_sources_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut watcher = SourceWatcher::new().unwrap();
        watcher
            .watch_sources(&[dir.path().join("does-not-exist.rs")])
            .unwrap();
    }
}
