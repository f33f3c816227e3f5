use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::{Context as _, Result};
use eframe::egui;
use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};

const DEBOUNCE: Duration = Duration::from_millis(250);

/// Watches the deck file for `--live` and wakes the UI when it changes.
pub struct DeckWatcher {
    _debouncer: Debouncer<RecommendedWatcher>,
    rx: Receiver<()>,
}

impl DeckWatcher {
    /// The parent directory is watched so that editors which save by
    /// writing a temp file and renaming it are still seen.
    pub fn spawn(path: &Path, ctx: egui::Context) -> Result<Self> {
        let target = path
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", path.display()))?;
        let dir = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let (tx, rx) = mpsc::channel();
        let watched = target.clone();
        let mut debouncer = new_debouncer(DEBOUNCE, move |res: DebounceEventResult| match res {
            Ok(events) => {
                if touches(events.iter().map(|e| e.path.as_path()), &watched)
                    && tx.send(()).is_ok()
                {
                    ctx.request_repaint();
                }
            }
            Err(err) => tracing::warn!("File watcher error: {err}"),
        })
        .context("Failed to start file watcher")?;

        debouncer
            .watcher()
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;
        tracing::info!(file = %target.display(), "Watching for changes");

        Ok(Self {
            _debouncer: debouncer,
            rx,
        })
    }

    /// True if the file changed since the last call.
    pub fn changed(&self) -> bool {
        drain(&self.rx)
    }
}

fn drain(rx: &Receiver<()>) -> bool {
    let mut any = false;
    while rx.try_recv().is_ok() {
        any = true;
    }
    any
}

/// Whether any event path refers to `target` (already canonical).
fn touches<'a>(paths: impl IntoIterator<Item = &'a Path>, target: &Path) -> bool {
    paths
        .into_iter()
        .any(|p| p == target || p.canonicalize().is_ok_and(|c| c == target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_the_deck_file_counts() {
        let dir = tempfile::tempdir().unwrap();
        let deck = dir.path().join("talk.md");
        let other = dir.path().join("notes.md");
        std::fs::write(&deck, "# a").unwrap();
        std::fs::write(&other, "# b").unwrap();
        let target = deck.canonicalize().unwrap();

        assert!(touches([other.as_path(), deck.as_path()], &target));
        assert!(!touches([other.as_path()], &target));
        assert!(!touches(std::iter::empty(), &target));
    }

    #[test]
    fn test_relative_spelling_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let deck = dir.path().join("talk.md");
        std::fs::write(&deck, "# a").unwrap();
        let target = deck.canonicalize().unwrap();
        let dotted = dir.path().join(".").join("talk.md");
        assert!(touches([dotted.as_path()], &target));
    }

    #[test]
    fn test_drain_collapses_bursts() {
        let (tx, rx) = mpsc::channel();
        assert!(!drain(&rx));
        tx.send(()).unwrap();
        tx.send(()).unwrap();
        assert!(drain(&rx));
        assert!(!drain(&rx));
    }
}
