//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::RedirectConfig;

/// Watches the rules file and forwards every valid revision.
///
/// A revision that fails to load or validate is logged and dropped, so the
/// server keeps running with its current rules.
pub struct ConfigWatcher {
    path: PathBuf,
    updates: mpsc::UnboundedSender<RedirectConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end of the update channel.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RedirectConfig>) {
        let (updates, rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            updates,
        };
        (watcher, rx)
    }

    /// Start watching. The returned handle must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self { path, updates } = self;
        let watched = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    reload(&path, &updates);
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&watched, RecursiveMode::NonRecursive)?;
        tracing::info!(path = ?watched, "Config watcher started");
        Ok(watcher)
    }
}

/// Load `path` and send it on success. Returns whether a config was sent.
fn reload(path: &Path, updates: &mpsc::UnboundedSender<RedirectConfig>) -> bool {
    tracing::info!(path = ?path, "Config file changed, reloading rules");
    match load_config(path) {
        Ok(config) => updates.send(config).is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Config reload rejected, keeping current rules");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reload_sends_valid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[rules]]\ntype = \"subdomain\"\nsubdomain = \"www\"").unwrap();

        let (watcher, mut rx) = ConfigWatcher::new(file.path());
        assert!(reload(&watcher.path, &watcher.updates));
        assert_eq!(rx.try_recv().unwrap().rules.len(), 1);
    }

    #[test]
    fn test_reload_drops_invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[rules]]\ntype = \"subdomain\"\nsubdomain = \"\"").unwrap();

        let (watcher, mut rx) = ConfigWatcher::new(file.path());
        assert!(!reload(&watcher.path, &watcher.updates));
        assert!(rx.try_recv().is_err());
    }
}
