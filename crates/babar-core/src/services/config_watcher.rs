use async_channel::Sender;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::{ConfigPaths, FavoritesConfig, WorkspaceNames};
use crate::messages::BarEvent;

const DEBOUNCE: Duration = Duration::from_millis(100);

/// Which configuration file a filesystem event touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFile {
    Settings,
    WorkspaceNames,
    Favorites,
}

impl ConfigFile {
    pub fn classify(paths: &ConfigPaths, path: &Path) -> Option<Self> {
        if path == paths.settings {
            Some(Self::Settings)
        } else if path == paths.workspace_names {
            Some(Self::WorkspaceNames)
        } else if path == paths.favorites {
            Some(Self::Favorites)
        } else {
            None
        }
    }

    /// Reload the file and turn it into the event the bar reacts to
    pub fn reload(self, paths: &ConfigPaths) -> BarEvent {
        match self {
            // settings are re-read by the extension on restart only
            Self::Settings => BarEvent::SettingsChanged,
            Self::WorkspaceNames => {
                let names = WorkspaceNames::load(&paths.workspace_names);
                debug!("Workspace names reloaded: {} entries", names.as_slice().len());
                BarEvent::WorkspaceNamesChanged(names)
            }
            Self::Favorites => {
                let favorites = FavoritesConfig::load(&paths.favorites);
                debug!("Favorites reloaded: {} apps", favorites.apps.len());
                BarEvent::FavoritesChanged(favorites)
            }
        }
    }
}

/// Service that watches the BaBar config directory using inotify
pub struct ConfigWatcher {
    paths: ConfigPaths,
    event_tx: Sender<BarEvent>,
}

impl ConfigWatcher {
    pub fn new(paths: ConfigPaths, event_tx: Sender<BarEvent>) -> Self {
        Self { paths, event_tx }
    }

    /// Run the config watcher (blocks forever)
    pub async fn run(self) -> anyhow::Result<()> {
        info!("Starting config watcher");

        let dir = self.paths.config_dir();
        let _ = tokio::fs::create_dir_all(&dir).await;

        let (notify_tx, mut notify_rx) = mpsc::channel::<PathBuf>(32);
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    if matches!(
                        event.kind,
                        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                    ) {
                        for path in event.paths {
                            let _ = notify_tx.blocking_send(path);
                        }
                    }
                }
            },
            notify::Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        // files may not exist yet, so watch the directory
        if dir.exists() {
            watcher.watch(&dir, RecursiveMode::NonRecursive)?;
            debug!("Watching directory: {:?}", dir);
        }

        let mut debounce_deadline: Option<tokio::time::Instant> = None;
        let mut pending: Vec<ConfigFile> = Vec::with_capacity(3);

        loop {
            tokio::select! {
                Some(path) = notify_rx.recv() => {
                    if let Some(file) = ConfigFile::classify(&self.paths, &path) {
                        if !pending.contains(&file) {
                            pending.push(file);
                        }
                        debounce_deadline = Some(tokio::time::Instant::now() + DEBOUNCE);
                    }
                }

                _ = async {
                    match debounce_deadline {
                        Some(deadline) => tokio::time::sleep_until(deadline).await,
                        None => std::future::pending::<()>().await,
                    }
                } => {
                    debounce_deadline = None;
                    for file in pending.drain(..) {
                        info!("Config file changed: {:?}", file);
                        let _ = self.event_tx.send(file.reload(&self.paths)).await;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::in_dir(dir.path());

        assert_eq!(ConfigFile::classify(&paths, &paths.settings), Some(ConfigFile::Settings));
        assert_eq!(
            ConfigFile::classify(&paths, &paths.workspace_names),
            Some(ConfigFile::WorkspaceNames)
        );
        assert_eq!(ConfigFile::classify(&paths, &paths.favorites), Some(ConfigFile::Favorites));
        assert_eq!(ConfigFile::classify(&paths, &dir.path().join("other.json")), None);
    }

    #[test]
    fn test_reload_reads_names_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::in_dir(dir.path());
        std::fs::write(&paths.workspace_names, r#"["Web", "Code"]"#).unwrap();

        match ConfigFile::WorkspaceNames.reload(&paths) {
            BarEvent::WorkspaceNamesChanged(names) => {
                assert_eq!(names.label_for(1), "Code");
                assert_eq!(names.label_for(2), "3");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_reload_missing_favorites_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::in_dir(dir.path());

        match ConfigFile::Favorites.reload(&paths) {
            BarEvent::FavoritesChanged(favorites) => assert!(favorites.apps.is_empty()),
            other => panic!("unexpected event {:?}", other),
        }
        assert!(matches!(ConfigFile::Settings.reload(&paths), BarEvent::SettingsChanged));
    }
}
