use std::path::{Path, PathBuf};

/// Configuration paths for BaBar
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub settings: PathBuf,
    pub workspace_names: PathBuf,
    pub favorites: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Self {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        Self::in_dir(&config_dir.join("babar"))
    }

    /// Paths rooted at an explicit config directory
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            settings: dir.join("settings.json"),
            workspace_names: dir.join("workspace-names.json"),
            favorites: dir.join("favorites.json"),
        }
    }

    /// Get the babar config directory
    pub fn config_dir(&self) -> PathBuf {
        self.settings
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::new()
    }
}
