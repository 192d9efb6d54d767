use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Favorites configuration (favorites.json) - desktop file ids in menu order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesConfig {
    #[serde(default)]
    pub apps: Vec<CompactString>,
}

impl FavoritesConfig {
    pub fn load(path: &Path) -> Self {
        std::fs::read(path)
            .ok()
            .and_then(|data| serde_json::from_slice(&data).ok())
            .unwrap_or_default()
    }

    pub fn try_load(path: &Path) -> Result<Self> {
        super::read_json(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        super::write_json(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        let config = FavoritesConfig {
            apps: vec!["firefox.desktop".into(), "org.gnome.Nautilus.desktop".into()],
        };
        config.save(&path).unwrap();
        assert_eq!(FavoritesConfig::load(&path), config);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FavoritesConfig::load(&dir.path().join("none.json")).apps.is_empty());
    }
}
