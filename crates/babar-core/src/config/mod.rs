mod settings;
mod names;
mod favorites;
mod paths;

pub use settings::BarSettings;
pub use names::WorkspaceNames;
pub use favorites::FavoritesConfig;
pub use paths::ConfigPaths;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::error::{BarError, Result};

/// Read and parse a JSON config file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = std::fs::read(path).map_err(|source| BarError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&data).map_err(|source| BarError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a config file as pretty JSON, creating its directory
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| BarError::InvalidPath(path.to_path_buf()))?;
    std::fs::create_dir_all(dir).map_err(|source| BarError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let data = serde_json::to_string_pretty(value).map_err(|source| BarError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, data).map_err(|source| BarError::Io {
        path: path.to_path_buf(),
        source,
    })
}
