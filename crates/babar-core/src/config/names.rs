use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Ordered workspace name overrides (workspace-names.json), keyed by index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceNames(Vec<CompactString>);

impl WorkspaceNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<CompactString>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    pub fn load(path: &Path) -> Self {
        match std::fs::read(path) {
            Ok(data) => serde_json::from_slice(&data).unwrap_or_else(|e| {
                debug!("Ignoring malformed workspace names {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Load names, reporting any read or parse error.
    pub fn try_load(path: &Path) -> crate::error::Result<Self> {
        super::read_json(path)
    }

    /// Label shown on the indicator of workspace `index`: the override when
    /// present and non-empty, else the 1-based number.
    pub fn label_for(&self, index: usize) -> CompactString {
        match self.0.get(index) {
            Some(name) if !name.is_empty() => name.clone(),
            _ => compact_str::format_compact!("{}", index + 1),
        }
    }

    pub fn as_slice(&self) -> &[CompactString] {
        &self.0
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|s| s.to_string()).collect()
    }
}
