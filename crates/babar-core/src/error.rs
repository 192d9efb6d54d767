use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by BaBar's config and service layers.
///
/// Operations of the bar itself never fail: the host is trusted and every
/// missing optional feature has a fallback.
#[derive(Debug, Error)]
pub enum BarError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("path has no parent directory: {0:?}")]
    InvalidPath(PathBuf),

    #[error("channel closed: {0}")]
    ChannelClosed(&'static str),
}

pub type Result<T> = std::result::Result<T, BarError>;
