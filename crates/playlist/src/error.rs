use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlaylistError>;

#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlaylistError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
