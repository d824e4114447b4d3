use playlist::PlaylistError;
use stream_prober::ProbeError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Playlist error: {0}")]
    Playlist(#[from] PlaylistError),

    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Validation failed with {errors} error(s)")]
    ValidationFailed { errors: usize },
}

impl AppError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}
