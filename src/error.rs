use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by stores and config loading.
///
/// None of these are fatal to the board itself: store errors degrade to
/// "empty", config errors degrade to defaults unless the caller asked for a
/// specific file.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, BoardError>;
