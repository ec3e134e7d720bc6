use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems with the settings file or with the geometry it describes.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("viewport {width}x{height} is too small to fit a single enemy")]
    ViewportTooSmall { width: u32, height: u32 },
}

/// The craft sprite could not be loaded.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read bitmap {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("bitmap {path} has no visible pixels")]
    Empty { path: PathBuf },
}

/// Everything that can stop the game before or outside a session.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}
