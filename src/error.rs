use std::path::PathBuf;

use thiserror::Error;

/// Failures at the edges of the crate: loading configuration and writing
/// output. Terrain synthesis itself cannot fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to serialize terrain: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("world size must be positive and finite, got {0}")]
    InvalidWorldSize(f64),

    #[error("unknown geographic setting `{0}`")]
    UnknownSetting(String),
}

pub type Result<T> = std::result::Result<T, Error>;
