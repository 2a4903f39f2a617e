use std::path::PathBuf;

use ecosim_config::ConfigError;
use ecosim_terrain::TerrainError;

/// Everything that stops a world generator run.
#[derive(Debug, thiserror::Error)]
pub enum WorldgenError {
    #[error("could not determine a config directory, pass --config")]
    NoConfigDir,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("world generation failed: {0}")]
    Terrain(#[from] TerrainError),

    #[error("failed to encode {}: {source}", path.display())]
    Png {
        path: PathBuf,
        #[source]
        source: png::EncodingError,
    },

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
