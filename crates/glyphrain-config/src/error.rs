//! Errors raised while reading or writing the config file.

use std::path::PathBuf;

/// Config file errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("could not determine a config directory for this platform")]
    NoConfigDir,
}

/// Result alias using the config [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for glyphrain_core::Error {
    fn from(err: Error) -> Self {
        glyphrain_core::Error::Store(err.to_string())
    }
}
