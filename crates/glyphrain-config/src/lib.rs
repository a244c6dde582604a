//! Configuration file handling for glyphrain.
//!
//! Settings live in a single TOML file under the platform config directory.
//! The same file carries the user's explicit theme preference, which
//! [`FileStore`] reads and rewrites without touching the other settings.

mod error;
mod paths;
mod store;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use glyphrain_core::{RainConfig, Theme};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use error::{Error, Result};
pub use paths::{APP_NAME, config_path, log_path};
pub use store::FileStore;

/// Default frames per second.
pub const DEFAULT_FPS: u32 = 30;

/// Highest accepted frame rate.
pub const MAX_FPS: u32 = 240;

/// Contents of the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Explicit theme preference, absent until the user toggles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    /// Animation frame rate.
    pub fps: u32,
    /// Rain animation settings.
    pub rain: RainConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: None,
            fps: DEFAULT_FPS,
            rain: RainConfig::default(),
        }
    }
}

impl Config {
    /// Load the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(Error::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&contents).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the config to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "config saved");
        Ok(())
    }
}
