//! File-backed theme preference.

use std::path::PathBuf;

use glyphrain_core::{PreferenceStore, Theme};

use crate::Config;

/// Stores the theme preference in the `theme` key of the config file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by the config file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreferenceStore for FileStore {
    fn load(&self) -> glyphrain_core::Result<Option<Theme>> {
        Ok(Config::load(&self.path)?.theme)
    }

    fn save(&mut self, theme: Theme) -> glyphrain_core::Result<()> {
        let mut config = Config::load(&self.path)?;
        config.theme = Some(theme);
        config.save(&self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> glyphrain_core::Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut config = Config::load(&self.path)?;
        if config.theme.take().is_some() {
            config.save(&self.path)?;
        }
        Ok(())
    }
}
