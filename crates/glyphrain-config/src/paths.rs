//! Platform locations of glyphrain's files.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::{Error, Result};

/// Application name used for platform directories.
pub const APP_NAME: &str = "glyphrain";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME).ok_or(Error::NoConfigDir)
}

/// Default location of the config file.
pub fn config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

/// Default location of the log file.
pub fn log_path() -> Result<PathBuf> {
    Ok(project_dirs()?
        .data_local_dir()
        .join(format!("{APP_NAME}.log")))
}
