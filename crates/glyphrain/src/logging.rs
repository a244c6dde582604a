//! Log file setup.
//!
//! The terminal belongs to the animation, so logs go to a file under the
//! platform data directory. Verbosity comes from `GLYPHRAIN_LOG`.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "GLYPHRAIN_LOG";

/// Install the global subscriber. Logging stays off if the log file cannot be opened.
pub fn init() {
    let Ok(path) = glyphrain_config::log_path() else {
        return;
    };
    if let Some(dir) = path.parent()
        && fs::create_dir_all(dir).is_err()
    {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}
