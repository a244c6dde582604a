use std::path::PathBuf;

use clap::Parser;
use glyphrain_config::{Config, FileStore};
use tracing::info;

mod app;
mod cli;
mod logging;
mod scheme;

use app::App;
use cli::Cli;
use scheme::EnvProbe;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init();

    let config_path = match cli.config {
        Some(path) => path,
        None => glyphrain_config::config_path()?,
    };
    let mut config = Config::load(&config_path)?;
    if let Some(fps) = cli.fps {
        config.fps = fps;
    }
    info!(path = %config_path.display(), fps = config.fps, "starting glyphrain");

    let app = build_app(config, config_path, cli.seed, cli.forget_theme)?;
    let app = if cli.paused { app.paused() } else { app };

    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

/// Wire the app against the real terminal, config file and environment.
fn build_app(
    config: Config,
    config_path: PathBuf,
    seed: Option<u64>,
    forget_theme: bool,
) -> color_eyre::Result<App<FileStore, EnvProbe>> {
    let (cols, rows) = crossterm::terminal::size()?;
    let mut builder = App::builder()
        .store(FileStore::new(config_path))
        .probe(EnvProbe)
        .terminal_size(cols, rows)
        .rain(config.rain)
        .fps(config.fps)
        .forget_theme(forget_theme);
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }
    Ok(builder.build()?)
}
