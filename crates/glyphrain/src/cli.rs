//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed for the rain's random source, for reproducible animations.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frames per second, overriding the config file.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(glyphrain_config::MAX_FPS)))]
    pub fps: Option<u32>,

    /// Forget the stored theme preference so the terminal's colour scheme applies.
    #[arg(long)]
    pub forget_theme: bool,

    /// Start with the rain paused.
    #[arg(long)]
    pub paused: bool,
}
