use std::path::PathBuf;

use clap::Parser;

/// beatstand - a terminal storefront for previewing and buying beats.
#[derive(Parser, Debug, Default)]
#[command(name = "beatstand")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// TOML catalog to load instead of the configured or built-in one.
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Start with only this genre listed (`all` shows everything).
    #[arg(short, long)]
    pub genre: Option<String>,

    /// Config file to read instead of the default location.
    #[arg(long)]
    pub config: Option<PathBuf>,
}
