use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

mod color;
mod config;
mod display;
mod renderer;
mod visualizer;

use color::ColorScheme;
use config::Config;
use display::DisplayMode;

#[derive(Parser, Debug)]
#[command(name = "unitcircle")]
#[command(author, version, about = "Animated unit circle with labeled canonical angles")]
pub struct Args {
    /// Display mode: terminal or snapshot
    #[arg(short, long)]
    pub mode: Option<DisplayMode>,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Circle radius in pixels
    #[arg(short, long)]
    pub radius: Option<i32>,

    /// Pause after each circle-tracing step (ms)
    #[arg(long)]
    pub trace_delay: Option<u64>,

    /// Pause after each radius and each label (ms)
    #[arg(long)]
    pub angle_delay: Option<u64>,

    /// Color scheme: paper, chalkboard, spectrum
    #[arg(long)]
    pub colors: Option<ColorScheme>,

    /// PNG path for snapshot mode
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write a default config to ~/.config/unitcircle/config.toml and exit
    #[arg(long)]
    pub init_config: bool,
}

fn main() -> Result<()> {
    // Initialize logging; stderr keeps stdout free for the terminal UI
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("unitcircle=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args);
    config.validate();

    info!(
        "Starting {} in {:?} mode (radius {})",
        config.window.title, config.display.mode, config.circle.radius
    );

    match config.display.mode {
        DisplayMode::Terminal => display::terminal::run(&config)?,
        DisplayMode::Snapshot => display::snapshot::run(&config)?,
    }

    Ok(())
}
