use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod color;
mod config;
mod display;
mod generator;
mod geometry;
mod renderer;

use config::Config;
use display::DisplayMode;

#[derive(Parser, Debug)]
#[command(name = "trivec")]
#[command(author, version, about = "Three random vectors, at least 90 degrees apart")]
pub struct Args {
    /// Display mode: terminal or image
    #[arg(short, long)]
    mode: Option<DisplayMode>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// PNG output path (image mode, and the save key in terminal mode)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for reproducible vectors
    #[arg(long)]
    seed: Option<u64>,

    /// Minimum angle between any two vectors, in degrees (at most 120)
    #[arg(long)]
    min_separation: Option<f64>,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Write a commented config template to the default path and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Terminal mode owns the screen; keep logs to warnings unless RUST_LOG says otherwise
    let default_directive = match args.mode {
        Some(DisplayMode::Image) => "trivec=info",
        _ => "trivec=warn",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .init();

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote config template to {}", path.display());
        return Ok(());
    }

    // Load or create config
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args);
    config.validate()?;

    info!("Starting trivec in {:?} mode", config.display.mode);

    match config.display.mode {
        DisplayMode::Terminal => display::terminal::run(config, args.seed)?,
        DisplayMode::Image => display::image::run(&config, args.seed)?,
    }

    Ok(())
}
