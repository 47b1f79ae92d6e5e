//! Headless mode: one generation rendered to a PNG file.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::generator::VectorSet;
use crate::renderer::{self, export, Canvas};

pub fn run(config: &Config, seed: Option<u64>) -> Result<()> {
    let mut generator = super::build_generator(config, seed)?;
    let set = generator.generate()?;

    save(&set, config, &config.display.output)?;
    println!("{}", set);
    Ok(())
}

/// Render `set` onto a fresh canvas of the configured size.
pub fn render(set: &VectorSet, config: &Config) -> Canvas {
    let mut canvas = Canvas::new(config.canvas.width as usize, config.canvas.height as usize);
    renderer::draw(&mut canvas, set, &config.style);
    canvas
}

/// Render `set` and write it to `path` as PNG.
pub fn save(set: &VectorSet, config: &Config, path: &Path) -> Result<()> {
    let canvas = render(set, config);
    export::write_png(&canvas, path)?;
    info!("Wrote {}x{} image to {}", canvas.width, canvas.height, path.display());
    Ok(())
}
