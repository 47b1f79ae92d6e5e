pub mod image;
pub mod terminal;

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::generator::Generator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Terminal,
    Image,
}

/// Build the generator for a run, seeded when a seed is given
pub fn build_generator(config: &Config, seed: Option<u64>) -> Result<Generator> {
    let origin = config.canvas.origin();
    let generator = match seed {
        Some(seed) => Generator::seeded(config.generator.clone(), origin, seed)?,
        None => Generator::from_entropy(config.generator.clone(), origin)?,
    };
    debug!(
        "Generator: min separation {}°, lengths from {} (span {}), origin {}",
        config.generator.min_separation,
        config.generator.length_min,
        config.generator.length_span,
        origin
    );
    Ok(generator)
}
