use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::color::RgbColor;
use crate::display::DisplayMode;
use crate::generator::{GenerateError, MAX_FEASIBLE_SEPARATION};
use crate::geometry::Point;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write config at {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("canvas must be at least 1x1 pixels, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },
    #[error("invalid [generator] section: {0}")]
    Generator(#[from] GenerateError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub canvas: CanvasConfig,
    pub generator: GeneratorConfig,
    pub style: StyleConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    /// Where image mode writes, and where the terminal `s` key saves
    pub output: PathBuf,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Terminal,
            output: PathBuf::from("trivec.png"),
        }
    }
}

/// Logical drawing surface. The origin sits at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
        }
    }
}

impl CanvasConfig {
    pub fn origin(&self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Minimum pairwise angular separation in degrees
    pub min_separation: f64,
    pub length_min: u32,
    /// Lengths are drawn from `length_min..length_min + length_span`
    pub length_span: u32,
    pub max_attempts: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_separation: 90.0,
            length_min: 100,
            length_span: 191,
            max_attempts: 100_000,
        }
    }
}

impl GeneratorConfig {
    /// Reject thresholds three angles can never satisfy.
    pub fn validate(&self) -> Result<(), GenerateError> {
        if !(0.0..=MAX_FEASIBLE_SEPARATION).contains(&self.min_separation) {
            return Err(GenerateError::InfeasibleSeparation(self.min_separation));
        }
        if self.length_span == 0 {
            return Err(GenerateError::InvalidLengthSpan);
        }
        if self.length_max().is_none() {
            return Err(GenerateError::LengthOverflow {
                length_min: self.length_min,
                length_span: self.length_span,
            });
        }
        Ok(())
    }

    /// Largest length the generator can draw, `None` if it does not fit in a `u32`
    pub fn length_max(&self) -> Option<u32> {
        self.length_min.checked_add(self.length_span.checked_sub(1)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub background: RgbColor,
    pub axis_color: RgbColor,
    pub axis_width: f64,
    pub vector_color: RgbColor,
    pub vector_width: f64,
    pub point_color: RgbColor,
    pub point_radius: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background: RgbColor::WHITE,
            axis_color: RgbColor::new(200, 150, 0),
            axis_width: 1.0,
            vector_color: RgbColor::BLACK,
            vector_width: 2.0,
            point_color: RgbColor::BLACK,
            point_radius: 3.0,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/trivec/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("trivec").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists
    /// Returns None if file doesn't exist, logs warning on parse errors
    pub fn load_from_default_path() -> Option<Self> {
        Self::load_or_warn(&Self::default_path()?)
    }

    /// Load `path` if it exists; a file that fails to load is logged and skipped
    pub fn load_or_warn(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::load(path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("Failed to load config at {}: {}. Using defaults.", path.display(), e);
                None
            }
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        Self::write_template(&path)?;
        Ok(path)
    }

    /// Write the commented template to `path`, creating parent directories
    pub fn write_template(path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(path, Self::generate_config_template()).map_err(write_err)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::EmptyCanvas {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        self.generator.validate()?;
        Ok(())
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r##"# Trivec Configuration
# This file is auto-generated. Edit as needed.

[display]
# Display mode: "terminal" or "image"
mode = "terminal"
# PNG written by image mode and by the [s]ave key in terminal mode
output = "trivec.png"

[canvas]
# Logical canvas size in pixels; the origin is the center
width = 800
height = 800

[generator]
# Minimum angular separation between every pair of vectors, in degrees.
# Three vectors can be at most 120 degrees apart.
min_separation = 90.0
# Lengths are drawn uniformly from length_min .. length_min + length_span - 1
length_min = 100
length_span = 191
# Give up after this many rejected angle triples
max_attempts = 100000

[style]
# Colors: hex "#rrggbb" or CSS names
background = "#ffffff"
axis_color = "#c89600"
axis_width = 1.0
vector_color = "#000000"
vector_width = 2.0
point_color = "#000000"
point_radius = 3.0
"##
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) {
        if let Some(mode) = args.mode {
            self.display.mode = mode;
        }
        if let Some(ref output) = args.output {
            self.display.output = output.clone();
        }
        if let Some(width) = args.width {
            self.canvas.width = width;
        }
        if let Some(height) = args.height {
            self.canvas.height = height;
        }
        if let Some(sep) = args.min_separation {
            self.generator.min_separation = sep;
        }
    }
}
