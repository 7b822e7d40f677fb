//! Application tunables loaded from `config.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::{Result, eyre::WrapErr};
use serde::{Deserialize, Serialize};

const MIN_FPS: u32 = 1;
const MAX_FPS: u32 = 240;
/// Upper bound on concurrent shooting stars.
const MAX_SHOOTING_STARS: usize = 6;

/// Top-level configuration. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target frames per second.
    pub fps: u32,
    /// Write logs to this file. No logging when unset.
    pub log_file: Option<PathBuf>,
    pub sky: SkySettings,
    pub intro: IntroSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 60,
            log_file: None,
            sky: SkySettings::default(),
            intro: IntroSettings::default(),
        }
    }
}

/// Night-sky animation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkySettings {
    /// Period of the shooting-star spawn timer.
    pub spawn_interval_ms: u64,
    /// Chance that a timer tick launches a shooting star.
    pub spawn_probability: f64,
    pub max_shooting_stars: usize,
    pub min_stars: usize,
    /// Logical area per background star.
    pub area_per_star: f64,
    /// Distance past the right/bottom edge before a shooting star is dropped.
    pub exit_margin: f64,
    /// Logical width of one terminal cell.
    pub cell_width: f64,
    /// Logical height of one terminal cell.
    pub cell_height: f64,
}

impl Default for SkySettings {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 2200,
            spawn_probability: 0.7,
            max_shooting_stars: 6,
            min_stars: 120,
            area_per_star: 12_000.0,
            exit_margin: 100.0,
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }
}

/// Typing intro settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroSettings {
    /// Delay before the first character appears.
    pub start_delay_ms: u64,
    /// Time between characters.
    pub char_interval_ms: u64,
}

impl Default for IntroSettings {
    fn default() -> Self {
        Self {
            start_delay_ms: 500,
            char_interval_ms: 100,
        }
    }
}

impl Config {
    /// Parse a TOML document and clamp values into their valid ranges.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).wrap_err("invalid configuration")?;
        Ok(config.normalized())
    }

    /// Load from `path`, or defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).wrap_err_with(|| format!("in config {}", path.display()))
    }

    /// Clamp out-of-range values.
    pub fn normalized(mut self) -> Self {
        self.fps = self.fps.clamp(MIN_FPS, MAX_FPS);
        let sky = &mut self.sky;
        sky.spawn_interval_ms = sky.spawn_interval_ms.max(1);
        sky.spawn_probability = sky.spawn_probability.clamp(0.0, 1.0);
        sky.max_shooting_stars = sky.max_shooting_stars.clamp(1, MAX_SHOOTING_STARS);
        sky.area_per_star = sky.area_per_star.max(1.0);
        sky.cell_width = sky.cell_width.max(1.0);
        sky.cell_height = sky.cell_height.max(1.0);
        self
    }
}
