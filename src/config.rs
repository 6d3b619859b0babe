//! Game configuration, loaded from `gridsnake.toml` when present.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Validation failures for a [`GameConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell size must be nonzero")]
    ZeroUnitSize,
    #[error("grid {axis} {value} is not a nonzero multiple of the cell size {unit_size}")]
    NotAMultiple { axis: &'static str, value: u32, unit_size: u32 },
    #[error("initial snake length {len} does not fit a grid {cells_wide} cells wide")]
    SnakeTooLong { len: u32, cells_wide: u32 },
    #[error("initial snake length must be at least 1")]
    ZeroSnakeLength,
    #[error("tick rate must be nonzero")]
    ZeroTickRate,
}

/// Gameplay configuration. Grid dimensions are in pixels and must be exact
/// multiples of `unit_size` so the cell math is exact.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameConfig {
    /// Cell size in pixels.
    #[serde(default = "default_unit_size")]
    pub unit_size: u32,
    /// Playfield width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Playfield height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Body segments at spawn.
    #[serde(default = "default_initial_snake_length")]
    pub initial_snake_length: u32,
    /// Target ticks per second, enforced by the driver.
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u32,
}

impl GameConfig {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist. The result is always validated.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            info!("no {} found, using default configuration", path.display());
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.unit_size == 0 {
            return Err(ConfigError::ZeroUnitSize);
        }
        for &(axis, value) in &[("width", self.width), ("height", self.height)] {
            if value == 0 || value % self.unit_size != 0 {
                return Err(ConfigError::NotAMultiple { axis, value, unit_size: self.unit_size });
            }
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::ZeroSnakeLength);
        }
        let cells_wide = self.width / self.unit_size;
        if self.initial_snake_length > cells_wide {
            return Err(ConfigError::SnakeTooLong {
                len: self.initial_snake_length,
                cells_wide,
            });
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            unit_size: default_unit_size(),
            width: default_width(),
            height: default_height(),
            initial_snake_length: default_initial_snake_length(),
            tick_rate: default_tick_rate(),
        }
    }
}

fn default_unit_size() -> u32 {
    20
}
fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    600
}
fn default_initial_snake_length() -> u32 {
    3
}
fn default_tick_rate() -> u32 {
    60
}
