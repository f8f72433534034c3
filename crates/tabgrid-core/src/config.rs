// ABOUTME: Engine and driver configuration handling.
// ABOUTME: Loads and saves settings from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::Redistribution;

/// Initial outer size of the grid, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Smallest track the priority strategy may produce before it gives up
    /// and shares space evenly
    pub min_track_size: u32,

    /// Default tracing filter for the driver (RUST_LOG wins when set)
    pub log_level: String,

    /// Grid size before the first resize event arrives
    pub viewport: Viewport,

    /// Strategy used when removing a tab tears down its window
    pub tab_removal: Redistribution,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_track_size: 40,
            log_level: "info".to_string(),
            viewport: Viewport::default(),
            tab_removal: Redistribution::Even,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigPath,

    #[error("Viewport {width}x{height} has an empty axis")]
    EmptyViewport { width: u32, height: u32 },
}

impl Config {
    /// Get the default config file path (~/.config/tabgrid/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tabgrid").join("config.toml"))
    }

    /// Read and check a config file. A viewport with a zero axis cannot hold
    /// a single track, so it is refused here rather than at the first command.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(&std::fs::read_to_string(path)?)?;
        let Viewport { width, height } = config.viewport;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyViewport { width, height });
        }
        Ok(config)
    }

    /// Load config from default path, or return default config if not found
    pub fn load_or_default() -> Self {
        Self::default_path()
            .and_then(|path| Self::load(&path).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn save_to_default(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigPath)?;
        self.save(&path)?;
        Ok(path)
    }
}
