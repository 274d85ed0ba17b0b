//! Persistent frontend settings, read from a TOML file and overridden by
//! command-line flags.

use std::path::{Path, PathBuf};

use oberon_core::control::render::Tint;
use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;

pub const MAX_SCALE: u32 = 8;
/// Largest accepted display width or height, in pixels.
pub const MAX_DISPLAY_DIM: u32 = 8192;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scale: u32,
    pub large_address_space: bool,
    pub display: DisplayConfig,
    /// RGBA overlay drawn while the processor is halted.
    pub halt_tint: [u8; 4],
}

impl Default for Config {
    fn default() -> Self {
        let t = Tint::HALTED;
        Self {
            scale: 1,
            large_address_space: false,
            display: DisplayConfig::default(),
            halt_tint: [t.r, t.g, t.b, t.alpha],
        }
    }
}

impl Config {
    /// `<config dir>/oberon/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("oberon").join("config.toml"))
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(scale) = cli.scale {
            self.scale = scale;
        }
        if cli.large {
            self.large_address_space = true;
        }
        if let Some(width) = cli.width {
            self.display.width = width;
        }
        if let Some(height) = cli.height {
            self.display.height = height;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SCALE).contains(&self.scale) {
            return Err(ConfigError::Invalid(format!(
                "scale must be between 1 and {MAX_SCALE}, got {}",
                self.scale
            )));
        }
        let (width, height) = (self.display.width, self.display.height);
        if width == 0 || height == 0 {
            return Err(ConfigError::Invalid(format!("display size {width}x{height} is empty")));
        }
        if width > MAX_DISPLAY_DIM || height > MAX_DISPLAY_DIM {
            return Err(ConfigError::Invalid(format!(
                "display size {width}x{height} exceeds {MAX_DISPLAY_DIM} pixels per side"
            )));
        }
        Ok(())
    }

    pub fn tint(&self) -> Tint {
        let [r, g, b, alpha] = self.halt_tint;
        Tint { r, g, b, alpha }
    }
}
