//! Configuration loader for lifecanvas.
//!
//! * Looks for `lifecanvas.toml` in the cwd unless overridden by `--config`.
//! * Provides defaults so the file is optional; an explicitly named file
//!   that cannot be read or parsed is a hard error.
//! * Command line flags override whatever the file says.
//!
//! Extend this struct whenever you add new tunables.

use std::fs;

use bevy::prelude::Resource;
use clap::Parser;
use log::warn;
use serde::Deserialize;
use thiserror::Error;

use crate::scheduler::{MAX_TICK_RATE, MIN_TICK_RATE};
use crate::viewport::{MAX_SCALE, MIN_SCALE};

pub const DEFAULT_CONFIG_PATH: &str = "lifecanvas.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Resource)]
#[serde(default)]
pub struct Config {
    /// Simulation ticks per second (1-200).
    pub tick_rate: f32,
    /// Cell edge length in pixels (2-30).
    pub cell_size: u32,
    /// Fraction of visible cells set alive by the noise key (0-1).
    pub noise_density: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: 10.0,
            cell_size: 20,
            noise_density: 0.3,
        }
    }
}

impl Config {
    /// Load from an explicit path; any failure is reported to the caller.
    pub fn from_path(path: &str) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        Ok(config.sanitized())
    }

    /// Load from the default location. A missing file is normal and yields
    /// defaults; a malformed one is logged and also yields defaults.
    pub fn load_default() -> Self {
        match fs::read_to_string(DEFAULT_CONFIG_PATH) {
            Ok(text) => match toml::from_str::<Config>(&text) {
                Ok(config) => config.sanitized(),
                Err(err) => {
                    warn!("ignoring malformed {DEFAULT_CONFIG_PATH}: {err}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Apply command line overrides on top of the file values.
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(rate) = cli.tick_rate {
            self.tick_rate = rate;
        }
        if let Some(size) = cli.cell_size {
            self.cell_size = size;
        }
        self.sanitized()
    }

    /// Clamp every tunable into its documented range.
    fn sanitized(mut self) -> Self {
        let rate = self.tick_rate.clamp(MIN_TICK_RATE, MAX_TICK_RATE);
        if rate != self.tick_rate {
            warn!("tick_rate {} out of range, clamped to {rate}", self.tick_rate);
            self.tick_rate = rate;
        }
        let size = self.cell_size.clamp(MIN_SCALE, MAX_SCALE);
        if size != self.cell_size {
            warn!("cell_size {} out of range, clamped to {size}", self.cell_size);
            self.cell_size = size;
        }
        self.noise_density = self.noise_density.clamp(0.0, 1.0);
        self
    }
}

#[derive(Debug, Parser)]
#[command(name = "lifecanvas", about = "Interactive sparse Game of Life on a pannable canvas")]
pub struct Cli {
    /// Path to a TOML config file.
    #[arg(long)]
    pub config: Option<String>,
    /// Simulation ticks per second (1-200).
    #[arg(long)]
    pub tick_rate: Option<f32>,
    /// Cell edge length in pixels (2-30).
    #[arg(long)]
    pub cell_size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_range() {
        let c = Config::default();
        assert!((MIN_TICK_RATE..=MAX_TICK_RATE).contains(&c.tick_rate));
        assert!((MIN_SCALE..=MAX_SCALE).contains(&c.cell_size));
    }

    #[test]
    fn parses_a_full_file() {
        let c: Config =
            toml::from_str("tick_rate = 30.0\ncell_size = 8\nnoise_density = 0.5\n").unwrap();
        let c = c.sanitized();
        assert_eq!(c.tick_rate, 30.0);
        assert_eq!(c.cell_size, 8);
        assert_eq!(c.noise_density, 0.5);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let c: Config = toml::from_str("tick_rate = 5.0\n").unwrap();
        assert_eq!(c.tick_rate, 5.0);
        assert_eq!(c.cell_size, Config::default().cell_size);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let c: Config =
            toml::from_str("tick_rate = 9000.0\ncell_size = 1\nnoise_density = 7.0\n").unwrap();
        let c = c.sanitized();
        assert_eq!(c.tick_rate, MAX_TICK_RATE);
        assert_eq!(c.cell_size, MIN_SCALE);
        assert_eq!(c.noise_density, 1.0);
    }

    #[test]
    fn cli_overrides_file_values() {
        let cli = Cli {
            config: None,
            tick_rate: Some(60.0),
            cell_size: Some(4),
        };
        let c = Config::default().apply_cli(&cli);
        assert_eq!(c.tick_rate, 60.0);
        assert_eq!(c.cell_size, 4);
    }

    #[test]
    fn cli_overrides_are_clamped_too() {
        let cli = Cli {
            config: None,
            tick_rate: Some(-3.0),
            cell_size: Some(500),
        };
        let c = Config::default().apply_cli(&cli);
        assert_eq!(c.tick_rate, MIN_TICK_RATE);
        assert_eq!(c.cell_size, MAX_SCALE);
    }
}
