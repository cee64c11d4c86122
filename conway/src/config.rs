// config.rs - Startup configuration, loaded from TOML

use std::path::Path;

use serde::Deserialize;

use crate::controls::{MAX_GRID_DIMENSION, MIN_GRID_DIMENSION};
use crate::error::ConfigError;
use crate::grid::{DEFAULT_ALIVE_PROBABILITY, GridSize};
use crate::timer::clamp_tick_ms;

/// Initial grid, timer and randomisation settings.
///
/// Every field is optional in the file; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub tick_ms: u64,
    pub running: bool,
    pub alive_probability: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 30,
            cols: 50,
            tick_ms: 200,
            running: true,
            alive_probability: DEFAULT_ALIVE_PROBABILITY,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        Ok(config.clamped())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Pulls every value into the range the UI would allow.
    pub fn clamped(self) -> Self {
        let alive_probability = if self.alive_probability.is_nan() {
            DEFAULT_ALIVE_PROBABILITY
        } else {
            self.alive_probability.clamp(0.0, 1.0)
        };
        Self {
            rows: self.rows.clamp(MIN_GRID_DIMENSION, MAX_GRID_DIMENSION),
            cols: self.cols.clamp(MIN_GRID_DIMENSION, MAX_GRID_DIMENSION),
            tick_ms: clamp_tick_ms(self.tick_ms),
            running: self.running,
            alive_probability,
        }
    }

    pub fn size(&self) -> GridSize {
        GridSize::new(self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_stock_board() {
        let config = GameConfig::default();
        assert_eq!(config.size(), GridSize::new(30, 50));
        assert_eq!(config.tick_ms, 200);
        assert!(config.running);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = GameConfig::from_toml_str("rows = 12\nrunning = false\n").unwrap();
        assert_eq!(config.rows, 12);
        assert_eq!(config.cols, 50);
        assert!(!config.running);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = GameConfig::from_toml_str(
            "rows = 1\ncols = 900\ntick_ms = 1\nalive_probability = 3.0\n",
        )
        .unwrap();
        assert_eq!(config.size(), GridSize::new(5, 200));
        assert_eq!(config.tick_ms, 10);
        assert_eq!(config.alive_probability, 1.0);
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        let err = GameConfig::from_toml_str("rows = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = GameConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
