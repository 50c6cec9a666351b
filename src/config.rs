use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Board construction parameters, loadable from TOML.
///
/// ```
/// use merge_2048::config::BoardConfig;
/// let cfg = BoardConfig::from_toml_str("width = 5\nseed = 7\n").unwrap();
/// assert_eq!((cfg.width, cfg.height, cfg.initial_tiles), (5, 4, 2));
/// assert_eq!(cfg.seed, Some(7));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "defaults::width")]
    pub width: usize,
    #[serde(default = "defaults::height")]
    pub height: usize,
    /// Tiles placed by random insertion at construction.
    #[serde(default = "defaults::initial_tiles")]
    pub initial_tiles: usize,
    /// Probability that an inserted tile is a 2 rather than a 4.
    #[serde(default = "defaults::insertion_bias")]
    pub insertion_bias: f64,
    /// Seed for the board's RNG; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: defaults::width(),
            height: defaults::height(),
            initial_tiles: defaults::initial_tiles(),
            insertion_bias: defaults::insertion_bias(),
            seed: None,
        }
    }
}

impl BoardConfig {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, EngineError> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        validate_params(self.width, self.height, self.initial_tiles, self.insertion_bias)
    }
}

pub(crate) fn validate_params(
    width: usize,
    height: usize,
    initial_tiles: usize,
    insertion_bias: f64,
) -> Result<(), EngineError> {
    if width == 0 || height == 0 {
        return Err(EngineError::InvalidArgument(format!(
            "board dimensions must be positive, got {width}x{height}"
        )));
    }
    if !(0.0..=1.0).contains(&insertion_bias) {
        return Err(EngineError::InvalidArgument(format!(
            "insertion bias must be within [0, 1], got {insertion_bias}"
        )));
    }
    if initial_tiles > width * height {
        return Err(EngineError::InvalidArgument(format!(
            "{initial_tiles} initial tiles do not fit a {width}x{height} board"
        )));
    }
    Ok(())
}

mod defaults {
    pub fn width() -> usize { 4 }
    pub fn height() -> usize { 4 }
    pub fn initial_tiles() -> usize { 2 }
    pub fn insertion_bias() -> f64 { 0.9 }
}
