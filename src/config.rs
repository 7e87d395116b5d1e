use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::data::letters::{LETTER_HEIGHT, LETTER_WIDTH};
use crate::error::{DetectorError, Result};

/// Iteration cap used when a config does not set its own.
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;

/// Training hyperparameters kept separate from the network shape so that a
/// detector can be retrained without touching its architecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hyperparams {
    pub learning_rate: f64,
    pub error_tolerance: f64,
    pub max_iterations: Option<usize>,
    pub log_every: usize,
}

impl Default for Hyperparams {
    fn default() -> Self {
        Hyperparams {
            learning_rate: 0.2,
            error_tolerance: 5e-7,
            max_iterations: Some(DEFAULT_MAX_ITERATIONS),
            log_every: 100,
        }
    }
}

/// Everything needed to build and train one letter detector.
///
/// Missing fields fall back to their defaults when loaded from JSON, so a
/// file containing only `{"negatives": 500}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub hidden_size: usize,
    /// How many random negatives to generate for the training set.
    pub negatives: usize,
    pub hyperparams: Hyperparams,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            grid_width: LETTER_WIDTH,
            grid_height: LETTER_HEIGHT,
            hidden_size: 15,
            negatives: 10_000,
            hyperparams: Hyperparams::default(),
        }
    }
}

impl DetectorConfig {
    /// Length of the input vector: one value per tile.
    pub fn input_size(&self) -> usize {
        self.grid_width * self.grid_height
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(DetectorError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.hidden_size == 0 {
            return Err(DetectorError::InvalidConfig("hidden_size must be positive".into()));
        }
        crate::train::TrainConfig::from(&self.hyperparams).validate()
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| DetectorError::InvalidConfig(e.to_string()))
    }

    /// Loads and validates a config written by `save_json` (or by hand).
    pub fn load_json(path: impl AsRef<Path>) -> Result<DetectorConfig> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: DetectorConfig = serde_json::from_reader(reader)
            .map_err(|e| DetectorError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
