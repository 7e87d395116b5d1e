use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{DetectorError, Result};
use crate::layers::dense::Layer;
use crate::network::metadata::ModelMetadata;
use crate::network::snapshot::{LayerSizes, NetworkSnapshot};

/// A single-hidden-layer perceptron: `input → hidden (sigmoid) → output (sigmoid)`.
///
/// Activation borrows the network immutably; only the trainer, through
/// `&mut Network`, ever changes weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NetworkSnapshot", into = "NetworkSnapshot")]
pub struct Network {
    pub(crate) hidden: Layer,
    pub(crate) output: Layer,
    pub(crate) metadata: Option<ModelMetadata>,
}

impl Network {
    /// Builds a perceptron with small random weights drawn from `rng`.
    pub fn perceptron<R: Rng + ?Sized>(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        rng: &mut R,
    ) -> Result<Network> {
        if input_size == 0 || hidden_size == 0 || output_size == 0 {
            return Err(DetectorError::InvalidTopology(format!(
                "every layer needs at least one neuron, got {input_size}/{hidden_size}/{output_size}"
            )));
        }

        Ok(Network {
            hidden: Layer::new(hidden_size, input_size, rng),
            output: Layer::new(output_size, hidden_size, rng),
            metadata: None,
        })
    }

    pub fn with_metadata(mut self, metadata: ModelMetadata) -> Network {
        self.metadata = Some(metadata);
        self
    }

    pub fn metadata(&self) -> Option<&ModelMetadata> {
        self.metadata.as_ref()
    }

    pub fn input_size(&self) -> usize {
        self.hidden.input_size()
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden.size()
    }

    pub fn output_size(&self) -> usize {
        self.output.size()
    }

    pub fn sizes(&self) -> LayerSizes {
        LayerSizes {
            input: self.input_size(),
            hidden: self.hidden_size(),
            output: self.output_size(),
        }
    }

    /// Forward pass returning every output neuron.
    pub fn activate_all(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.check_input(input)?;
        Ok(self.output.feed(&self.hidden.feed(input)))
    }

    /// Forward pass returning the first output neuron, the detector's score.
    pub fn activate(&self, input: &[f64]) -> Result<f64> {
        self.check_input(input)?;
        let hidden = self.hidden.feed(input);
        Ok(self.output.feed(&hidden)[0])
    }

    /// Forward pass that keeps the hidden activations for backprop.
    /// The caller has already validated `input`.
    pub(crate) fn trace(&self, input: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let hidden = self.hidden.feed(input);
        let output = self.output.feed(&hidden);
        (hidden, output)
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        if input.len() != self.input_size() {
            return Err(DetectorError::dimension(self.input_size(), input.len()));
        }
        Ok(())
    }

    /// Serializes the network to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DetectorError::SnapshotFormat(e.to_string()))
    }

    /// Parses a snapshot produced by `to_json` / `save_json`.
    pub fn from_json(json: &str) -> Result<Network> {
        serde_json::from_str(json)
            .map_err(|e| DetectorError::SnapshotFormat(e.to_string()))
    }

    /// Serializes the network weights to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| DetectorError::SnapshotFormat(e.to_string()))
    }

    /// Deserializes a network from a JSON file previously written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Network> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| DetectorError::SnapshotFormat(e.to_string()))
    }
}
