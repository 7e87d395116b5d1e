use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::classify::classifier::{self, Classification};
use crate::error::{DetectorError, Result};
use crate::grid::Grid;
use crate::network::network::Network;

/// Pre-trained networks addressable by a short tag such as `"A"`.
///
/// Filled once at startup and only read afterwards; switching detectors is a
/// lookup. Networks are held behind `Arc` so a caller can keep using one
/// after the registry is gone.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, Arc<Network>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        ModelRegistry::default()
    }

    /// Adds a network under `tag`, replacing any network already registered
    /// under it.
    pub fn register(&mut self, tag: impl Into<String>, network: Network) {
        let tag = tag.into();
        debug!(
            "registered network {tag:?} ({}-{}-{})",
            network.input_size(),
            network.hidden_size(),
            network.output_size()
        );
        self.models.insert(tag, Arc::new(network));
    }

    pub fn get(&self, tag: &str) -> Result<&Arc<Network>> {
        self.models
            .get(tag)
            .ok_or_else(|| DetectorError::UnknownTag(tag.to_owned()))
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.models.contains_key(tag)
    }

    /// Registered tags in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Scores `grid` with the network registered under `tag`.
    pub fn classify(&self, tag: &str, grid: &Grid) -> Result<Classification> {
        classifier::classify(grid, self.get(tag)?)
    }

    /// Builds a registry from `(tag, snapshot JSON)` pairs. Any malformed
    /// snapshot fails the whole bootstrap.
    pub fn from_snapshots<I, T, S>(snapshots: I) -> Result<ModelRegistry>
    where
        I: IntoIterator<Item = (T, S)>,
        T: Into<String>,
        S: AsRef<str>,
    {
        let mut registry = ModelRegistry::new();
        for (tag, json) in snapshots {
            registry.register(tag, Network::from_json(json.as_ref())?);
        }
        Ok(registry)
    }

    /// Registers every `<tag>.json` file in `dir`, using the file stem as the
    /// tag. Other entries are skipped.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<ModelRegistry> {
        let dir = dir.as_ref();
        let mut registry = ModelRegistry::new();

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_json = path.extension().is_some_and(|ext| ext == "json");
            let tag = path.file_stem().and_then(|s| s.to_str());

            match (is_json && path.is_file(), tag) {
                (true, Some(tag)) => {
                    let network = Network::load_json(&path)?;
                    registry.register(tag, network);
                }
                _ => warn!("skipping {} while loading networks", path.display()),
            }
        }

        info!(
            "loaded {} network(s) from {}: {:?}",
            registry.len(),
            dir.display(),
            registry.tags().collect::<Vec<_>>()
        );
        Ok(registry)
    }
}
