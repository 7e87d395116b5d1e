use serde::{Serialize, Deserialize};

use crate::error::DetectorError;
use crate::layers::dense::Layer;
use crate::network::metadata::ModelMetadata;
use crate::network::network::Network;

/// Declared layer sizes of a perceptron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSizes {
    pub input: usize,
    pub hidden: usize,
    pub output: usize,
}

/// On-disk form of a [`Network`].
///
/// ```json
/// {
///   "sizes": { "input": 35, "hidden": 15, "output": 1 },
///   "hidden": { "weights": { "rows": 35, "cols": 15, "data": [[...], ...] },
///               "biases": [...], "activator": "Sigmoid" },
///   "output": { ... },
///   "metadata": { "description": null, "target": "C", "grid_width": 5 }
/// }
/// ```
///
/// `sizes` is redundant with the matrices on purpose: a snapshot whose
/// matrices disagree with its declared sizes is rejected instead of being
/// patched up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub sizes: LayerSizes,
    pub hidden: Layer,
    pub output: Layer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ModelMetadata>,
}

impl From<Network> for NetworkSnapshot {
    fn from(network: Network) -> Self {
        NetworkSnapshot {
            sizes: network.sizes(),
            hidden: network.hidden,
            output: network.output,
            metadata: network.metadata,
        }
    }
}

impl TryFrom<NetworkSnapshot> for Network {
    type Error = DetectorError;

    fn try_from(snapshot: NetworkSnapshot) -> Result<Self, Self::Error> {
        let LayerSizes { input, hidden, output } = snapshot.sizes;

        if input == 0 || hidden == 0 || output == 0 {
            return Err(DetectorError::SnapshotFormat(format!(
                "layer sizes must be non-zero, got {input}/{hidden}/{output}"
            )));
        }
        if snapshot.hidden.size() != hidden || !snapshot.hidden.is_consistent(input) {
            return Err(DetectorError::SnapshotFormat(format!(
                "hidden layer does not match declared shape {input}x{hidden}"
            )));
        }
        if snapshot.output.size() != output || !snapshot.output.is_consistent(hidden) {
            return Err(DetectorError::SnapshotFormat(format!(
                "output layer does not match declared shape {hidden}x{output}"
            )));
        }

        Ok(Network {
            hidden: snapshot.hidden,
            output: snapshot.output,
            metadata: snapshot.metadata,
        })
    }
}
