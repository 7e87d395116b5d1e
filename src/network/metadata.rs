use serde::{Deserialize, Serialize};

/// Optional annotations attached to a saved Network.
/// All fields are Option<> so snapshots without metadata deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModelMetadata {
    pub description: Option<String>,
    /// Tag of the shape this network was trained to recognize (e.g. "C").
    pub target: Option<String>,
    /// Width of the grid the input vector was flattened from.
    pub grid_width: Option<usize>,
}

impl ModelMetadata {
    pub fn for_target(target: impl Into<String>, grid_width: usize) -> Self {
        ModelMetadata {
            description: None,
            target: Some(target.into()),
            grid_width: Some(grid_width),
        }
    }
}
