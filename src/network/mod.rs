pub mod metadata;
pub mod network;
pub mod snapshot;

pub use metadata::ModelMetadata;
pub use network::Network;
pub use snapshot::{LayerSizes, NetworkSnapshot};
