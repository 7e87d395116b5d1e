pub mod registry;

pub use registry::ModelRegistry;
