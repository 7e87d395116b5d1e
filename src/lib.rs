//! A from-scratch single-hidden-layer perceptron that scores how closely a
//! grid of on/off tiles matches a letter shape.
//!
//! The pieces, leaf first: [`Network`] (forward pass and JSON snapshots),
//! [`TrainingExampleSet`] (random negatives plus hand-drawn exemplars),
//! [`train()`] / [`BackgroundTrainer`] (backpropagation, optionally on a worker
//! thread), [`classify()`] (score to [`Verdict`]) and [`ModelRegistry`]
//! (pre-trained detectors by tag).

pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod grid;
pub mod data;
pub mod train;
pub mod classify;
pub mod registry;
pub mod config;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{ModelMetadata, Network, NetworkSnapshot};
pub use grid::{Grid, Tile};
pub use data::{letter_training_set, Letter, TrainingExample, TrainingExampleSet};
pub use train::{BackgroundTrainer, IterationStats, StopReason, TrainConfig, TrainedResult, TrainingHandle, train, train_iteration};
pub use classify::{classify, Classification, Severity, Verdict};
pub use registry::ModelRegistry;
pub use config::{DetectorConfig, Hyperparams};
pub use error::{DetectorError, Result};
