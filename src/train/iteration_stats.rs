use serde::{Serialize, Deserialize};

/// Per-iteration training statistics emitted by `train`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the trainer
/// sends one `IterationStats` value at the end of every completed pass over
/// the example set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationStats {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Iteration cap for this run, if any.
    pub max_iterations: Option<usize>,
    /// Mean squared error accumulated over this iteration.
    pub error: f64,
    /// Wall-clock time since training started, in milliseconds.
    pub elapsed_ms: u64,
}
