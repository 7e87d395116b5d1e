use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use crate::config::Hyperparams;
use crate::error::{DetectorError, Result};
use crate::train::iteration_stats::IterationStats;

/// Configuration for a `train` run.
///
/// # Fields
/// - `learning_rate`  : step size applied to every weight update; must be > 0
/// - `error_tolerance`: training stops once the iteration error is at or below this
/// - `max_iterations` : optional hard cap on passes over the example set
/// - `log_every`      : emit a `debug!` line every this many iterations (0 = never)
/// - `progress_tx`    : optional channel sender; one `IterationStats` is sent per
///                    completed iteration.  If the receiver is dropped the run
///                    stops as if cancelled.
/// - `stop_flag`      : optional atomic flag; when set to `true` from another
///                    thread the run stops before the next iteration.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub error_tolerance: f64,
    pub max_iterations: Option<usize>,
    pub log_every: usize,
    pub progress_tx: Option<mpsc::Sender<IterationStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no iteration cap, no progress
    /// channel and no stop flag.
    pub fn new(learning_rate: f64, error_tolerance: f64) -> Self {
        TrainConfig {
            learning_rate,
            error_tolerance,
            max_iterations: None,
            log_every: 0,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(DetectorError::InvalidConfig(format!(
                "learning rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        if !(self.error_tolerance.is_finite() && self.error_tolerance > 0.0) {
            return Err(DetectorError::InvalidConfig(format!(
                "error tolerance must be a positive number, got {}",
                self.error_tolerance
            )));
        }
        Ok(())
    }
}

impl From<&Hyperparams> for TrainConfig {
    fn from(hp: &Hyperparams) -> Self {
        TrainConfig {
            learning_rate: hp.learning_rate,
            error_tolerance: hp.error_tolerance,
            max_iterations: hp.max_iterations,
            log_every: hp.log_every,
            progress_tx: None,
            stop_flag: None,
        }
    }
}
