use std::sync::atomic::Ordering;
use std::time::Instant;

use log::{debug, info};
use serde::{Serialize, Deserialize};

use crate::data::example_set::TrainingExampleSet;
use crate::error::{DetectorError, Result};
use crate::loss::mse::MseLoss;
use crate::network::network::Network;
use crate::train::iteration_stats::IterationStats;
use crate::train::train_config::TrainConfig;

/// Why a training run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The iteration error reached `error_tolerance`.
    Converged,
    /// `max_iterations` passes were made.
    IterationLimit,
    /// The stop flag was raised or the progress receiver went away.
    Cancelled,
}

/// Outcome of a `train` run. The network itself was updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedResult {
    /// Mean squared error of the last iteration.
    pub error: f64,
    /// Completed passes over the example set.
    pub iterations: usize,
    pub stop_reason: StopReason,
    pub elapsed_ms: u64,
}

impl TrainedResult {
    pub fn converged(&self) -> bool {
        self.stop_reason == StopReason::Converged
    }
}

/// Trains `network` by per-example gradient descent until the iteration error
/// falls to `config.error_tolerance`, `config.max_iterations` is reached, or
/// the run is cancelled.
///
/// # Early termination
/// The loop stops before the next iteration if:
/// - `config.stop_flag` is set to `true`, **or**
/// - the `progress_tx` receiver has been dropped.
///
/// Either way the network is left holding the weights of the last completed
/// iteration.
pub fn train(
    network: &mut Network,
    set: &TrainingExampleSet,
    config: &TrainConfig,
) -> Result<TrainedResult> {
    config.validate()?;
    check_compatible(network, set)?;

    info!(
        "training {}-{}-{} network on {} examples (rate={}, tolerance={}, max_iterations={:?})",
        network.input_size(),
        network.hidden_size(),
        network.output_size(),
        set.len(),
        config.learning_rate,
        config.error_tolerance,
        config.max_iterations,
    );

    let t_start = Instant::now();
    let mut iterations = 0;
    let mut last_error = None;

    let stop_reason = loop {
        if let Some(ref flag) = config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                break StopReason::Cancelled;
            }
        }
        if config.max_iterations.is_some_and(|max| iterations >= max) {
            break StopReason::IterationLimit;
        }

        let error = run_iteration(network, set, config.learning_rate);
        iterations += 1;
        last_error = Some(error);

        if config.log_every > 0 && iterations % config.log_every == 0 {
            debug!("iteration {iterations}: error={error:.9}");
        }

        let converged = error <= config.error_tolerance;

        if let Some(ref tx) = config.progress_tx {
            let stats = IterationStats {
                iteration: iterations,
                max_iterations: config.max_iterations,
                error,
                elapsed_ms: t_start.elapsed().as_millis() as u64,
            };
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() && !converged {
                break StopReason::Cancelled;
            }
        }

        if converged {
            break StopReason::Converged;
        }
    };

    let error = match last_error {
        Some(error) => error,
        None => mean_squared_error(network, set)?,
    };

    let result = TrainedResult {
        error,
        iterations,
        stop_reason,
        elapsed_ms: t_start.elapsed().as_millis() as u64,
    };

    info!(
        "training stopped ({:?}) after {} iterations: error={:.9}, {} ms",
        result.stop_reason, result.iterations, result.error, result.elapsed_ms
    );

    Ok(result)
}

/// One pass over `set`, updating weights after every example.
/// Returns the mean squared error accumulated during the pass.
pub fn train_iteration(
    network: &mut Network,
    set: &TrainingExampleSet,
    learning_rate: f64,
) -> Result<f64> {
    check_compatible(network, set)?;
    Ok(run_iteration(network, set, learning_rate))
}

/// Mean squared error of `network` over `set`, without touching any weight.
pub fn mean_squared_error(network: &Network, set: &TrainingExampleSet) -> Result<f64> {
    check_compatible(network, set)?;
    let total: f64 = set
        .iter()
        .map(|example| {
            let (_, output) = network.trace(&example.input);
            MseLoss::loss(&output, &example.output)
        })
        .sum();
    Ok(total / set.len() as f64)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Every example must fit the network: input length = input size, output
/// length = output size.
pub(crate) fn check_compatible(network: &Network, set: &TrainingExampleSet) -> Result<()> {
    if set.is_empty() {
        return Err(DetectorError::EmptyTrainingSet);
    }
    if set.input_size() != network.input_size() {
        return Err(DetectorError::dimension(network.input_size(), set.input_size()));
    }
    if let Some(bad) = set.iter().find(|e| e.input.len() != network.input_size()) {
        return Err(DetectorError::dimension(network.input_size(), bad.input.len()));
    }
    if let Some(bad) = set.iter().find(|e| e.output.len() != network.output_size()) {
        return Err(DetectorError::dimension(network.output_size(), bad.output.len()));
    }
    Ok(())
}

fn run_iteration(network: &mut Network, set: &TrainingExampleSet, rate: f64) -> f64 {
    let mut total_error = 0.0;

    for example in set {
        // Forward pass
        let (hidden, output) = network.trace(&example.input);
        total_error += MseLoss::loss(&output, &example.output);

        // δ at the output layer from (expected - actual)
        let error = MseLoss::error(&output, &example.output);
        let output_deltas = network.output.deltas(&error, &output);

        // Propagate through the output weights before they change
        let hidden_error = network.output.backpropagate(&output_deltas);
        let hidden_deltas = network.hidden.deltas(&hidden_error, &hidden);

        network.output.apply_deltas(&output_deltas, &hidden, rate);
        network.hidden.apply_deltas(&hidden_deltas, &example.input, rate);
    }

    total_error / set.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{atomic::AtomicBool, mpsc, Arc};

    use rand::{rngs::StdRng, SeedableRng};

    use crate::data::example_set::TrainingExample;

    fn set_of(pairs: &[([f64; 4], f64)]) -> TrainingExampleSet {
        let mut set = TrainingExampleSet::new(pairs[0].0.len());
        for (input, output) in pairs {
            set.push(TrainingExample::new(input.to_vec(), vec![*output])).unwrap();
        }
        set
    }

    fn four_examples() -> TrainingExampleSet {
        set_of(&[
            ([1.0, 1.0, 0.0, 0.0], 1.0),
            ([0.0, 0.0, 1.0, 1.0], 0.0),
            ([1.0, 1.0, 1.0, 0.0], 1.0),
            ([0.0, 0.0, 0.0, 1.0], 0.0),
        ])
    }

    #[test]
    fn error_never_grows_between_iterations() {
        let set = four_examples();

        for rate in [0.01, 0.1, 0.3] {
            let mut rng = StdRng::seed_from_u64(21);
            let mut net = Network::perceptron(4, 15, 1, &mut rng).unwrap();
            let mut previous = mean_squared_error(&net, &set).unwrap();

            for _ in 0..300 {
                train_iteration(&mut net, &set, rate).unwrap();
                let current = mean_squared_error(&net, &set).unwrap();
                assert!(
                    current <= previous + 1e-4,
                    "rate {rate}: error rose from {previous} to {current}"
                );
                previous = current;
            }
        }
    }

    #[test]
    fn stops_at_iteration_limit() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut net = Network::perceptron(4, 15, 1, &mut rng).unwrap();
        let config = TrainConfig::new(0.2, 1e-12).with_max_iterations(25);

        let result = train(&mut net, &four_examples(), &config).unwrap();
        assert_eq!(result.iterations, 25);
        assert_eq!(result.stop_reason, StopReason::IterationLimit);
        assert!(result.error.is_finite());
    }

    #[test]
    fn zero_iterations_reports_current_error() {
        let mut rng = StdRng::seed_from_u64(23);
        let mut net = Network::perceptron(4, 15, 1, &mut rng).unwrap();
        let before = net.clone();
        let set = four_examples();
        let config = TrainConfig::new(0.2, 1e-12).with_max_iterations(0);

        let result = train(&mut net, &set, &config).unwrap();
        assert_eq!(result.iterations, 0);
        assert_eq!(net, before);
        assert_eq!(result.error, mean_squared_error(&before, &set).unwrap());
    }

    #[test]
    fn raised_stop_flag_cancels_before_first_iteration() {
        let mut rng = StdRng::seed_from_u64(24);
        let mut net = Network::perceptron(4, 15, 1, &mut rng).unwrap();
        let mut config = TrainConfig::new(0.2, 1e-12);
        config.stop_flag = Some(Arc::new(AtomicBool::new(true)));

        let result = train(&mut net, &four_examples(), &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::Cancelled);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn progress_is_reported_per_iteration() {
        let mut rng = StdRng::seed_from_u64(25);
        let mut net = Network::perceptron(4, 15, 1, &mut rng).unwrap();
        let (tx, rx) = mpsc::channel();
        let mut config = TrainConfig::new(0.2, 1e-12).with_max_iterations(5);
        config.progress_tx = Some(tx);

        train(&mut net, &four_examples(), &config).unwrap();
        drop(config);

        let stats: Vec<IterationStats> = rx.iter().collect();
        assert_eq!(stats.len(), 5);
        assert_eq!(stats[4].iteration, 5);
        assert_eq!(stats[0].max_iterations, Some(5));
    }

    #[test]
    fn dropped_progress_receiver_cancels() {
        let mut rng = StdRng::seed_from_u64(26);
        let mut net = Network::perceptron(4, 15, 1, &mut rng).unwrap();
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut config = TrainConfig::new(0.2, 1e-12).with_max_iterations(100);
        config.progress_tx = Some(tx);

        let result = train(&mut net, &four_examples(), &config).unwrap();
        assert_eq!(result.stop_reason, StopReason::Cancelled);
        assert_eq!(result.iterations, 1);
    }

    #[test]
    fn incompatible_sets_are_rejected() {
        let mut rng = StdRng::seed_from_u64(27);
        let mut net = Network::perceptron(3, 4, 1, &mut rng).unwrap();
        let config = TrainConfig::new(0.2, 1e-3);

        assert!(matches!(
            train(&mut net, &four_examples(), &config),
            Err(DetectorError::Dimension { expected: 3, got: 4 })
        ));
        assert!(matches!(
            train(&mut net, &TrainingExampleSet::new(3), &config),
            Err(DetectorError::EmptyTrainingSet)
        ));

        let mut set = TrainingExampleSet::new(3);
        set.push(TrainingExample::new(vec![0.0; 3], vec![0.0, 1.0])).unwrap();
        assert!(matches!(
            train(&mut net, &set, &config),
            Err(DetectorError::Dimension { expected: 1, got: 2 })
        ));
    }

    #[test]
    fn set_from_json_with_short_inputs_never_reaches_the_network() {
        let mut rng = StdRng::seed_from_u64(28);
        let mut net = Network::perceptron(4, 3, 1, &mut rng).unwrap();
        let json = r#"{"input_size":4,"examples":[{"input":[1.0,1.0],"output":[1.0]}]}"#;
        assert!(serde_json::from_str::<TrainingExampleSet>(json).is_err());

        let json = r#"{"input_size":4,"examples":[{"input":[1.0,1.0,0.0,0.0],"output":[1.0]}]}"#;
        let set: TrainingExampleSet = serde_json::from_str(json).unwrap();
        let result = train(&mut net, &set, &TrainConfig::new(0.2, 1e-3).with_max_iterations(2));
        assert_eq!(result.unwrap().iterations, 2);
    }
}
