use std::sync::{mpsc, Arc};

use rand::{rngs::StdRng, SeedableRng};

use letter_detector::{
    classify, BackgroundTrainer, Grid, Network, StopReason, TrainConfig, TrainingExample,
    TrainingExampleSet,
};

/// The same input labeled both ways: the error can never reach the tolerance,
/// so a run only ends when it is cancelled.
fn contradictory_set() -> TrainingExampleSet {
    let mut set = TrainingExampleSet::new(4);
    set.push(TrainingExample::new(vec![1.0, 0.0, 1.0, 0.0], vec![1.0])).unwrap();
    set.push(TrainingExample::new(vec![1.0, 0.0, 1.0, 0.0], vec![0.0])).unwrap();
    set
}

#[test]
fn second_start_is_a_no_op_and_cancel_publishes() {
    let mut rng = StdRng::seed_from_u64(5);
    let initial = Network::perceptron(4, 15, 1, &mut rng).unwrap();
    let trainer = BackgroundTrainer::new(initial.clone());
    let set = Arc::new(contradictory_set());

    let (tx, rx) = mpsc::channel();
    let mut config = TrainConfig::new(0.2, 1e-9);
    config.progress_tx = Some(tx);

    let handle = trainer.start(Arc::clone(&set), config).unwrap().expect("first start runs");
    let first = rx.recv().unwrap();
    assert_eq!(first.iteration, 1);
    assert!(trainer.is_training());

    // Ignored while the first job runs.
    assert!(trainer.start(Arc::clone(&set), TrainConfig::new(0.2, 1e-9)).unwrap().is_none());

    // Classification keeps working off the published (untrained) version.
    let grid = Grid::from_pattern(&["#.", "#."]).unwrap();
    let during = classify(&grid, &trainer.network()).unwrap();
    assert_eq!(during.score, initial.activate(&grid.input_vector()).unwrap());

    handle.cancel();
    let result = handle.wait().unwrap();
    assert_eq!(result.stop_reason, StopReason::Cancelled);
    assert!(result.iterations >= 1);
    assert!(!trainer.is_training());
    assert_ne!(*trainer.network(), initial);

    // The guard is released, so a new job may start.
    let again = TrainConfig::new(0.2, 1e-9).with_max_iterations(3);
    let result = trainer.start(set, again).unwrap().unwrap().wait().unwrap();
    assert_eq!(result.iterations, 3);
}

#[test]
fn try_result_reports_completion_once() {
    let mut rng = StdRng::seed_from_u64(6);
    let trainer = BackgroundTrainer::new(Network::perceptron(4, 15, 1, &mut rng).unwrap());
    let config = TrainConfig::new(0.2, 1e-9).with_max_iterations(10);
    let mut handle = trainer.start(Arc::new(contradictory_set()), config).unwrap().unwrap();

    let result = loop {
        if let Some(result) = handle.try_result() {
            break result.unwrap();
        }
        std::thread::yield_now();
    };
    assert_eq!(result.iterations, 10);
    assert!(handle.is_finished());
    assert!(handle.try_result().is_none());
}
