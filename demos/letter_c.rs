use std::sync::{mpsc, Arc};

use rand::thread_rng;

use letter_detector::{
    classify, letter_training_set, BackgroundTrainer, DetectorConfig, Hyperparams, Letter,
    ModelMetadata, Network, TrainConfig,
};

fn main() -> letter_detector::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DetectorConfig {
        negatives: 2000,
        hyperparams: Hyperparams { max_iterations: Some(2000), ..Hyperparams::default() },
        ..DetectorConfig::default()
    };
    config.validate()?;

    let mut rng = thread_rng();
    let set = letter_training_set(Letter::C, config.negatives, &mut rng)?;
    let network = Network::perceptron(config.input_size(), config.hidden_size, 1, &mut rng)?
        .with_metadata(ModelMetadata::for_target(Letter::C.tag(), config.grid_width));

    let trainer = BackgroundTrainer::new(network);
    let (tx, rx) = mpsc::channel();
    let mut train_config = TrainConfig::from(&config.hyperparams);
    train_config.progress_tx = Some(tx);

    let Some(handle) = trainer.start(Arc::new(set), train_config)? else {
        return Ok(());
    };

    let sample = &Letter::C.exemplars()?[0];
    for stats in rx {
        if stats.iteration % 200 == 0 {
            // Still scoring with the weights published before this run started.
            let live = classify(sample, &trainer.network())?;
            println!("Iteration {}: error = {:.6}, C1 currently {}", stats.iteration, stats.error, live);
        }
    }

    let result = handle.wait()?;
    println!("Stopped ({:?}) after {} iterations, error = {:.9}", result.stop_reason, result.iterations, result.error);

    let network = trainer.network();
    for letter in Letter::ALL {
        for (i, grid) in letter.exemplars()?.iter().enumerate() {
            println!("{letter}{} -> {}", i + 1, classify(grid, &network)?);
        }
    }

    std::fs::create_dir_all("models")?;
    network.save_json("models/C.json")?;
    println!("Saved to models/C.json");
    Ok(())
}
