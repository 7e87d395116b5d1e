use std::path::Path;

use rand::thread_rng;

use letter_detector::{
    letter_training_set, train, DetectorConfig, Hyperparams, Letter, ModelMetadata,
    ModelRegistry, Network, TrainConfig,
};

const MODEL_DIR: &str = "models";

/// Trains one detector per letter and writes `<tag>.json` snapshots.
fn train_missing(dir: &Path, config: &DetectorConfig) -> letter_detector::Result<()> {
    std::fs::create_dir_all(dir)?;
    let mut rng = thread_rng();

    for letter in Letter::ALL {
        let path = dir.join(format!("{letter}.json"));
        if path.exists() {
            continue;
        }
        let set = letter_training_set(letter, config.negatives, &mut rng)?;
        let mut network = Network::perceptron(config.input_size(), config.hidden_size, 1, &mut rng)?
            .with_metadata(ModelMetadata::for_target(letter.tag(), config.grid_width));
        train(&mut network, &set, &TrainConfig::from(&config.hyperparams))?;
        network.save_json(&path)?;
    }
    Ok(())
}

fn main() -> letter_detector::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DetectorConfig {
        negatives: 1000,
        hyperparams: Hyperparams { max_iterations: Some(500), ..Hyperparams::default() },
        ..DetectorConfig::default()
    };
    let dir = Path::new(MODEL_DIR);
    train_missing(dir, &config)?;

    let registry = ModelRegistry::load_dir(dir)?;
    let grid = &Letter::B.exemplars()?[1];
    println!("{}", grid.to_pretty_json()?);

    // Switching detectors is only a lookup.
    for tag in registry.tags() {
        println!("Detector {tag}: {}", registry.classify(tag, grid)?);
    }
    Ok(())
}
