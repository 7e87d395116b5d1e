use std::fs;

use rand::{rngs::StdRng, SeedableRng};

use letter_detector::{DetectorError, Grid, Letter, ModelMetadata, ModelRegistry, Network};

#[test]
fn loads_every_snapshot_in_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut rng = StdRng::seed_from_u64(17);

    let mut saved = Vec::new();
    for letter in Letter::ALL {
        let network = Network::perceptron(35, 15, 1, &mut rng)
            .unwrap()
            .with_metadata(ModelMetadata::for_target(letter.tag(), 5));
        network.save_json(dir.path().join(format!("{letter}.json"))).unwrap();
        saved.push((letter, network));
    }
    fs::write(dir.path().join("README.txt"), "not a network").unwrap();

    let registry = ModelRegistry::load_dir(dir.path()).unwrap();
    assert_eq!(registry.tags().collect::<Vec<_>>(), vec!["A", "B", "C"]);

    let grid = &Letter::B.exemplars().unwrap()[0];
    for (letter, network) in &saved {
        let loaded = registry.get(letter.tag()).unwrap();
        assert_eq!(loaded.metadata(), network.metadata());

        let expected = network.activate(&grid.input_vector()).unwrap();
        let got = registry.classify(letter.tag(), grid).unwrap().score;
        assert!((expected - got).abs() <= 1e-9);
    }
}

#[test]
fn malformed_snapshot_aborts_loading() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("A.json"), r#"{"sizes": {"input": 2}}"#).unwrap();

    assert!(matches!(
        ModelRegistry::load_dir(dir.path()),
        Err(DetectorError::SnapshotFormat(_))
    ));
}

#[test]
fn unknown_tag_is_never_substituted() {
    let mut rng = StdRng::seed_from_u64(18);
    let mut registry = ModelRegistry::new();
    registry.register("A", Network::perceptron(4, 2, 1, &mut rng).unwrap());

    let grid = Grid::blank(2, 2).unwrap();
    assert!(registry.classify("A", &grid).is_ok());
    assert!(matches!(
        registry.classify("Z", &grid),
        Err(DetectorError::UnknownTag(_))
    ));
    assert!(ModelRegistry::load_dir(tempfile::tempdir().unwrap().path()).unwrap().is_empty());
}
