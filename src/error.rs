use thiserror::Error;

/// The crate's result type.
pub type Result<T> = std::result::Result<T, DetectorError>;

/// Everything that can go wrong while building, training or querying a detector.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("input has {got} values but the network expects {expected}")]
    Dimension { expected: usize, got: usize },

    #[error("no network registered under tag {0:?}")]
    UnknownTag(String),

    #[error("malformed network snapshot: {0}")]
    SnapshotFormat(String),

    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("invalid network topology: {0}")]
    InvalidTopology(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot train on an empty example set")]
    EmptyTrainingSet,

    #[error("training thread panicked before reporting a result")]
    TrainingPanicked,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DetectorError {
    pub(crate) fn dimension(expected: usize, got: usize) -> Self {
        DetectorError::Dimension { expected, got }
    }
}
