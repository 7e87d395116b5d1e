pub mod background;
pub mod iteration_stats;
pub mod train_config;
pub mod trainer;

pub use background::{BackgroundTrainer, TrainingHandle};
pub use iteration_stats::IterationStats;
pub use train_config::TrainConfig;
pub use trainer::{mean_squared_error, train, train_iteration, StopReason, TrainedResult};
