pub mod example_set;
pub mod letters;

pub use example_set::{TrainingExample, TrainingExampleSet};
pub use letters::{letter_training_set, Letter, LETTER_HEIGHT, LETTER_WIDTH};
