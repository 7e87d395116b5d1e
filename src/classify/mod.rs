pub mod classifier;
pub mod verdict;

pub use classifier::{classify, classify_input, Classification};
pub use verdict::{Severity, Verdict, MATCH_THRESHOLD, PARTIAL_MATCH_THRESHOLD};
