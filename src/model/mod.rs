//! Model module - feature extraction, train/test splitting and k-NN classification

mod dataset;
mod knn;
mod split;

pub use dataset::Dataset;
pub use knn::{KnnClassifier, DEFAULT_NEIGHBORS};
pub use split::{train_test_split, DEFAULT_SEED, DEFAULT_TEST_SIZE};

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
    #[error("Column {0} contains values that are not numeric")]
    NonNumeric(String),
    #[error("Model has not been fitted")]
    NotFitted,
    #[error("Shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("Invalid neighbour count {k} for {samples} training samples")]
    InvalidK { k: usize, samples: usize },
    #[error("Test size must lie strictly between 0 and 1, got {0}")]
    InvalidTestSize(f64),
    #[error("At least 2 samples are required to split, got {0}")]
    TooFewSamples(usize),
}
