//! Pipeline Module
//! Runs load -> clean -> split -> fit -> score and collects a report.

use crate::data::{CleanOptions, DataLoader, DataProcessor};
use crate::model::{
    train_test_split, Dataset, KnnClassifier, DEFAULT_NEIGHBORS, DEFAULT_SEED, DEFAULT_TEST_SIZE,
};
use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Classifier settings.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOptions {
    pub label_column: String,
    pub neighbors: usize,
    pub test_size: f64,
    pub seed: u64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            label_column: "class".to_string(),
            neighbors: DEFAULT_NEIGHBORS,
            test_size: DEFAULT_TEST_SIZE,
            seed: DEFAULT_SEED,
        }
    }
}

/// Summary of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: Vec<String>,
    pub markers_replaced: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub neighbors: usize,
    pub accuracy: f64,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset:   {}", self.path.display())?;
        writeln!(f, "Rows:      {}", self.rows)?;
        writeln!(f, "Columns:   {}", self.columns.join(", "))?;
        writeln!(f, "Replaced:  {} missing-value markers", self.markers_replaced)?;
        writeln!(f, "Split:     {} train / {} test", self.train_rows, self.test_rows)?;
        write!(f, "Accuracy:  {:.4} (k={})", self.accuracy, self.neighbors)
    }
}

/// Load and clean a dataset, returning the table and the number of markers replaced.
pub fn load_and_clean(path: &Path, options: &CleanOptions) -> Result<(DataFrame, usize)> {
    let mut loader = DataLoader::new();
    loader
        .load_csv(path)
        .with_context(|| format!("loading {}", path.display()))?;
    debug!(
        path = ?loader.get_file_path(),
        rows = loader.get_row_count(),
        columns = ?loader.get_columns(),
        "raw dataset"
    );
    let raw = loader.take_dataframe()?;

    let replaced = DataProcessor::count_marker(&raw, &options.marker);
    info!(replaced, marker = %options.marker, "counted missing-value markers");
    let cleaned = DataProcessor::clean(&raw, options).context("cleaning dataset")?;
    Ok((cleaned, replaced))
}

/// Fit a k-NN classifier on a seeded train split and score it on the rest.
pub fn run(path: &Path, clean: &CleanOptions, train: &TrainOptions) -> Result<RunReport> {
    let (df, markers_replaced) = load_and_clean(path, clean)?;
    let columns = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let dataset = Dataset::from_frame(&df, &train.label_column)
        .context("extracting features and labels")?;
    let split = train_test_split(dataset.n_samples(), train.test_size, train.seed)?;
    let train_set = dataset.subset(&split.train_indices);
    let test_set = dataset.subset(&split.test_indices);

    let mut knn = KnnClassifier::new(train.neighbors);
    knn.fit(&train_set.features, &train_set.labels)?;
    let accuracy = knn.score(&test_set.features, &test_set.labels)?;

    info!(
        features = dataset.n_features(),
        train = train_set.n_samples(),
        test = test_set.n_samples(),
        k = knn.k(),
        accuracy,
        "scored classifier"
    );

    Ok(RunReport {
        path: path.to_path_buf(),
        rows: dataset.n_samples(),
        columns,
        markers_replaced,
        train_rows: train_set.n_samples(),
        test_rows: test_set.n_samples(),
        neighbors: knn.k(),
        accuracy,
    })
}
