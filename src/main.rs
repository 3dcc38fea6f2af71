//! Classification - tabular dataset cleaning and k-NN classification
//!
//! Loads a comma-delimited dataset, substitutes a sentinel for missing-value
//! markers, drops identifier columns and scores a nearest-neighbours
//! classifier on a held-out split.

mod data;
mod model;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use data::{CleanOptions, DEFAULT_MARKER, DEFAULT_SENTINEL};
use model::{DEFAULT_NEIGHBORS, DEFAULT_SEED, DEFAULT_TEST_SIZE};
use pipeline::TrainOptions;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Clean a tabular dataset and score a k-NN classifier on it
#[derive(Parser, Debug)]
#[command(name = "classification")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Comma-delimited input file with a header row
    #[arg(default_value = "breast-cancer-wisconsin.data.txt")]
    path: PathBuf,

    /// Token marking a missing value
    #[arg(long, default_value = DEFAULT_MARKER)]
    marker: String,

    /// Number substituted for missing values
    #[arg(long, default_value_t = DEFAULT_SENTINEL, allow_hyphen_values = true)]
    sentinel: i64,

    /// Column to drop before training (repeatable)
    #[arg(long = "drop", default_value = "id")]
    drop: Vec<String>,

    /// Column holding the class label
    #[arg(long, default_value = "class")]
    label: String,

    /// Number of neighbours consulted per prediction
    #[arg(short = 'k', long, default_value_t = DEFAULT_NEIGHBORS)]
    neighbors: usize,

    /// Fraction of rows held out for scoring
    #[arg(long, default_value_t = DEFAULT_TEST_SIZE)]
    test_size: f64,

    /// Seed for the train/test shuffle
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Stop after cleaning and print the table
    #[arg(long)]
    clean_only: bool,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn clean_options(&self) -> CleanOptions {
        CleanOptions {
            marker: self.marker.clone(),
            sentinel: self.sentinel,
            drop_columns: self.drop.clone(),
        }
    }

    fn train_options(&self) -> TrainOptions {
        TrainOptions {
            label_column: self.label.clone(),
            neighbors: self.neighbors,
            test_size: self.test_size,
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    if cli.clean_only {
        let (df, _) = pipeline::load_and_clean(&cli.path, &cli.clean_options())?;
        println!("{df}");
        return Ok(());
    }

    let report = pipeline::run(&cli.path, &cli.clean_options(), &cli.train_options())?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_match_library_defaults() {
        let cli = Cli::try_parse_from(["classification"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("breast-cancer-wisconsin.data.txt"));
        assert_eq!(cli.clean_options(), CleanOptions::default());
        assert_eq!(cli.train_options(), TrainOptions::default());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "classification",
            "data.csv",
            "--sentinel",
            "-1",
            "--drop",
            "id",
            "--drop",
            "name",
            "-k",
            "3",
            "--json",
        ])
        .unwrap();

        let clean = cli.clean_options();
        assert_eq!(clean.sentinel, -1);
        assert_eq!(clean.drop_columns, vec!["id", "name"]);
        assert_eq!(cli.train_options().neighbors, 3);
        assert!(cli.json);
    }
}
