//! CSV Data Loader Module
//! Handles delimited text loading and column inspection using Polars.

use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseFailure,
    },
    #[error("No data loaded")]
    NoData,
}

/// Underlying cause of a [`LoaderError::Parse`].
#[derive(Error, Debug)]
pub enum ParseFailure {
    #[error("{0}")]
    Record(#[from] csv::Error),
    #[error("{0}")]
    Polars(#[from] PolarsError),
}

/// Loads a header-prefixed, comma-delimited file into a DataFrame.
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Load a CSV file using Polars.
    ///
    /// Column types are inferred from a full scan of the file, so a column
    /// holding any non-numeric token (such as a `?` marker) stays text.
    /// Every row must carry exactly as many fields as the header.
    pub fn load_csv(&mut self, file_path: impl AsRef<Path>) -> Result<&DataFrame, LoaderError> {
        let path = file_path.as_ref();
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }
        self.file_path = Some(path.to_path_buf());

        let parse_err = |source: PolarsError| LoaderError::Parse {
            path: path.to_path_buf(),
            source: source.into(),
        };

        let records = Self::read_records(path)?;
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .into_reader_with_file_handle(Cursor::new(records))
            .finish()
            .map_err(parse_err)?;

        info!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "loaded dataset"
        );
        debug!(schema = ?df.schema(), "inferred schema");

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    // Polars pads short rows with nulls and reads blank lines as null rows.
    // The csv reader rejects the former and skips the latter; its records are
    // re-encoded so polars only ever sees header-conforming data rows.
    fn read_records(path: &Path) -> Result<Vec<u8>, LoaderError> {
        let parse_err = |source: csv::Error| LoaderError::Parse {
            path: path.to_path_buf(),
            source: source.into(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_path(path)
            .map_err(parse_err)?;
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(reader.headers().map_err(parse_err)?)
            .map_err(parse_err)?;
        for record in reader.records() {
            writer
                .write_record(&record.map_err(parse_err)?)
                .map_err(parse_err)?;
        }
        writer
            .into_inner()
            .map_err(|e| parse_err(e.into_error().into()))
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Hand the loaded DataFrame over to the caller.
    pub fn take_dataframe(&mut self) -> Result<DataFrame, LoaderError> {
        self.df.take().ok_or(LoaderError::NoData)
    }
}
