//! Data Processor Module
//! Handles cleaning of a loaded table before it is handed to a classifier.

use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

/// Token used in the raw data files for an unrecorded value.
pub const DEFAULT_MARKER: &str = "?";

/// Numeric placeholder substituted for missing values.
pub const DEFAULT_SENTINEL: i64 = -99999;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

/// Cleaning settings applied by [`DataProcessor::clean`].
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOptions {
    pub marker: String,
    pub sentinel: i64,
    pub drop_columns: Vec<String>,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            sentinel: DEFAULT_SENTINEL,
            drop_columns: vec!["id".to_string()],
        }
    }
}

/// Handles data cleaning operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Replace every cell equal to `marker` with `sentinel`.
    ///
    /// Only text columns can hold the marker. After substitution a text
    /// column is narrowed to Int64 (or Float64) when every value parses;
    /// otherwise it stays text and carries the sentinel as its decimal form.
    pub fn replace_marker(
        df: &DataFrame,
        marker: &str,
        sentinel: i64,
    ) -> Result<DataFrame, ProcessorError> {
        let sentinel_text = sentinel.to_string();

        let columns = df
            .get_columns()
            .iter()
            .map(|column| -> Result<Column, ProcessorError> {
                if !matches!(column.dtype(), DataType::String) {
                    return Ok(column.clone());
                }

                let ca = column.str()?;
                if !ca.into_iter().any(|v| v == Some(marker)) {
                    return Ok(column.clone());
                }

                let replaced: StringChunked = ca
                    .into_iter()
                    .map(|v| v.map(|s| if s == marker { sentinel_text.as_str() } else { s }))
                    .collect();
                let series = replaced.with_name(column.name().clone()).into_series();
                let series = Self::narrow_numeric(series);
                debug!(column = %column.name(), dtype = %series.dtype(), "replaced marker");

                Ok(Column::from(series))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DataFrame::new(columns)?)
    }

    /// Count cells equal to `marker`.
    pub fn count_marker(df: &DataFrame, marker: &str) -> usize {
        df.get_columns()
            .iter()
            .filter_map(|column| column.str().ok())
            .map(|ca| ca.into_iter().filter(|v| *v == Some(marker)).count())
            .sum()
    }

    /// Remove one column, keeping row count and the order of the others.
    pub fn drop_column(df: &DataFrame, column_name: &str) -> Result<DataFrame, ProcessorError> {
        if df.get_column_index(column_name).is_none() {
            return Err(ProcessorError::ColumnNotFound(column_name.to_string()));
        }
        Ok(df.drop(column_name)?)
    }

    /// Replace the marker, then drop every configured column.
    pub fn clean(df: &DataFrame, options: &CleanOptions) -> Result<DataFrame, ProcessorError> {
        let mut cleaned = Self::replace_marker(df, &options.marker, options.sentinel)?;
        for name in &options.drop_columns {
            cleaned = Self::drop_column(&cleaned, name)?;
        }

        info!(
            dropped = ?options.drop_columns,
            rows = cleaned.height(),
            columns = cleaned.width(),
            "cleaned dataset"
        );
        Ok(cleaned)
    }

    fn narrow_numeric(series: Series) -> Series {
        if let Ok(ints) = series.strict_cast(&DataType::Int64) {
            return ints;
        }
        match series.strict_cast(&DataType::Float64) {
            Ok(floats) => floats,
            Err(_) => series,
        }
    }
}
