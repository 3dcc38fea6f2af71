//! Feature matrix / label vector extraction from a cleaned table.

use super::ModelError;
use polars::prelude::*;

/// Row-major numeric features with one integer class label per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub feature_names: Vec<String>,
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<i64>,
}

impl Dataset {
    /// Split a cleaned DataFrame into features and labels.
    ///
    /// Every column except `label_column` becomes a feature and must cast
    /// to Float64 without nulls. Labels must be whole numbers.
    pub fn from_frame(df: &DataFrame, label_column: &str) -> Result<Self, ModelError> {
        let label = df
            .column(label_column)
            .map_err(|_| ModelError::ColumnNotFound(label_column.to_string()))?;

        let labels = Self::numeric_values(label)?
            .into_iter()
            .map(|v| {
                if v.fract() == 0.0 {
                    Ok(v as i64)
                } else {
                    Err(ModelError::NonNumeric(label_column.to_string()))
                }
            })
            .collect::<Result<Vec<i64>, ModelError>>()?;

        let mut feature_names = Vec::with_capacity(df.width().saturating_sub(1));
        let mut features = vec![Vec::with_capacity(df.width()); df.height()];

        for column in df.get_columns() {
            if column.name().as_str() == label_column {
                continue;
            }
            let values = Self::numeric_values(column)?;
            for (row, value) in features.iter_mut().zip(values) {
                row.push(value);
            }
            feature_names.push(column.name().to_string());
        }

        Ok(Self {
            feature_names,
            features,
            labels,
        })
    }

    fn numeric_values(column: &Column) -> Result<Vec<f64>, ModelError> {
        let name = column.name().to_string();
        let cast = column
            .cast(&DataType::Float64)
            .map_err(|_| ModelError::NonNumeric(name.clone()))?;

        cast.f64()?
            .into_iter()
            .map(|v| v.ok_or_else(|| ModelError::NonNumeric(name.clone())))
            .collect()
    }

    pub fn n_samples(&self) -> usize {
        self.labels.len()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Rows at `indices`, in the given order.
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            feature_names: self.feature_names.clone(),
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_frame_splits_label() {
        let df = df![
            "thickness" => [5i64, 3, 8],
            "nuclei" => [1i64, -99999, 10],
            "class" => [2i64, 2, 4],
        ]
        .unwrap();

        let ds = Dataset::from_frame(&df, "class").unwrap();
        assert_eq!(ds.feature_names, vec!["thickness", "nuclei"]);
        assert_eq!(ds.features[1], vec![3.0, -99999.0]);
        assert_eq!(ds.labels, vec![2, 2, 4]);
        assert_eq!(ds.n_samples(), 3);
        assert_eq!(ds.n_features(), 2);
    }

    #[test]
    fn test_from_frame_missing_label() {
        let df = df!["a" => [1i64]].unwrap();
        let err = Dataset::from_frame(&df, "class").unwrap_err();
        assert!(matches!(err, ModelError::ColumnNotFound(name) if name == "class"));
    }

    #[test]
    fn test_from_frame_rejects_text_features() {
        let df = df!["sex" => ["-99999", "M"], "class" => [0i64, 1]].unwrap();
        let err = Dataset::from_frame(&df, "class").unwrap_err();
        assert!(matches!(err, ModelError::NonNumeric(name) if name == "sex"));
    }

    #[test]
    fn test_subset_keeps_order() {
        let df = df!["x" => [0.0f64, 1.0, 2.0], "y" => [0i64, 1, 0]].unwrap();
        let ds = Dataset::from_frame(&df, "y").unwrap();

        let sub = ds.subset(&[2, 0]);
        assert_eq!(sub.features, vec![vec![2.0], vec![0.0]]);
        assert_eq!(sub.labels, vec![0, 0]);
    }
}
