//! K-Nearest Neighbors classifier
//!
//! Classifies each sample by majority vote among the k closest training
//! rows under Euclidean distance.

use super::ModelError;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

pub const DEFAULT_NEIGHBORS: usize = 5;

/// KNN Classifier
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    k: usize,
    x_train: Option<Vec<Vec<f64>>>,
    y_train: Option<Vec<i64>>,
}

impl Default for KnnClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_NEIGHBORS)
    }
}

impl KnnClassifier {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            x_train: None,
            y_train: None,
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Memorise the training rows.
    pub fn fit(&mut self, x: &[Vec<f64>], y: &[i64]) -> Result<(), ModelError> {
        if x.len() != y.len() {
            return Err(ModelError::ShapeMismatch {
                expected: x.len(),
                found: y.len(),
            });
        }
        if self.k == 0 || self.k > x.len() {
            return Err(ModelError::InvalidK {
                k: self.k,
                samples: x.len(),
            });
        }
        let width = x.first().map_or(0, Vec::len);
        Self::check_width(x, width)?;

        debug!(samples = x.len(), features = width, k = self.k, "fitted knn");
        self.x_train = Some(x.to_vec());
        self.y_train = Some(y.to_vec());
        Ok(())
    }

    /// Predict a class label for every row of `x`.
    pub fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<i64>, ModelError> {
        let (Some(x_train), Some(y_train)) = (&self.x_train, &self.y_train) else {
            return Err(ModelError::NotFitted);
        };
        let width = x_train.first().map_or(0, Vec::len);
        Self::check_width(x, width)?;

        Ok(x
            .par_iter()
            .map(|sample| self.vote(sample, x_train, y_train))
            .collect())
    }

    /// Fraction of rows in `x` whose prediction equals `y`.
    pub fn score(&self, x: &[Vec<f64>], y: &[i64]) -> Result<f64, ModelError> {
        if x.len() != y.len() {
            return Err(ModelError::ShapeMismatch {
                expected: x.len(),
                found: y.len(),
            });
        }
        let predictions = self.predict(x)?;
        if predictions.is_empty() {
            return Ok(0.0);
        }

        let correct = predictions.iter().zip(y).filter(|(p, t)| p == t).count();
        Ok(correct as f64 / predictions.len() as f64)
    }

    fn check_width(x: &[Vec<f64>], width: usize) -> Result<(), ModelError> {
        match x.iter().find(|row| row.len() != width) {
            Some(row) => Err(ModelError::ShapeMismatch {
                expected: width,
                found: row.len(),
            }),
            None => Ok(()),
        }
    }

    // Ties go to the smaller summed distance, then the smaller label.
    fn vote(&self, sample: &[f64], x_train: &[Vec<f64>], y_train: &[i64]) -> i64 {
        let mut distances: Vec<(f64, usize)> = x_train
            .iter()
            .enumerate()
            .map(|(i, row)| (euclidean(sample, row), i))
            .collect();
        distances.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let mut votes: HashMap<i64, (usize, f64)> = HashMap::new();
        for &(dist, idx) in distances.iter().take(self.k) {
            let entry = votes.entry(y_train[idx]).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += dist;
        }

        votes
            .into_iter()
            .min_by(|(la, (ca, da)), (lb, (cb, db))| {
                cb.cmp(ca)
                    .then(da.partial_cmp(db).unwrap_or(Ordering::Equal))
                    .then(la.cmp(lb))
            })
            .map(|(label, _)| label)
            .unwrap_or_default()
    }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clusters() -> (Vec<Vec<f64>>, Vec<i64>) {
        let x = vec![
            vec![1.0, 1.0],
            vec![1.0, 2.0],
            vec![2.0, 1.0],
            vec![5.0, 5.0],
            vec![5.0, 6.0],
            vec![6.0, 5.0],
        ];
        let y = vec![2, 2, 2, 4, 4, 4];
        (x, y)
    }

    #[test]
    fn test_knn_classifier() {
        let (x, y) = clusters();
        let mut knn = KnnClassifier::new(3);
        knn.fit(&x, &y).unwrap();

        let predictions = knn.predict(&[vec![1.5, 1.5], vec![5.5, 5.5]]).unwrap();
        assert_eq!(predictions, vec![2, 4]);
        assert_eq!(knn.score(&x, &y).unwrap(), 1.0);
    }

    #[test]
    fn test_tie_prefers_closer_class() {
        let x = vec![vec![0.0], vec![3.0]];
        let y = vec![7, 1];
        let mut knn = KnnClassifier::new(2);
        knn.fit(&x, &y).unwrap();

        assert_eq!(knn.predict(&[vec![1.0]]).unwrap(), vec![7]);
        // Equidistant: smaller label wins.
        assert_eq!(knn.predict(&[vec![1.5]]).unwrap(), vec![1]);
    }

    #[test]
    fn test_predict_before_fit() {
        let knn = KnnClassifier::default();
        assert!(matches!(knn.predict(&[vec![0.0]]), Err(ModelError::NotFitted)));
    }

    #[test]
    fn test_fit_rejects_bad_shapes() {
        let (x, y) = clusters();

        let err = KnnClassifier::new(3).fit(&x, &y[..4]).unwrap_err();
        assert!(matches!(err, ModelError::ShapeMismatch { expected: 6, found: 4 }));

        let err = KnnClassifier::new(10).fit(&x, &y).unwrap_err();
        assert!(matches!(err, ModelError::InvalidK { k: 10, samples: 6 }));

        let err = KnnClassifier::new(0).fit(&x, &y).unwrap_err();
        assert!(matches!(err, ModelError::InvalidK { k: 0, .. }));
    }

    #[test]
    fn test_predict_rejects_wrong_width() {
        let (x, y) = clusters();
        let mut knn = KnnClassifier::new(1);
        knn.fit(&x, &y).unwrap();

        let err = knn.predict(&[vec![1.0, 2.0, 3.0]]).unwrap_err();
        assert!(matches!(err, ModelError::ShapeMismatch { expected: 2, found: 3 }));
    }
}
