//! Seeded train/test partitioning of row indices.

use super::ModelError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub const DEFAULT_TEST_SIZE: f64 = 0.2;
pub const DEFAULT_SEED: u64 = 42;

/// Disjoint train and test row indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

/// Shuffle `0..n_samples` and hold out `ceil(n_samples * test_size)` rows.
///
/// Both sides always keep at least one row.
pub fn train_test_split(n_samples: usize, test_size: f64, seed: u64) -> Result<Split, ModelError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(ModelError::InvalidTestSize(test_size));
    }
    if n_samples < 2 {
        return Err(ModelError::TooFewSamples(n_samples));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n_samples as f64 * test_size).ceil() as usize).clamp(1, n_samples - 1);
    let train_indices = indices.split_off(n_test);

    Ok(Split {
        train_indices,
        test_indices: indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_split_sizes_and_disjoint() {
        let split = train_test_split(699, 0.2, DEFAULT_SEED).unwrap();
        assert_eq!(split.test_indices.len(), 140);
        assert_eq!(split.train_indices.len(), 559);

        let test: HashSet<_> = split.test_indices.iter().collect();
        let train: HashSet<_> = split.train_indices.iter().collect();
        assert!(test.is_disjoint(&train));
        assert_eq!(test.len() + train.len(), 699);
    }

    #[test]
    fn test_split_is_deterministic() {
        let a = train_test_split(50, 0.3, 7).unwrap();
        let b = train_test_split(50, 0.3, 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_split_keeps_both_sides() {
        let split = train_test_split(2, 0.9, 1).unwrap();
        assert_eq!(split.test_indices.len(), 1);
        assert_eq!(split.train_indices.len(), 1);
    }

    #[test]
    fn test_split_rejects_bad_input() {
        assert!(matches!(train_test_split(10, 0.0, 1), Err(ModelError::InvalidTestSize(_))));
        assert!(matches!(train_test_split(10, 1.0, 1), Err(ModelError::InvalidTestSize(_))));
        assert!(matches!(train_test_split(1, 0.5, 1), Err(ModelError::TooFewSamples(1))));
    }
}
