use crate::error::{RegressionError, Result};

/// Number of digit classes in MNIST.
pub const N_CLASSES: usize = 10;

/// Encodes integer class labels as one-hot rows of length `n_classes`.
pub fn one_hot(labels: &[u8], n_classes: usize) -> Result<Vec<Vec<f64>>> {
    labels.iter()
        .enumerate()
        .map(|(index, &label)| {
            let label = label as usize;
            if label >= n_classes {
                return Err(RegressionError::LabelOutOfRange { index, label, n_classes });
            }
            let mut row = vec![0.0f64; n_classes];
            row[label] = 1.0;
            Ok(row)
        })
        .collect()
}
