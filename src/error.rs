use thiserror::Error;

/// Every failure the library surfaces to its caller.
///
/// None of these are retried internally: training is deterministic, so a
/// failing input fails the same way every time.
#[derive(Error, Debug)]
pub enum RegressionError {
    /// Ragged rows, a feature width that differs from the fitted width, or
    /// feature/label row counts that disagree.
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    /// A hyperparameter outside its valid range.
    #[error("invalid configuration: {name} = {value}")]
    InvalidConfiguration { name: String, value: String },

    /// Statistics or accuracy requested over zero samples.
    #[error("dataset contains no samples")]
    EmptyDataset,

    #[error("label {label} at index {index} is out of range for {n_classes} classes")]
    LabelOutOfRange { index: usize, label: usize, n_classes: usize },

    #[error("malformed IDX file: {0}")]
    InvalidIdx(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RegressionError {
    pub(crate) fn shape(expected: impl ToString, got: impl ToString) -> Self {
        RegressionError::ShapeMismatch {
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }

    pub(crate) fn config(name: &str, value: impl ToString) -> Self {
        RegressionError::InvalidConfiguration {
            name: name.to_owned(),
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RegressionError>;
