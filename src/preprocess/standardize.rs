use serde::{Serialize, Deserialize};

use crate::error::{RegressionError, Result};
use crate::math::matrix::Matrix;

/// Per-column statistics captured from the training features.
///
/// `variance` already has zero entries replaced by `1.0`, so dividing by its
/// square root is always safe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardization {
    pub mean: Vec<f64>,
    pub variance: Vec<f64>,
}

impl Standardization {
    /// Computes population moments of `features`, substituting unit variance
    /// for constant columns.
    pub fn fit(features: &Matrix) -> Result<Standardization> {
        if features.rows == 0 {
            return Err(RegressionError::EmptyDataset);
        }
        let (mean, mut variance) = features.column_moments();
        for v in variance.iter_mut().filter(|v| **v == 0.0) {
            *v = 1.0;
        }
        Ok(Standardization { mean, variance })
    }

    pub fn width(&self) -> usize {
        self.mean.len()
    }

    /// `(features - mean) / sqrt(variance)`, broadcast across rows.
    pub fn apply(&self, features: &Matrix) -> Matrix {
        let std_dev: Vec<f64> = self.variance.iter().map(|v| v.sqrt()).collect();
        features.sub_row_broadcast(&self.mean).div_row_broadcast(&std_dev)
    }
}

/// Standardizes raw feature rows and prepends a bias column.
///
/// The first call to [`FeatureProcessor::process`] fits the standardization
/// parameters; every later call reuses them unchanged, so training, test and
/// prediction inputs are all transformed identically.
#[derive(Debug, Clone, Default)]
pub struct FeatureProcessor {
    standardization: Option<Standardization>,
}

impl FeatureProcessor {
    pub fn new() -> FeatureProcessor {
        FeatureProcessor::default()
    }

    /// A processor that is already fitted, e.g. restored from a saved model.
    pub fn from_standardization(standardization: Standardization) -> FeatureProcessor {
        FeatureProcessor { standardization: Some(standardization) }
    }

    pub fn standardization(&self) -> Option<&Standardization> {
        self.standardization.as_ref()
    }

    pub fn is_fitted(&self) -> bool {
        self.standardization.is_some()
    }

    /// Fits on first use, then standardizes `raw` and prepends the bias
    /// column. Produces an N×(D+1) matrix.
    pub fn process(&mut self, raw: &[Vec<f64>]) -> Result<Matrix> {
        if let Some(standardization) = &self.standardization {
            return transform(standardization, raw);
        }

        let features = Matrix::from_rows(raw.to_vec())?;
        let standardization = Standardization::fit(&features)?;
        let processed = standardization.apply(&features).hstack_ones_left();
        self.standardization = Some(standardization);
        Ok(processed)
    }

    /// Applies already-fitted parameters without touching `self`.
    pub fn transform(&self, raw: &[Vec<f64>]) -> Result<Matrix> {
        match &self.standardization {
            Some(standardization) => transform(standardization, raw),
            None => Err(RegressionError::EmptyDataset),
        }
    }
}

fn transform(standardization: &Standardization, raw: &[Vec<f64>]) -> Result<Matrix> {
    let width = standardization.width();
    let features = Matrix::from_rows_with_cols(raw.to_vec(), width)?;
    Ok(standardization.apply(&features).hstack_ones_left())
}
