use serde::{Serialize, Deserialize};

use crate::activation::activation::OutputActivation;
use crate::error::{RegressionError, Result};

/// Hyperparameters for [`LogisticRegression`](crate::model::LogisticRegression).
///
/// Missing fields fall back to [`RegressionOptions::default`] when
/// deserializing, so a JSON file only needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegressionOptions {
    /// Starting learning rate; adapted after every epoch.
    pub learning_rate: f64,
    /// Number of epochs.
    pub iterations: usize,
    /// Samples per mini-batch.
    pub batch_size: usize,
    /// Probability threshold for the single-column sigmoid variant.
    pub decision_boundary: f64,
    pub activation: OutputActivation,
    /// Optional floor for the bold-driver schedule.
    pub min_learning_rate: Option<f64>,
}

impl Default for RegressionOptions {
    fn default() -> Self {
        RegressionOptions {
            learning_rate: 0.1,
            iterations: 1000,
            batch_size: 10,
            decision_boundary: 0.5,
            activation: OutputActivation::Softmax,
            min_learning_rate: None,
        }
    }
}

impl RegressionOptions {
    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn decision_boundary(mut self, decision_boundary: f64) -> Self {
        self.decision_boundary = decision_boundary;
        self
    }

    pub fn activation(mut self, activation: OutputActivation) -> Self {
        self.activation = activation;
        self
    }

    pub fn min_learning_rate(mut self, min_learning_rate: Option<f64>) -> Self {
        self.min_learning_rate = min_learning_rate;
        self
    }

    /// Parses options from JSON text.
    pub fn from_json(json: &str) -> Result<RegressionOptions> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks every field against a training set of `n_samples` rows.
    pub fn validate(&self, n_samples: usize) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(RegressionError::config("learning_rate", self.learning_rate));
        }
        if self.iterations == 0 {
            return Err(RegressionError::config("iterations", self.iterations));
        }
        if self.batch_size == 0 || self.batch_size > n_samples {
            return Err(RegressionError::config(
                "batch_size",
                format!("{} (training set has {} samples)", self.batch_size, n_samples),
            ));
        }
        if !(0.0..=1.0).contains(&self.decision_boundary) {
            return Err(RegressionError::config("decision_boundary", self.decision_boundary));
        }
        if let Some(floor) = self.min_learning_rate {
            if !floor.is_finite() || floor <= 0.0 {
                return Err(RegressionError::config("min_learning_rate", floor));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RegressionOptions::default();
        assert_eq!(options.learning_rate, 0.1);
        assert_eq!(options.iterations, 1000);
        assert_eq!(options.batch_size, 10);
        assert_eq!(options.decision_boundary, 0.5);
        assert_eq!(options.activation, OutputActivation::Softmax);
        assert!(options.validate(10).is_ok());
    }

    #[test]
    fn test_json_overrides_merge_over_defaults() {
        let options = RegressionOptions::from_json(r#"{"learning_rate": 1.0, "batch_size": 500}"#).unwrap();
        assert_eq!(options.learning_rate, 1.0);
        assert_eq!(options.batch_size, 500);
        assert_eq!(options.iterations, 1000);
    }

    #[test]
    fn test_unknown_json_field_rejected() {
        assert!(matches!(
            RegressionOptions::from_json(r#"{"learningRate": 1.0}"#),
            Err(RegressionError::Json(_))
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad = [
            RegressionOptions::default().learning_rate(0.0),
            RegressionOptions::default().learning_rate(-1.0),
            RegressionOptions::default().learning_rate(f64::NAN),
            RegressionOptions::default().iterations(0),
            RegressionOptions::default().batch_size(0),
            RegressionOptions::default().batch_size(11),
            RegressionOptions::default().decision_boundary(1.5),
            RegressionOptions::default().min_learning_rate(Some(0.0)),
        ];
        for options in bad {
            assert!(
                matches!(options.validate(10), Err(RegressionError::InvalidConfiguration { .. })),
                "{:?} should be rejected",
                options
            );
        }
    }
}
