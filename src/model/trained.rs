use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::activation::activation::OutputActivation;
use crate::error::{RegressionError, Result};
use crate::math::matrix::Matrix;
use crate::preprocess::standardize::{FeatureProcessor, Standardization};

/// The parts of a trained regression needed for inference, detached from the
/// training data so it can be saved and reloaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    pub standardization: Standardization,
    pub weights: Matrix,
    pub activation: OutputActivation,
    pub decision_boundary: f64,
}

impl TrainedModel {
    /// Predicted class index for every observation.
    pub fn predict(&self, observations: &[Vec<f64>]) -> Result<Vec<usize>> {
        let processor = FeatureProcessor::from_standardization(self.standardization.clone());
        predict(&processor, &self.weights, self.activation, self.decision_boundary, observations)
    }

    /// Fraction of `features` whose prediction matches the one-hot `labels`.
    pub fn test(&self, features: &[Vec<f64>], labels: &[Vec<f64>]) -> Result<f64> {
        let predictions = self.predict(features)?;
        accuracy(&predictions, labels, self.weights.cols, self.activation)
    }

    /// Serializes the model to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a model previously written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<TrainedModel> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let model: TrainedModel = serde_json::from_reader(reader)?;
        if model.weights.rows != model.standardization.width() + 1 {
            return Err(RegressionError::shape(
                format!("{} weight rows", model.standardization.width() + 1),
                format!("{} weight rows", model.weights.rows),
            ));
        }
        Ok(model)
    }
}

pub(crate) fn predict(
    processor: &FeatureProcessor,
    weights: &Matrix,
    activation: OutputActivation,
    decision_boundary: f64,
    observations: &[Vec<f64>],
) -> Result<Vec<usize>> {
    let processed = processor.transform(observations)?;
    let probabilities = activation.apply(&(&processed * weights));
    Ok(activation.classify(&probabilities, decision_boundary))
}

pub(crate) fn accuracy(
    predictions: &[usize],
    labels: &[Vec<f64>],
    n_classes: usize,
    activation: OutputActivation,
) -> Result<f64> {
    if predictions.len() != labels.len() {
        return Err(RegressionError::shape(
            format!("{} label rows", predictions.len()),
            format!("{} label rows", labels.len()),
        ));
    }
    if predictions.is_empty() {
        return Err(RegressionError::EmptyDataset);
    }

    let labels = Matrix::from_rows_with_cols(labels.to_vec(), n_classes)?;
    let expected = activation.classify(&labels, 0.5);
    let correct = predictions.iter().zip(expected.iter())
        .filter(|(p, e)| p == e)
        .count();
    Ok(correct as f64 / predictions.len() as f64)
}
