use std::time::Instant;

use log::{debug, info, warn};

use crate::error::{RegressionError, Result};
use crate::math::matrix::Matrix;
use crate::model::options::RegressionOptions;
use crate::model::trained::{self, TrainedModel};
use crate::optim::bold_driver::BoldDriver;
use crate::optim::sgd::Sgd;
use crate::preprocess::standardize::FeatureProcessor;
use crate::train::epoch_stats::EpochStats;
use crate::train::loop_fn::{batch_count, compute_cost, run_one_epoch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingState {
    /// Weights are still all zero.
    Untrained,
    /// Inside `train`. Only held while `train` has `&mut self`, so callers
    /// never see it; it marks the transition between the other two states.
    Training,
    /// `train` has completed; the weights are final.
    Trained,
}

/// Linear classifier trained with mini-batch gradient descent.
///
/// Construction standardizes the training features once; the fitted
/// statistics are then reused for every `predict` and `test` call. The
/// weight matrix is `(D + 1) × C`, row 0 holding the bias of each class.
#[derive(Debug)]
pub struct LogisticRegression {
    features: Matrix,
    labels: Matrix,
    processor: FeatureProcessor,
    weights: Matrix,
    options: RegressionOptions,
    learning_rate: f64,
    cost_history: Vec<f64>,
    bias_history: Vec<f64>,
    epoch_stats: Vec<EpochStats>,
    state: TrainingState,
}

impl LogisticRegression {
    /// Validates the inputs, standardizes `features` and zero-initializes the
    /// weights.
    ///
    /// # Errors
    /// - `ShapeMismatch` for ragged rows, a label matrix without columns, or
    ///   differing feature/label row counts.
    /// - `InvalidConfiguration` when `options` fail validation against the
    ///   number of training samples.
    pub fn new(
        features: &[Vec<f64>],
        labels: &[Vec<f64>],
        options: RegressionOptions,
    ) -> Result<LogisticRegression> {
        if features.len() != labels.len() {
            return Err(RegressionError::shape(
                format!("{} label rows", features.len()),
                format!("{} label rows", labels.len()),
            ));
        }
        let labels = Matrix::from_rows(labels.to_vec())?;
        if labels.rows > 0 && labels.cols == 0 {
            return Err(RegressionError::shape("at least one label column", "0 label columns"));
        }
        options.validate(features.len())?;

        let mut processor = FeatureProcessor::new();
        let features = processor.process(features)?;
        let weights = Matrix::zeros(features.cols, labels.cols);

        Ok(LogisticRegression {
            features,
            labels,
            processor,
            weights,
            learning_rate: options.learning_rate,
            options,
            cost_history: Vec::new(),
            bias_history: Vec::new(),
            epoch_stats: Vec::new(),
            state: TrainingState::Untrained,
        })
    }

    /// Runs `options.iterations` epochs of mini-batch gradient descent,
    /// recording the cost and adapting the learning rate after each one.
    ///
    /// Training happens once; calling this on a trained model does nothing.
    pub fn train(&mut self) {
        if self.state == TrainingState::Trained {
            warn!("train() called on an already trained model; ignoring");
            return;
        }
        self.state = TrainingState::Training;

        let n = self.features.rows;
        let batch_size = self.options.batch_size;
        let schedule = BoldDriver::new(self.options.min_learning_rate);
        info!(
            "training on {} samples x {} features, {} classes: {} epochs of {} batches (batch size {}, {} samples dropped per epoch)",
            n,
            self.features.cols - 1,
            self.labels.cols,
            self.options.iterations,
            batch_count(n, batch_size),
            batch_size,
            n % batch_size,
        );

        for epoch in 1..=self.options.iterations {
            let t_start = Instant::now();
            let optimizer = Sgd::new(self.learning_rate);

            let samples_used = run_one_epoch(
                &self.features,
                &self.labels,
                &mut self.weights,
                &optimizer,
                batch_size,
                self.options.activation,
            );

            let bias_weight = self.weights.get(0, 0);
            self.bias_history.push(bias_weight);
            let cost = self.cost();
            self.cost_history.push(cost);

            let elapsed_ms = t_start.elapsed().as_millis() as u64;
            debug!("epoch {}/{}: cost = {:.6}, learning rate = {}", epoch, self.options.iterations, cost, self.learning_rate);
            self.epoch_stats.push(EpochStats {
                epoch,
                cost,
                learning_rate: self.learning_rate,
                bias_weight,
                samples_used,
                elapsed_ms,
            });

            self.learning_rate = schedule.adapt(self.learning_rate, &self.cost_history);
        }

        self.state = TrainingState::Trained;
        info!(
            "training finished: cost = {:.6}, learning rate = {}",
            self.cost_history.last().copied().unwrap_or_default(),
            self.learning_rate,
        );
    }

    /// Predicted class index for every observation. An empty slice yields an
    /// empty result.
    pub fn predict(&self, observations: &[Vec<f64>]) -> Result<Vec<usize>> {
        trained::predict(
            &self.processor,
            &self.weights,
            self.options.activation,
            self.options.decision_boundary,
            observations,
        )
    }

    /// Fraction of `features` whose predicted class matches the one-hot
    /// `labels`, in `[0, 1]`.
    pub fn test(&self, features: &[Vec<f64>], labels: &[Vec<f64>]) -> Result<f64> {
        let predictions = self.predict(features)?;
        trained::accuracy(&predictions, labels, self.weights.cols, self.options.activation)
    }

    /// Cross-entropy of the current weights over the full training set.
    pub fn cost(&self) -> f64 {
        compute_cost(&self.features, &self.labels, &self.weights, self.options.activation)
    }

    /// Detaches the inference state from the training data.
    pub fn snapshot(&self) -> Result<TrainedModel> {
        let standardization = self.processor.standardization()
            .cloned()
            .ok_or(RegressionError::EmptyDataset)?;
        Ok(TrainedModel {
            standardization,
            weights: self.weights.clone(),
            activation: self.options.activation,
            decision_boundary: self.options.decision_boundary,
        })
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn cost_history(&self) -> &[f64] {
        &self.cost_history
    }

    pub fn bias_history(&self) -> &[f64] {
        &self.bias_history
    }

    pub fn epoch_stats(&self) -> &[EpochStats] {
        &self.epoch_stats
    }

    /// The learning rate the next epoch would use.
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn options(&self) -> &RegressionOptions {
        &self.options
    }

    pub fn state(&self) -> TrainingState {
        self.state
    }

    pub fn processor(&self) -> &FeatureProcessor {
        &self.processor
    }
}
