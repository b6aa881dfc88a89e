use crate::activation::activation::OutputActivation;
use crate::loss::cross_entropy::cross_entropy_cost;
use crate::math::matrix::Matrix;
use crate::optim::sgd::Sgd;

/// Number of full batches per epoch. The trailing `n % batch_size` samples
/// never make it into a batch.
pub fn batch_count(n: usize, batch_size: usize) -> usize {
    n / batch_size
}

/// Gradient of the cross-entropy cost w.r.t. `weights` over one batch:
/// `featuresᵀ · (activation(features · weights) - labels) / batch_size`.
pub fn gradient(
    features: &Matrix,
    labels: &Matrix,
    weights: &Matrix,
    activation: OutputActivation,
) -> Matrix {
    let guesses = activation.apply(&(features * weights));
    let differences = &guesses - labels;
    (&features.transpose() * &differences).scale(1.0 / features.rows as f64)
}

/// Runs one pass of mini-batch gradient descent over the batches of
/// `features`/`labels` in row order, updating `weights` in place.
///
/// Returns the number of samples used.
pub fn run_one_epoch(
    features: &Matrix,
    labels: &Matrix,
    weights: &mut Matrix,
    optimizer: &Sgd,
    batch_size: usize,
    activation: OutputActivation,
) -> usize {
    let batches = batch_count(features.rows, batch_size);

    for j in 0..batches {
        let start = j * batch_size;
        let end = start + batch_size;

        // Everything allocated here is dropped at the end of the iteration,
        // so peak memory scales with the batch rather than the dataset.
        let feature_slice = features.slice_rows(start, end);
        let label_slice = labels.slice_rows(start, end);
        let slope = gradient(&feature_slice, &label_slice, weights, activation);
        optimizer.step(weights, &slope);
    }

    batches * batch_size
}

/// Cost of `weights` over the full dataset.
pub fn compute_cost(
    features: &Matrix,
    labels: &Matrix,
    weights: &Matrix,
    activation: OutputActivation,
) -> f64 {
    let guesses = activation.apply(&(features * weights));
    cross_entropy_cost(labels, &guesses)
}
