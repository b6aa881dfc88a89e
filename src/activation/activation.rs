use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;

/// Output activation applied to the linear scores `features @ weights`.
///
/// - `Softmax` — multinomial classifier; each row becomes a distribution over
///   the classes and the predicted class is the row argmax.
/// - `Sigmoid` — binary variant; each score is squashed independently. With a
///   single output column the predicted class is `1` when the probability
///   reaches the decision boundary, otherwise `0`.
///
/// Both pair with cross-entropy, so the gradient w.r.t. the scores is
/// `probabilities - labels` in either case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputActivation {
    #[default]
    Softmax,
    Sigmoid,
}

impl OutputActivation {
    /// Turns a matrix of scores into probabilities.
    pub fn apply(&self, scores: &Matrix) -> Matrix {
        match self {
            OutputActivation::Softmax => scores.softmax_rows(),
            OutputActivation::Sigmoid => scores.sigmoid(),
        }
    }

    /// Maps each row of probabilities (or one-hot labels) to a class index.
    pub fn classify(&self, probabilities: &Matrix, decision_boundary: f64) -> Vec<usize> {
        match self {
            OutputActivation::Sigmoid if probabilities.cols == 1 => probabilities.data.iter()
                .map(|row| usize::from(row[0] >= decision_boundary))
                .collect(),
            _ => probabilities.argmax_rows(),
        }
    }
}
