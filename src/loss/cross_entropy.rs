use crate::math::matrix::Matrix;

/// Small epsilon added inside log() to prevent log(0) = -inf.
pub const EPS: f64 = 1e-7;

/// Cross-entropy cost of `guesses` against one-hot `labels`, averaged over
/// the N rows:
///
/// ```text
/// cost = -( labelsᵀ · log(guesses + ε) + (1 - labels)ᵀ · log(1 - guesses + ε) )[0,0] / N
/// ```
///
/// Only the `[0,0]` entry of the C×C product is kept. When a probability is
/// exactly 1, `log(1 + ε)` is marginally positive, so a negative result is
/// clamped at zero. NaN from diverged weights is passed through.
///
/// Returns `0.0` for zero rows.
pub fn cross_entropy_cost(labels: &Matrix, guesses: &Matrix) -> f64 {
    assert_eq!(labels.shape(), guesses.shape(), "labels and guesses must have the same shape");
    let n = labels.rows;
    if n == 0 {
        return 0.0;
    }

    let term_one = &labels.transpose() * &guesses.add_scalar(EPS).ln();
    let term_two = &labels.scale(-1.0).add_scalar(1.0).transpose()
        * &guesses.scale(-1.0).add_scalar(1.0).add_scalar(EPS).ln();

    let cost = -(&term_one + &term_two).get(0, 0) / n as f64;
    if cost < 0.0 { 0.0 } else { cost }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_guess_cost() {
        let labels = Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let guesses = Matrix::from_data(vec![vec![0.5, 0.5], vec![0.5, 0.5]]);
        let cost = cross_entropy_cost(&labels, &guesses);
        // every sample contributes -ln(0.5 + ε) through column 0
        assert!((cost - -(0.5f64 + EPS).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_exact_zero_and_one_probabilities_stay_finite() {
        let labels = Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let wrong = Matrix::from_data(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        let right = Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);

        let bad = cross_entropy_cost(&labels, &wrong);
        let good = cross_entropy_cost(&labels, &right);
        assert!(bad.is_finite() && bad > 0.0);
        assert!(good.is_finite() && good >= 0.0);
        assert!(good < 1e-6);
    }

    #[test]
    fn test_nan_guesses_give_nan_cost() {
        let labels = Matrix::from_data(vec![vec![1.0, 0.0]]);
        let guesses = Matrix::from_data(vec![vec![f64::NAN, f64::NAN]]);
        assert!(cross_entropy_cost(&labels, &guesses).is_nan());
    }

    #[test]
    fn test_empty_rows_cost_nothing() {
        let empty = Matrix::zeros(0, 3);
        assert_eq!(cross_entropy_cost(&empty, &empty), 0.0);
    }
}
