use crate::math::matrix::Matrix;

/// Plain gradient-descent step with a mutable learning rate.
#[derive(Debug, Clone, Copy)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies `weights -= learning_rate * slope` in place.
    pub fn step(&self, weights: &mut Matrix, slope: &Matrix) {
        weights.sub_assign_scaled(slope, self.learning_rate);
    }
}
