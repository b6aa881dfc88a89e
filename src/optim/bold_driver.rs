use log::warn;

/// Bold-driver learning-rate schedule.
///
/// After every epoch the two most recent costs are compared: a rise halves
/// the rate, anything else grows it by 5%. A non-finite latest cost counts
/// as a rise. Nothing happens until two costs exist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoldDriver {
    pub shrink: f64,
    pub grow: f64,
    /// Lower bound applied after shrinking. `None` lets the rate decay freely.
    pub min_learning_rate: Option<f64>,
}

impl Default for BoldDriver {
    fn default() -> Self {
        BoldDriver { shrink: 0.5, grow: 1.05, min_learning_rate: None }
    }
}

impl BoldDriver {
    pub fn new(min_learning_rate: Option<f64>) -> BoldDriver {
        BoldDriver { min_learning_rate, ..BoldDriver::default() }
    }

    /// Returns the learning rate to use for the next epoch.
    pub fn adapt(&self, learning_rate: f64, cost_history: &[f64]) -> f64 {
        let [.., previous, latest] = cost_history else {
            return learning_rate;
        };

        if latest > previous || !latest.is_finite() {
            let shrunk = learning_rate * self.shrink;
            let next = match self.min_learning_rate {
                Some(floor) => shrunk.max(floor),
                None => shrunk,
            };
            warn!("cost rose from {:.6} to {:.6}; learning rate {} -> {}", previous, latest, learning_rate, next);
            next
        } else {
            learning_rate * self.grow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unchanged_with_fewer_than_two_costs() {
        let driver = BoldDriver::default();
        assert_eq!(driver.adapt(0.1, &[]), 0.1);
        assert_eq!(driver.adapt(0.1, &[3.0]), 0.1);
    }

    #[test]
    fn test_halves_on_rising_cost() {
        let driver = BoldDriver::default();
        assert_eq!(driver.adapt(0.8, &[1.0, 2.0, 2.5]), 0.4);
    }

    #[test]
    fn test_grows_on_falling_or_flat_cost() {
        let driver = BoldDriver::default();
        assert!((driver.adapt(1.0, &[2.0, 1.0]) - 1.05).abs() < 1e-12);
        assert!((driver.adapt(1.0, &[1.0, 1.0]) - 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_cost_counts_as_rise() {
        let driver = BoldDriver::default();
        assert_eq!(driver.adapt(0.8, &[1.0, f64::NAN]), 0.4);
        assert_eq!(driver.adapt(0.8, &[f64::NAN, f64::NAN]), 0.4);
        assert_eq!(driver.adapt(0.8, &[1.0, f64::INFINITY]), 0.4);
    }

    #[test]
    fn test_floor_only_applies_when_set() {
        let floored = BoldDriver::new(Some(0.3));
        assert_eq!(floored.adapt(0.4, &[1.0, 2.0]), 0.3);
        assert_eq!(BoldDriver::default().adapt(0.4, &[1.0, 2.0]), 0.2);
    }
}
