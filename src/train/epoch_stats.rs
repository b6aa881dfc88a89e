use serde::{Serialize, Deserialize};

/// Per-epoch record kept by `LogisticRegression::train`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Cross-entropy over the full training set after this epoch.
    pub cost: f64,
    /// Learning rate the batches of this epoch were trained with.
    pub learning_rate: f64,
    /// `weights[0][0]` after the epoch (bias row, class 0).
    pub bias_weight: f64,
    /// Samples that took part in a gradient update; the trailing partial
    /// batch is never counted.
    pub samples_used: usize,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
