pub mod error;
pub mod math;
pub mod activation;
pub mod preprocess;
pub mod loss;
pub mod optim;
pub mod train;
pub mod model;
pub mod data;

// Convenience re-exports
pub use error::{RegressionError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::OutputActivation;
pub use preprocess::standardize::{FeatureProcessor, Standardization};
pub use optim::bold_driver::BoldDriver;
pub use train::epoch_stats::EpochStats;
pub use model::{LogisticRegression, RegressionOptions, TrainedModel, TrainingState};
pub use data::encoding::{one_hot, N_CLASSES};
