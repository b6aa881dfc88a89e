pub mod options;
pub mod logistic_regression;
pub mod trained;

pub use options::RegressionOptions;
pub use logistic_regression::{LogisticRegression, TrainingState};
pub use trained::TrainedModel;
