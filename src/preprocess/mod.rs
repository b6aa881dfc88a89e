pub mod standardize;

pub use standardize::{FeatureProcessor, Standardization};
