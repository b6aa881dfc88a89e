pub mod encoding;
pub mod idx;
pub mod mnist;

pub use encoding::{one_hot, N_CLASSES};
pub use mnist::{MnistSplit, SplitKind};
