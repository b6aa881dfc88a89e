pub mod sgd;
pub mod bold_driver;

pub use sgd::Sgd;
pub use bold_driver::BoldDriver;
