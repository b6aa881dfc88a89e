pub mod epoch_stats;
pub mod loop_fn;

pub use epoch_stats::EpochStats;
pub use loop_fn::{batch_count, compute_cost, gradient, run_one_epoch};
