// Calendar alignment, aggregation, returns, join and correlation stages
pub mod aggregation;
pub mod alignment;
pub mod correlation;
pub mod distribution;
pub mod indicators;
pub mod join;
pub mod returns;

pub use aggregation::aggregate_daily;
pub use alignment::{AlignmentOutcome, align_date, align_events};
pub use correlation::{Correlation, correlate_joined, pearson};
pub use join::join_daily;
pub use returns::{ReturnSeries, compute_returns, flag_large_moves};
