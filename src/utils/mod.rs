mod maths_utils;
mod perf;
mod time_utils;

pub use time_utils::{TimeUtils, parse_timestamp};

pub(crate) use maths_utils::{least_squares, mean, mean_and_stddev, sorted_sum};
