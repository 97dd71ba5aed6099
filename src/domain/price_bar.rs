use {
    crate::config::ClosePrice,
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
};

/// One trading day of the price file. Only `close` is required, the rest are
/// pass-throughs for the indicator collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,

    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: ClosePrice,

    pub volume: Option<u64>,
}

impl PriceBar {
    // Close-only bar, as loaded from a minimal `Date,Close` file
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close: ClosePrice::new(close),
            volume: None,
        }
    }
}
