use {
    crate::config::{ClosePrice, ReturnPct},
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
};

/// Sentiment collapsed onto one trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySentimentSummary {
    pub trading_day: NaiveDate,
    pub avg_sentiment: f64,
    /// Always >= 1
    pub news_count: usize,
}

/// Why a day does or does not have a return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReturnState {
    /// First bar of the series, there is no prior close.
    FirstBar,
    Defined(ReturnPct),
    /// Prior close was zero. Flagged and excluded downstream.
    ZeroPriorClose,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReturn {
    pub trading_day: NaiveDate,
    pub close: ClosePrice,
    pub state: ReturnState,
}

impl DailyReturn {
    pub fn return_pct(&self) -> Option<ReturnPct> {
        match self.state {
            ReturnState::Defined(pct) => Some(pct),
            ReturnState::FirstBar | ReturnState::ZeroPriorClose => None,
        }
    }
}

/// One row of the merged dataset and one observation for the correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRecord {
    pub trading_day: NaiveDate,
    pub avg_sentiment: f64,
    pub news_count: usize,
    pub return_pct: f64,
    pub close: f64,
}
