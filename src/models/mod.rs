mod daily;
mod price_series;
mod report;

pub use daily::{DailyReturn, DailySentimentSummary, JoinedRecord, ReturnState};
pub use price_series::PriceSeries;
pub use report::{AnalysisReport, FailureReport, RunOutcome};
