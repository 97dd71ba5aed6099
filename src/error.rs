use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum_macros::{Display, EnumIter};
use thiserror::Error;

/// Pipeline stages, in execution order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Load,
    Score,
    Align,
    Aggregate,
    Returns,
    Join,
    Correlate,
    Persist,
    Render,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{source_name}: missing required column(s): {}", missing.join(", "))]
    Schema {
        source_name: String,
        missing: Vec<String>,
    },

    #[error("{source_name}: line {line}: cannot parse column '{column}' from {value:?}")]
    MalformedValue {
        source_name: String,
        line: usize,
        column: String,
        value: String,
    },

    #[error("duplicate trading day {0} in price data")]
    DuplicateTradingDay(NaiveDate),

    #[error("price data contains no trading days")]
    EmptyCalendar,

    #[error("no trading day on or after {date} (last trading day is {last_trading_day})")]
    Alignment {
        date: NaiveDate,
        last_trading_day: NaiveDate,
    },

    #[error("news event {headline:?} reached aggregation without a sentiment score")]
    Unscored { headline: String },

    #[error("close on {previous_day} is zero, return for {date} is undefined")]
    Division {
        date: NaiveDate,
        previous_day: NaiveDate,
    },

    #[error("correlation needs at least 2 observations, got {observations}")]
    InsufficientData { observations: usize },

    #[error("column '{column}' is constant over {observations} observations, correlation is undefined")]
    DegenerateInput {
        column: &'static str,
        observations: usize,
    },

    #[error("correlation columns differ in length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    #[error("statistics error: {0}")]
    Statistics(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error on {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("JSON error on {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

/// A run-fatal error tagged with the stage that raised it.
#[derive(Error, Debug)]
#[error("{stage} stage failed: {source}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: PipelineError,
}

pub trait StageContext<T> {
    fn at(self, stage: Stage) -> Result<T, StageError>;
}

impl<T> StageContext<T> for PipelineResult<T> {
    fn at(self, stage: Stage) -> Result<T, StageError> {
        self.map_err(|source| StageError { stage, source })
    }
}
