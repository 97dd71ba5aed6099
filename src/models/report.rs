use {
    crate::error::{Stage, StageError},
    serde::{Deserialize, Serialize},
    std::path::PathBuf,
};

/// Results record for one completed symbol run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub correlation: f64,
    pub p_value: f64,
    pub num_observations: usize,
    pub merged_data_path: Option<PathBuf>,
    pub visualization_path: Option<PathBuf>,
    /// Non-fatal issues (flagged returns, dropped events, large moves)
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureReport {
    pub symbol: String,
    pub stage: Stage,
    pub error: String,
}

/// Either a complete results record or an explicit error naming the failing stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunOutcome {
    Completed(AnalysisReport),
    Failed(FailureReport),
}

impl RunOutcome {
    pub fn failed(symbol: &str, err: &StageError) -> Self {
        RunOutcome::Failed(FailureReport {
            symbol: symbol.to_string(),
            stage: err.stage,
            error: err.source.to_string(),
        })
    }

    pub fn symbol(&self) -> &str {
        match self {
            RunOutcome::Completed(report) => &report.symbol,
            RunOutcome::Failed(failure) => &failure.symbol,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }
}
