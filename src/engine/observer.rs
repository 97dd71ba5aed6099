use crate::error::{Stage, StageError};

/// Per-run progress sink. Each symbol run gets its own, so concurrent runs never
/// share logging state.
pub trait RunObserver: Send + Sync {
    fn stage_started(&self, _stage: Stage) {}

    fn stage_finished(&self, _stage: Stage, _summary: &str) {}

    fn warning(&self, _stage: Stage, _message: &str) {}

    fn failed(&self, _error: &StageError) {}
}

/// Routes run events to the `log` facade, tagged with the symbol.
pub struct LogObserver {
    symbol: String,
}

impl LogObserver {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
        }
    }
}

impl RunObserver for LogObserver {
    fn stage_started(&self, stage: Stage) {
        log::debug!("[{}] {} ...", self.symbol, stage);
    }

    fn stage_finished(&self, stage: Stage, summary: &str) {
        log::info!("[{}] {}: {}", self.symbol, stage, summary);
    }

    fn warning(&self, stage: Stage, message: &str) {
        log::warn!("[{}] {}: {}", self.symbol, stage, message);
    }

    fn failed(&self, error: &StageError) {
        log::error!("[{}] {}", self.symbol, error);
    }
}

/// Discards everything.
pub struct SilentObserver;

impl RunObserver for SilentObserver {}
