//! Analysis and computation configuration

use serde::{Deserialize, Serialize};

/// What the calendar aligner does with news dated after the last loaded trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AlignmentPolicy {
    /// Abort the symbol's run with an alignment error.
    #[default]
    Strict,
    /// Exclude late events and record one warning per event.
    DropLate,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AlignmentSettings {
    pub policy: AlignmentPolicy,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReturnSettings {
    // Absolute daily move (in percent) above which a return gets a warning.
    // Unadjusted closes around splits show up here.
    pub large_move_warning_pct: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChartSettings {
    pub histogram_bins: usize,
}

/// Periods for the technical indicator collaborators.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndicatorSettings {
    pub sma_period: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,

    // Reference lines drawn on the RSI panel
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,

    /// How many trailing rows the `indicators` binary prints.
    pub preview_rows: usize,
}

/// The Master Analysis Configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub alignment: AlignmentSettings,
    pub returns: ReturnSettings,
    pub charts: ChartSettings,
    pub indicators: IndicatorSettings,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    alignment: AlignmentSettings {
        policy: AlignmentPolicy::Strict,
    },

    returns: ReturnSettings {
        large_move_warning_pct: 40.0,
    },

    charts: ChartSettings { histogram_bins: 30 },

    indicators: IndicatorSettings {
        sma_period: 20,
        rsi_period: 14,
        macd_fast: 12,
        macd_slow: 26,
        macd_signal: 9,
        rsi_overbought: 70.0,
        rsi_oversold: 30.0,
        preview_rows: 5,
    },
};
