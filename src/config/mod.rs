//! Configuration module for the news-pulse pipeline.

// Can all be private now because we have a public re-export.
mod analysis;
mod debug;
mod persistence;
mod schema;
mod types;

// Re-export commonly used items
pub use analysis::{
    ANALYSIS, AlignmentPolicy, AlignmentSettings, AnalysisConfig, ChartSettings, IndicatorSettings,
    ReturnSettings,
};
pub use debug::{DEBUG_FLAGS, LogFlags};
pub use persistence::{
    PERSISTENCE, indicators_filename, indicators_plot_filename, merged_data_filename,
    visualization_filename,
};
pub use schema::{NewsColumns, PriceColumns, PriceSchema, SCHEMA};
pub use types::{ClosePrice, ReturnPct, SentimentScore};
