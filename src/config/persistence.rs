//! File persistence configuration

/// Where run artifacts are written and how they are named.
pub struct OutputPersistenceConfig {
    /// Default directory for run artifacts
    pub directory: &'static str,
    /// Suffix for the joined sentiment/return dataset
    pub merged_suffix: &'static str,
    /// Suffix for the chart bundle handed to the plotting collaborator
    pub plot_suffix: &'static str,
    /// Suffix for the indicator table
    pub indicators_suffix: &'static str,
    /// Suffix for the indicator chart bundle
    pub indicators_plot_suffix: &'static str,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub output: OutputPersistenceConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    output: OutputPersistenceConfig {
        directory: "results",
        merged_suffix: "news_stock_merged",
        plot_suffix: "correlation_plot",
        indicators_suffix: "indicators",
        indicators_plot_suffix: "indicators_plot",
    },
};

/// Example: "AAPL_news_stock_merged.csv"
pub fn merged_data_filename(symbol: &str) -> String {
    format!("{}_{}.csv", symbol, PERSISTENCE.output.merged_suffix)
}

/// Example: "AAPL_correlation_plot.json"
pub fn visualization_filename(symbol: &str) -> String {
    format!("{}_{}.json", symbol, PERSISTENCE.output.plot_suffix)
}

/// Example: "AAPL_indicators.csv"
pub fn indicators_filename(symbol: &str) -> String {
    format!("{}_{}.csv", symbol, PERSISTENCE.output.indicators_suffix)
}

/// Example: "AAPL_indicators_plot.json"
pub fn indicators_plot_filename(symbol: &str) -> String {
    format!("{}_{}.json", symbol, PERSISTENCE.output.indicators_plot_suffix)
}
