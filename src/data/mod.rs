mod charts;
mod loader;
mod writer;

pub use {
    charts::{
        ChartBundle, ChartRenderer, DualTimeSeriesPanel, HistogramPanel, IndicatorChartBundle,
        JsonChartWriter, LinePanel, LineSeries, ReferenceLine, RegressionLine, ScatterPanel,
        TimeSeriesPoint,
    },
    loader::{load_news, load_prices, read_news, read_prices},
    writer::{write_indicator_table, write_joined},
};
