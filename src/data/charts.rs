//! Chart data for the plotting collaborator.
//!
//! The pipeline never draws pixels. It assembles a [`ChartBundle`] with the four
//! panels of the correlation figure, or an [`IndicatorChartBundle`] with the three
//! indicator panels, and hands it to a [`ChartRenderer`].

use {
    crate::{
        analysis::{
            distribution::{Histogram, histogram},
            indicators::{
                Indicator, IndicatorTable, MACD_COLUMN, MACD_SIGNAL_COLUMN, Rsi, Sma,
            },
        },
        config::IndicatorSettings,
        data::writer::create_file_with_parents,
        error::{PipelineError, PipelineResult},
        models::JoinedRecord,
        utils::least_squares,
    },
    chrono::NaiveDate,
    serde::{Deserialize, Serialize},
    std::{
        io::{BufWriter, Write},
        path::Path,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionLine {
    pub slope: f64,
    pub intercept: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// (avg_sentiment, return_pct)
    pub points: Vec<(f64, f64)>,
    pub regression: Option<RegressionLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramPanel {
    pub title: String,
    pub x_label: String,
    pub histogram: Histogram,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub trading_day: NaiveDate,
    pub avg_sentiment: f64,
    pub return_pct: f64,
}

/// Sentiment on the left axis, returns on the right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualTimeSeriesPanel {
    pub title: String,
    pub left_label: String,
    pub right_label: String,
    pub points: Vec<TimeSeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBundle {
    pub symbol: String,
    pub sentiment_vs_return: ScatterPanel,
    pub sentiment_distribution: HistogramPanel,
    pub return_distribution: HistogramPanel,
    pub over_time: DualTimeSeriesPanel,
}

impl ChartBundle {
    /// `event_sentiments` are the scores of every news event, not the daily means.
    pub fn build(
        symbol: &str,
        joined: &[JoinedRecord],
        event_sentiments: &[f64],
        histogram_bins: usize,
    ) -> Self {
        let xs: Vec<f64> = joined.iter().map(|r| r.avg_sentiment).collect();
        let ys: Vec<f64> = joined.iter().map(|r| r.return_pct).collect();

        let regression =
            least_squares(&xs, &ys).map(|(slope, intercept)| RegressionLine { slope, intercept });

        Self {
            symbol: symbol.to_string(),
            sentiment_vs_return: ScatterPanel {
                title: format!("Sentiment vs Daily Returns ({})", symbol),
                x_label: "Average Daily Sentiment Score".to_string(),
                y_label: "Daily Return (%)".to_string(),
                points: xs.iter().copied().zip(ys.iter().copied()).collect(),
                regression,
            },
            sentiment_distribution: HistogramPanel {
                title: "Sentiment Score Distribution".to_string(),
                x_label: "Sentiment Score".to_string(),
                histogram: histogram(event_sentiments, histogram_bins),
            },
            return_distribution: HistogramPanel {
                title: "Daily Returns Distribution".to_string(),
                x_label: "Daily Return (%)".to_string(),
                histogram: histogram(&ys, histogram_bins),
            },
            over_time: DualTimeSeriesPanel {
                title: "Sentiment and Returns Over Time".to_string(),
                left_label: "Sentiment Score".to_string(),
                right_label: "Daily Return (%)".to_string(),
                points: joined
                    .iter()
                    .map(|r| TimeSeriesPoint {
                        trading_day: r.trading_day,
                        avg_sentiment: r.avg_sentiment,
                        return_pct: r.return_pct,
                    })
                    .collect(),
            },
        }
    }
}

/// One line of a [`LinePanel`], aligned with the bundle's dates. `None` leaves a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

/// Horizontal reference line, e.g. an RSI threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePanel {
    pub title: String,
    pub y_label: String,
    pub series: Vec<LineSeries>,
    pub reference_lines: Vec<ReferenceLine>,
}

/// Price with SMA, RSI with its thresholds, and MACD with its signal line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorChartBundle {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    pub price: LinePanel,
    pub rsi: LinePanel,
    pub macd: LinePanel,
}

impl IndicatorChartBundle {
    pub fn build(table: &IndicatorTable, settings: &IndicatorSettings) -> Self {
        let line = |label: &str, column: String| LineSeries {
            label: label.to_string(),
            values: table
                .column(&column)
                .map(<[Option<f64>]>::to_vec)
                .unwrap_or_else(|| vec![None; table.len()]),
        };
        let sma_column = Sma {
            period: settings.sma_period,
        }
        .name();
        let rsi_column = Rsi {
            period: settings.rsi_period,
        }
        .name();

        Self {
            symbol: table.symbol.clone(),
            dates: table.dates.clone(),
            price: LinePanel {
                title: format!("{} - Closing Price & SMA", table.symbol),
                y_label: "Price".to_string(),
                series: vec![
                    LineSeries {
                        label: "Close".to_string(),
                        values: table.closes.iter().copied().map(Some).collect(),
                    },
                    line(&format!("SMA {}", settings.sma_period), sma_column),
                ],
                reference_lines: Vec::new(),
            },
            rsi: LinePanel {
                title: format!("{} - RSI", table.symbol),
                y_label: "RSI".to_string(),
                series: vec![line(&format!("RSI {}", settings.rsi_period), rsi_column)],
                reference_lines: vec![
                    ReferenceLine {
                        label: "Overbought".to_string(),
                        value: settings.rsi_overbought,
                    },
                    ReferenceLine {
                        label: "Oversold".to_string(),
                        value: settings.rsi_oversold,
                    },
                ],
            },
            macd: LinePanel {
                title: format!("{} - MACD", table.symbol),
                y_label: "MACD".to_string(),
                series: vec![
                    line("MACD", MACD_COLUMN.to_string()),
                    line("MACD Signal", MACD_SIGNAL_COLUMN.to_string()),
                ],
                reference_lines: Vec::new(),
            },
        }
    }
}

/// Turns chart bundles into artifacts at `path`.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, bundle: &ChartBundle, path: &Path) -> PipelineResult<()>;

    fn render_indicators(&self, bundle: &IndicatorChartBundle, path: &Path) -> PipelineResult<()>;
}

/// Writes bundles as pretty-printed JSON for an external plotting tool.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonChartWriter;

impl JsonChartWriter {
    fn write<T: Serialize>(value: &T, path: &Path) -> PipelineResult<()> {
        let file = create_file_with_parents(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, value).map_err(|source| PipelineError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ChartRenderer for JsonChartWriter {
    fn render(&self, bundle: &ChartBundle, path: &Path) -> PipelineResult<()> {
        Self::write(bundle, path)
    }

    fn render_indicators(&self, bundle: &IndicatorChartBundle, path: &Path) -> PipelineResult<()> {
        Self::write(bundle, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::indicators::{compute_indicator_table, standard_indicators},
        config::ANALYSIS,
        models::PriceSeries,
    };

    fn record(d: u32, s: f64, r: f64) -> JoinedRecord {
        JoinedRecord {
            trading_day: NaiveDate::from_ymd_opt(2024, 2, d).unwrap(),
            avg_sentiment: s,
            news_count: 1,
            return_pct: r,
            close: 10.0,
        }
    }

    #[test]
    fn bundle_has_all_four_panels() {
        let joined = vec![record(1, 0.1, 1.0), record(2, 0.2, 2.0), record(5, 0.3, 3.0)];
        let bundle = ChartBundle::build("AAPL", &joined, &[0.1, 0.2, 0.2, 0.3], 30);

        assert_eq!(bundle.sentiment_vs_return.points.len(), 3);
        assert_eq!(bundle.sentiment_vs_return.title, "Sentiment vs Daily Returns (AAPL)");
        let line = bundle.sentiment_vs_return.regression.unwrap();
        assert!((line.slope - 10.0).abs() < 1e-9);
        assert_eq!(bundle.sentiment_distribution.histogram.samples, 4);
        assert_eq!(bundle.return_distribution.histogram.bins.len(), 30);
        assert_eq!(bundle.over_time.points[2].trading_day, joined[2].trading_day);
    }

    #[test]
    fn json_writer_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plots").join("AAPL_correlation_plot.json");
        let bundle = ChartBundle::build("AAPL", &[record(1, 0.1, 1.0)], &[0.1], 30);

        JsonChartWriter.render(&bundle, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let back: ChartBundle = serde_json::from_str(&text).unwrap();
        assert_eq!(back.symbol, "AAPL");
        assert!(back.sentiment_vs_return.regression.is_none());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn failed_write_is_reported() {
        let bundle = ChartBundle::build("AAPL", &[record(1, 0.1, 1.0)], &[0.1], 30);
        let res = JsonChartWriter.render(&bundle, Path::new("/dev/full"));
        assert!(matches!(res, Err(PipelineError::Io { .. })), "{:?}", res);
    }

    fn indicator_table(n: usize) -> IndicatorTable {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        let pairs: Vec<(NaiveDate, f64)> = (0..n)
            .map(|i| (start + chrono::Days::new(i as u64), 100.0 + (i % 7) as f64))
            .collect();
        let series = PriceSeries::from_closes("MSFT", &pairs).unwrap();
        compute_indicator_table(&series, &standard_indicators(&ANALYSIS.indicators))
    }

    #[test]
    fn indicator_bundle_has_three_panels() {
        let table = indicator_table(50);
        let bundle = IndicatorChartBundle::build(&table, &ANALYSIS.indicators);

        assert_eq!(bundle.dates.len(), 50);
        assert_eq!(bundle.price.title, "MSFT - Closing Price & SMA");
        let labels: Vec<&str> = bundle.price.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Close", "SMA 20"]);
        assert_eq!(bundle.price.series[0].values[0], Some(100.0));
        assert!(bundle.price.series[1].values[18].is_none());
        assert!(bundle.price.series[1].values[19].is_some());

        let thresholds: Vec<f64> = bundle.rsi.reference_lines.iter().map(|r| r.value).collect();
        assert_eq!(thresholds, vec![70.0, 30.0]);
        assert_eq!(bundle.rsi.series[0].values.len(), 50);

        assert_eq!(bundle.macd.series.len(), 2);
        assert_eq!(bundle.macd.series[1].label, "MACD Signal");
        assert!(bundle.macd.series.iter().all(|s| s.values[33].is_some()));
    }

    #[test]
    fn indicator_bundle_renders_gaps_as_null() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MSFT_indicators_plot.json");
        let bundle = IndicatorChartBundle::build(&indicator_table(40), &ANALYSIS.indicators);

        JsonChartWriter.render_indicators(&bundle, &path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(json["macd"]["series"][0]["values"][0].is_null());
        assert_eq!(json["rsi"]["title"], "MSFT - RSI");
    }
}
