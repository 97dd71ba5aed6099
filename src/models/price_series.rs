use {
    crate::{
        config::ClosePrice,
        domain::{PriceBar, TradingDayCalendar},
        error::{PipelineError, PipelineResult},
    },
    chrono::NaiveDate,
    itertools::Itertools,
    serde::{Deserialize, Serialize},
};

/// Column-oriented daily price history for one symbol.
/// Dates are strictly increasing.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PriceSeries {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    pub open_prices: Vec<Option<f64>>,
    pub high_prices: Vec<Option<f64>>,
    pub low_prices: Vec<Option<f64>>,
    pub close_prices: Vec<ClosePrice>,
    pub volumes: Vec<Option<u64>>,
}

impl PriceSeries {
    /// Sorts the bars by date. Two bars on the same date are a data-quality error,
    /// not something to collapse.
    pub fn from_bars(symbol: &str, mut bars: Vec<PriceBar>) -> PipelineResult<Self> {
        bars.sort_by_key(|b| b.date);

        if let Some((dup, _)) = bars
            .iter()
            .tuple_windows()
            .find(|(a, b)| a.date == b.date)
        {
            return Err(PipelineError::DuplicateTradingDay(dup.date));
        }

        let len = bars.len();
        let mut series = Self {
            symbol: symbol.to_string(),
            dates: Vec::with_capacity(len),
            open_prices: Vec::with_capacity(len),
            high_prices: Vec::with_capacity(len),
            low_prices: Vec::with_capacity(len),
            close_prices: Vec::with_capacity(len),
            volumes: Vec::with_capacity(len),
        };

        for bar in bars {
            series.dates.push(bar.date);
            series.open_prices.push(bar.open);
            series.high_prices.push(bar.high);
            series.low_prices.push(bar.low);
            series.close_prices.push(bar.close);
            series.volumes.push(bar.volume);
        }

        Ok(series)
    }

    /// Builds a close-only series from (date, close) pairs.
    pub fn from_closes(symbol: &str, closes: &[(NaiveDate, f64)]) -> PipelineResult<Self> {
        let bars = closes
            .iter()
            .map(|&(date, close)| PriceBar::from_close(date, close))
            .collect();
        Self::from_bars(symbol, bars)
    }

    pub fn calendar(&self) -> PipelineResult<TradingDayCalendar> {
        TradingDayCalendar::from_dates(self.dates.iter().copied())
    }

    pub fn closes(&self) -> Vec<f64> {
        self.close_prices.iter().map(|c| c.value()).collect()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
