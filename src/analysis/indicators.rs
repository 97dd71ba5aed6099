//! Technical indicator collaborators.
//!
//! Every indicator maps a close series onto a series of the same length, with `None`
//! for the warm-up bars where the value is not yet defined.

use crate::{config::IndicatorSettings, models::PriceSeries};
use chrono::NaiveDate;

pub const MACD_COLUMN: &str = "MACD";
pub const MACD_SIGNAL_COLUMN: &str = "MACD_Signal";

pub trait Indicator: Send + Sync {
    /// Column name used in the indicator table, e.g. `SMA_20`.
    fn name(&self) -> String;

    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>>;
}

/// Simple moving average.
pub struct Sma {
    pub period: usize,
}

impl Indicator for Sma {
    fn name(&self) -> String {
        format!("SMA_{}", self.period)
    }

    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let mut out = vec![None; closes.len()];
        if self.period == 0 {
            return out;
        }

        let mut rolling_sum = 0.0;
        for (i, &close) in closes.iter().enumerate() {
            rolling_sum += close;
            if i >= self.period {
                rolling_sum -= closes[i - self.period];
            }
            if i + 1 >= self.period {
                out[i] = Some(rolling_sum / self.period as f64);
            }
        }
        out
    }
}

/// Relative strength index with Wilder smoothing.
pub struct Rsi {
    pub period: usize,
}

impl Rsi {
    fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            // Flat series reads neutral, pure gains read 100
            return if avg_gain == 0.0 { 50.0 } else { 100.0 };
        }
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}

impl Indicator for Rsi {
    fn name(&self) -> String {
        format!("RSI_{}", self.period)
    }

    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let mut out = vec![None; closes.len()];
        let p = self.period;
        if p == 0 || closes.len() <= p {
            return out;
        }

        let change = |i: usize| closes[i] - closes[i - 1];

        let (mut avg_gain, mut avg_loss) = (1..=p).fold((0.0, 0.0), |(g, l), i| {
            let c = change(i);
            (g + c.max(0.0), l + (-c).max(0.0))
        });
        avg_gain /= p as f64;
        avg_loss /= p as f64;
        out[p] = Some(Self::from_averages(avg_gain, avg_loss));

        let pf = p as f64;
        for i in (p + 1)..closes.len() {
            let c = change(i);
            avg_gain = (avg_gain * (pf - 1.0) + c.max(0.0)) / pf;
            avg_loss = (avg_loss * (pf - 1.0) + (-c).max(0.0)) / pf;
            out[i] = Some(Self::from_averages(avg_gain, avg_loss));
        }
        out
    }
}

/// Exponential moving average seeded with the simple average of the first `period` values.
pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut prev = values[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(prev);

    for i in period..values.len() {
        prev = alpha * values[i] + (1.0 - alpha) * prev;
        out[i] = Some(prev);
    }
    out
}

pub struct MacdLines {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
}

/// Moving average convergence/divergence.
///
/// Both lines start on the first bar where the signal is defined
/// (index `slow + signal - 2`), so the MACD column never leads its signal.
pub struct Macd {
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
}

impl Macd {
    pub fn lines(&self, closes: &[f64]) -> MacdLines {
        let fast = ema(closes, self.fast);
        let slow = ema(closes, self.slow);

        let mut macd: Vec<Option<f64>> = fast
            .iter()
            .zip(&slow)
            .map(|(f, s)| Some((*f)? - (*s)?))
            .collect();

        // Signal is an EMA over the defined stretch of the MACD line
        let mut signal = vec![None; closes.len()];
        if let Some(start) = macd.iter().position(Option::is_some) {
            let defined: Vec<f64> = macd[start..].iter().flatten().copied().collect();
            for (offset, value) in ema(&defined, self.signal).into_iter().enumerate() {
                signal[start + offset] = value;
            }
        }

        for (line, sig) in macd.iter_mut().zip(&signal) {
            if sig.is_none() {
                *line = None;
            }
        }

        MacdLines { macd, signal }
    }
}

impl Indicator for Macd {
    fn name(&self) -> String {
        MACD_COLUMN.to_string()
    }

    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        self.lines(closes).macd
    }
}

/// The signal line of a [`Macd`] as its own column.
pub struct MacdSignal(pub Macd);

impl Indicator for MacdSignal {
    fn name(&self) -> String {
        MACD_SIGNAL_COLUMN.to_string()
    }

    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        self.0.lines(closes).signal
    }
}

/// The indicator set computed for a symbol: SMA, RSI, MACD and its signal.
pub fn standard_indicators(settings: &IndicatorSettings) -> Vec<Box<dyn Indicator>> {
    let macd = || Macd {
        fast: settings.macd_fast,
        slow: settings.macd_slow,
        signal: settings.macd_signal,
    };
    vec![
        Box::new(Sma {
            period: settings.sma_period,
        }),
        Box::new(Rsi {
            period: settings.rsi_period,
        }),
        Box::new(macd()),
        Box::new(MacdSignal(macd())),
    ]
}

/// Price history with one extra column per indicator.
pub struct IndicatorTable {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    pub closes: Vec<f64>,
    pub columns: Vec<(String, Vec<Option<f64>>)>,
}

impl IndicatorTable {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }
}

pub fn compute_indicator_table(
    series: &PriceSeries,
    indicators: &[Box<dyn Indicator>],
) -> IndicatorTable {
    let closes = series.closes();
    let columns = indicators
        .iter()
        .map(|ind| (ind.name(), ind.compute(&closes)))
        .collect();

    IndicatorTable {
        symbol: series.symbol.clone(),
        dates: series.dates.clone(),
        closes,
        columns,
    }
}
