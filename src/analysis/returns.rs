use {
    crate::{
        config::ReturnPct,
        error::PipelineError,
        models::{DailyReturn, PriceSeries, ReturnState},
    },
    itertools::Itertools,
};

#[derive(Debug, Default)]
pub struct ReturnSeries {
    /// One entry per bar, in date order.
    pub returns: Vec<DailyReturn>,
    /// Per-record division failures. The run continues without those days.
    pub flagged: Vec<PipelineError>,
}

impl ReturnSeries {
    pub fn defined_count(&self) -> usize {
        self.returns.iter().filter(|r| r.return_pct().is_some()).count()
    }
}

/// Day-over-day percentage change of the close.
///
/// The first bar has no return. A zero prior close leaves that one day unset and
/// flagged rather than leaking inf/NaN into the statistics.
pub fn compute_returns(series: &PriceSeries) -> ReturnSeries {
    let mut out = ReturnSeries {
        returns: Vec::with_capacity(series.len()),
        flagged: Vec::new(),
    };

    if let (Some(&first_day), Some(&first_close)) =
        (series.dates.first(), series.close_prices.first())
    {
        out.returns.push(DailyReturn {
            trading_day: first_day,
            close: first_close,
            state: ReturnState::FirstBar,
        });
    }

    let bars = series.dates.iter().zip(series.close_prices.iter());
    for ((&prev_day, &prev_close), (&day, &close)) in bars.tuple_windows() {
        let state = match ReturnPct::calculate(close, prev_close) {
            Some(pct) => ReturnState::Defined(pct),
            None => {
                out.flagged.push(PipelineError::Division {
                    date: day,
                    previous_day: prev_day,
                });
                ReturnState::ZeroPriorClose
            }
        };
        out.returns.push(DailyReturn {
            trading_day: day,
            close,
            state,
        });
    }

    out
}

/// Describes every return whose magnitude exceeds `threshold_pct`.
/// Unadjusted closes around splits and dividends surface here.
pub fn flag_large_moves(returns: &[DailyReturn], threshold_pct: f64) -> Vec<String> {
    returns
        .iter()
        .filter_map(|r| {
            let pct = r.return_pct()?;
            (pct.value().abs() > threshold_pct).then(|| {
                format!(
                    "{}: return {} exceeds {:.0}%, close may not be split/dividend adjusted",
                    r.trading_day, pct, threshold_pct
                )
            })
        })
        .collect()
}
