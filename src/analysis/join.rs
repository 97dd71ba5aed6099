use {
    crate::models::{DailyReturn, DailySentimentSummary, JoinedRecord},
    chrono::NaiveDate,
    std::collections::HashMap,
};

/// Inner join of sentiment summaries and returns on trading day.
///
/// Days without a defined return (first bar, flagged division) are dropped, never
/// zero-filled. Output is ascending by trading day.
pub fn join_daily(summaries: &[DailySentimentSummary], returns: &[DailyReturn]) -> Vec<JoinedRecord> {
    let defined: HashMap<NaiveDate, (f64, f64)> = returns
        .iter()
        .filter_map(|r| {
            r.return_pct()
                .map(|pct| (r.trading_day, (pct.value(), r.close.value())))
        })
        .collect();

    let mut joined: Vec<JoinedRecord> = summaries
        .iter()
        .filter_map(|s| {
            let &(return_pct, close) = defined.get(&s.trading_day)?;
            Some(JoinedRecord {
                trading_day: s.trading_day,
                avg_sentiment: s.avg_sentiment,
                news_count: s.news_count,
                return_pct,
                close,
            })
        })
        .collect();

    joined.sort_by_key(|r| r.trading_day);
    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{ClosePrice, ReturnPct},
        models::ReturnState,
    };

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn summary(d: u32, avg: f64, count: usize) -> DailySentimentSummary {
        DailySentimentSummary {
            trading_day: day(d),
            avg_sentiment: avg,
            news_count: count,
        }
    }

    fn ret(d: u32, state: ReturnState) -> DailyReturn {
        DailyReturn {
            trading_day: day(d),
            close: ClosePrice::new(100.0 + d as f64),
            state,
        }
    }

    #[test]
    fn keeps_only_days_on_both_sides_with_defined_return() {
        let summaries = vec![summary(9, 0.4, 2), summary(2, 0.1, 1), summary(3, -0.2, 4), summary(5, 0.0, 1)];
        let returns = vec![
            ret(2, ReturnState::FirstBar),
            ret(3, ReturnState::Defined(ReturnPct::new(1.5))),
            ret(4, ReturnState::Defined(ReturnPct::new(-0.5))),
            ret(5, ReturnState::ZeroPriorClose),
            ret(9, ReturnState::Defined(ReturnPct::new(2.0))),
        ];

        let joined = join_daily(&summaries, &returns);
        let days: Vec<NaiveDate> = joined.iter().map(|r| r.trading_day).collect();
        assert_eq!(days, vec![day(3), day(9)]);
        assert_eq!(joined[0].news_count, 4);
        assert_eq!(joined[0].return_pct, 1.5);
        assert_eq!(joined[0].close, 103.0);
        assert!(joined.len() <= summaries.len().min(returns.len()));
    }

    #[test]
    fn disjoint_inputs_join_to_nothing() {
        let joined = join_daily(
            &[summary(2, 0.1, 1)],
            &[ret(3, ReturnState::Defined(ReturnPct::new(1.0)))],
        );
        assert!(joined.is_empty());
    }
}
