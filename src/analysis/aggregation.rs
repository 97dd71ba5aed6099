use {
    crate::{
        config::DEBUG_FLAGS,
        domain::AlignedNewsEvent,
        error::{PipelineError, PipelineResult},
        models::DailySentimentSummary,
        utils::sorted_sum,
    },
    chrono::NaiveDate,
    std::collections::BTreeMap,
};

/// Collapses aligned, scored events into one summary per trading day.
///
/// Every event weighs the same. Scores for a day are summed in sorted order, so the
/// output is bit-identical for any ordering of `events`. Output is ascending by day.
pub fn aggregate_daily(events: &[AlignedNewsEvent]) -> PipelineResult<Vec<DailySentimentSummary>> {
    let mut by_day: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();

    for aligned in events {
        let score = aligned
            .event
            .sentiment
            .ok_or_else(|| PipelineError::Unscored {
                headline: aligned.event.headline.clone(),
            })?;
        by_day
            .entry(aligned.aligned_date)
            .or_default()
            .push(score.value());
    }

    let summaries = by_day
        .into_iter()
        .map(|(trading_day, scores)| {
            let news_count = scores.len();
            let summary = DailySentimentSummary {
                trading_day,
                avg_sentiment: sorted_sum(&scores) / news_count as f64,
                news_count,
            };
            if DEBUG_FLAGS.log_daily_summaries {
                log::debug!(
                    "{}: {} events, mean sentiment {:+.4}",
                    trading_day,
                    news_count,
                    summary.avg_sentiment
                );
            }
            summary
        })
        .collect();

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::SentimentScore, domain::NewsEvent};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn aligned(d: u32, score: f64) -> AlignedNewsEvent {
        let event = NewsEvent::new(day(d).and_hms_opt(12, 0, 0).unwrap(), "h", "p")
            .with_sentiment(SentimentScore::new(score));
        AlignedNewsEvent {
            event,
            aligned_date: day(d),
        }
    }

    #[test]
    fn mean_and_count_per_day() {
        let events = vec![aligned(8, 0.5), aligned(8, -0.1), aligned(8, 0.2), aligned(9, 0.3)];
        let out = aggregate_daily(&events).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].trading_day, day(8));
        assert_eq!(out[0].news_count, 3);
        assert!((out[0].avg_sentiment - 0.2).abs() < 1e-12);
        assert_eq!(out[1].news_count, 1);
        assert!((out[1].avg_sentiment - 0.3).abs() < 1e-12);
    }

    #[test]
    fn permutation_does_not_change_output() {
        let events = vec![
            aligned(8, 0.1),
            aligned(9, -0.7),
            aligned(8, 0.33),
            aligned(8, -0.91),
            aligned(9, 0.05),
            aligned(10, 0.6),
        ];
        let baseline = aggregate_daily(&events).unwrap();

        let mut reversed = events.clone();
        reversed.reverse();
        let mut rotated = events.clone();
        rotated.rotate_left(2);

        for permuted in [reversed, rotated] {
            let out = aggregate_daily(&permuted).unwrap();
            assert_eq!(out.len(), baseline.len());
            for (a, b) in out.iter().zip(&baseline) {
                assert_eq!(a.trading_day, b.trading_day);
                assert_eq!(a.news_count, b.news_count);
                assert_eq!(a.avg_sentiment.to_bits(), b.avg_sentiment.to_bits());
            }
        }
    }

    #[test]
    fn unscored_event_is_an_error() {
        let mut event = aligned(8, 0.1);
        event.event.sentiment = None;
        let res = aggregate_daily(&[event]);
        assert!(matches!(res, Err(PipelineError::Unscored { .. })));
    }

    #[test]
    fn no_events_no_summaries() {
        assert!(aggregate_daily(&[]).unwrap().is_empty());
    }
}
