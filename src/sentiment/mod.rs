//! Sentiment scoring seam.
//!
//! The pipeline only needs `text -> polarity in [-1, 1]`. [`LexiconScorer`] is the
//! default, anything implementing [`SentimentScorer`] (closures included) can replace it.

mod lexicon;

pub use lexicon::LexiconScorer;

use crate::{config::SentimentScore, domain::NewsEvent};

pub trait SentimentScorer: Send + Sync {
    /// Raw polarity of `text`. Out-of-range values are clamped by the caller.
    fn score(&self, text: &str) -> f64;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> f64 + Send + Sync,
{
    fn score(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Scores every headline. Events are otherwise left untouched.
pub fn score_events(events: Vec<NewsEvent>, scorer: &dyn SentimentScorer) -> Vec<NewsEvent> {
    events
        .into_iter()
        .map(|event| {
            let score = SentimentScore::new(scorer.score(&event.headline));
            event.with_sentiment(score)
        })
        .collect()
}
