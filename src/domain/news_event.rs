use {
    crate::config::SentimentScore,
    chrono::{NaiveDate, NaiveDateTime},
    serde::{Deserialize, Serialize},
};

/// One row of the news file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsEvent {
    pub timestamp: NaiveDateTime,
    pub headline: String,
    pub publisher: String,
    /// Set once by the sentiment scorer.
    pub sentiment: Option<SentimentScore>,
}

impl NewsEvent {
    pub fn new(timestamp: NaiveDateTime, headline: &str, publisher: &str) -> Self {
        Self {
            timestamp,
            headline: headline.to_string(),
            publisher: publisher.to_string(),
            sentiment: None,
        }
    }

    /// Calendar date of the event, ignoring the time of day.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn with_sentiment(self, score: SentimentScore) -> Self {
        Self {
            sentiment: Some(score),
            ..self
        }
    }
}

/// A news event stamped with the trading day it counts towards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedNewsEvent {
    pub event: NewsEvent,
    pub aligned_date: NaiveDate,
}

impl AlignedNewsEvent {
    pub fn was_shifted(&self) -> bool {
        self.aligned_date != self.event.date()
    }
}
