use vader_sentiment::SentimentIntensityAnalyzer;

use super::SentimentScorer;

/// Market jargon the general-purpose VADER lexicon underrates.
const BULLISH_TERMS: &[(&str, f64)] = &[
    ("beats", 0.3),
    ("upgrade", 0.3),
    ("upgraded", 0.3),
    ("outperform", 0.3),
    ("buy rating", 0.3),
    ("raises guidance", 0.4),
    ("record high", 0.4),
    ("surges", 0.4),
    ("rallies", 0.4),
    ("soars", 0.5),
    ("all-time high", 0.5),
];

const BEARISH_TERMS: &[(&str, f64)] = &[
    ("misses", -0.3),
    ("downgrade", -0.3),
    ("downgraded", -0.3),
    ("underperform", -0.3),
    ("sell rating", -0.3),
    ("cuts guidance", -0.4),
    ("plunges", -0.5),
    ("tumbles", -0.4),
    ("lawsuit", -0.4),
    ("recall", -0.3),
    ("bankruptcy", -0.6),
];

// How much the keyword boost counts relative to the VADER compound score
const BOOST_WEIGHT: f64 = 0.5;

/// VADER compound polarity with a financial keyword boost, clamped to [-1, 1].
pub struct LexiconScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    fn keyword_boost(text: &str) -> f64 {
        let lower = text.to_lowercase();
        BULLISH_TERMS
            .iter()
            .chain(BEARISH_TERMS)
            .filter(|(term, _)| lower.contains(term))
            .map(|(_, weight)| weight)
            .sum()
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }
        let compound = self
            .analyzer
            .polarity_scores(text)
            .get("compound")
            .copied()
            .unwrap_or(0.0);
        (compound + Self::keyword_boost(text) * BOOST_WEIGHT).clamp(-1.0, 1.0)
    }
}
