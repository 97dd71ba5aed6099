//! Numeric newtypes shared by every pipeline stage.

use serde::{Deserialize, Serialize};

/// Polarity of a piece of text, clamped to [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct SentimentScore(f64);

impl SentimentScore {
    pub const fn new(val: f64) -> Self {
        let v = if val.is_nan() {
            0.0
        } else if val < -1.0 {
            -1.0
        } else if val > 1.0 {
            1.0
        } else {
            val
        };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for SentimentScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+.3}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ClosePrice(f64);

impl ClosePrice {
    pub const fn new(val: f64) -> Self {
        Self(val)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl std::fmt::Display for ClosePrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// Day-over-day change of the close, already scaled to percent (10.0 = +10%).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ReturnPct(f64);

impl ReturnPct {
    pub const fn new(val: f64) -> Self {
        Self(val)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Calculates (Current - Previous) / Previous * 100.
    /// None when the previous close is zero.
    pub fn calculate(current: ClosePrice, previous: ClosePrice) -> Option<Self> {
        if previous.is_zero() {
            return None;
        }
        let pct = (current.value() - previous.value()) / previous.value() * 100.0;
        pct.is_finite().then_some(Self(pct))
    }
}

impl std::fmt::Display for ReturnPct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+.2}%", self.0)
    }
}
