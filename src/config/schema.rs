//! Column names expected in the input files.

/// Which price columns a caller needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceSchema {
    /// `Date` and `Close`. Enough for returns and correlation.
    CloseOnly,
    /// Full OHLCV, as required by the indicator collaborators.
    Ohlcv,
}

pub struct NewsColumns {
    pub date: &'static str,
    pub headline: &'static str,
    pub publisher: &'static str,
}

impl NewsColumns {
    pub fn required(&self) -> [&'static str; 3] {
        [self.date, self.headline, self.publisher]
    }
}

pub struct PriceColumns {
    pub date: &'static str,
    pub open: &'static str,
    pub high: &'static str,
    pub low: &'static str,
    pub close: &'static str,
    pub volume: &'static str,
}

impl PriceColumns {
    pub fn required_for(&self, schema: PriceSchema) -> Vec<&'static str> {
        match schema {
            PriceSchema::CloseOnly => vec![self.date, self.close],
            PriceSchema::Ohlcv => vec![
                self.date,
                self.open,
                self.high,
                self.low,
                self.close,
                self.volume,
            ],
        }
    }
}

pub struct SchemaConfig {
    pub news: NewsColumns,
    pub prices: PriceColumns,
}

pub const SCHEMA: SchemaConfig = SchemaConfig {
    news: NewsColumns {
        date: "date",
        headline: "headline",
        publisher: "publisher",
    },
    prices: PriceColumns {
        date: "Date",
        open: "Open",
        high: "High",
        low: "Low",
        close: "Close",
        volume: "Volume",
    },
};
