use {
    crate::error::{PipelineError, PipelineResult},
    chrono::NaiveDate,
    std::collections::BTreeSet,
};

/// Distinct dates on which the price series has a bar.
/// Never empty once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct TradingDayCalendar {
    days: BTreeSet<NaiveDate>,
    first: NaiveDate,
    last: NaiveDate,
}

impl TradingDayCalendar {
    pub fn from_dates<I>(dates: I) -> PipelineResult<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let days: BTreeSet<NaiveDate> = dates.into_iter().collect();
        let (Some(&first), Some(&last)) = (days.first(), days.last()) else {
            return Err(PipelineError::EmptyCalendar);
        };
        Ok(Self { days, first, last })
    }

    /// Smallest trading day `>= date`, or None when `date` is past the last trading day.
    pub fn next_on_or_after(&self, date: NaiveDate) -> Option<NaiveDate> {
        if date > self.last {
            return None;
        }
        self.days.range(date..).next().copied()
    }

    pub fn first(&self) -> NaiveDate {
        self.first
    }

    pub fn last(&self) -> NaiveDate {
        self.last
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
