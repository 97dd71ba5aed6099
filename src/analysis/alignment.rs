use crate::{
    config::{AlignmentPolicy, DEBUG_FLAGS},
    domain::{AlignedNewsEvent, NewsEvent, TradingDayCalendar},
    error::{PipelineError, PipelineResult},
};
use chrono::NaiveDate;

/// Maps a date onto the smallest trading day on or after it.
///
/// The search never runs past the calendar's last trading day: a later date has no
/// target and fails with [`PipelineError::Alignment`] instead of scanning forever.
pub fn align_date(date: NaiveDate, calendar: &TradingDayCalendar) -> PipelineResult<NaiveDate> {
    calendar
        .next_on_or_after(date)
        .ok_or(PipelineError::Alignment {
            date,
            last_trading_day: calendar.last(),
        })
}

#[derive(Debug, Default)]
pub struct AlignmentOutcome {
    pub events: Vec<AlignedNewsEvent>,
    /// Late events excluded under [`AlignmentPolicy::DropLate`], with the reason.
    pub dropped: Vec<(NewsEvent, PipelineError)>,
}

/// Stamps every event with its trading day.
pub fn align_events(
    events: Vec<NewsEvent>,
    calendar: &TradingDayCalendar,
    policy: AlignmentPolicy,
) -> PipelineResult<AlignmentOutcome> {
    let mut outcome = AlignmentOutcome {
        events: Vec::with_capacity(events.len()),
        dropped: Vec::new(),
    };

    for event in events {
        match align_date(event.date(), calendar) {
            Ok(aligned_date) => {
                if DEBUG_FLAGS.log_alignment && aligned_date != event.date() {
                    log::debug!("aligned {} -> {}: {}", event.date(), aligned_date, event.headline);
                }
                outcome.events.push(AlignedNewsEvent {
                    event,
                    aligned_date,
                });
            }
            Err(err) => match policy {
                AlignmentPolicy::Strict => return Err(err),
                AlignmentPolicy::DropLate => outcome.dropped.push((event, err)),
            },
        }
    }

    Ok(outcome)
}
