// Domain types and value objects
mod calendar;
mod news_event;
mod price_bar;

// Re-export commonly used types to the world
pub use calendar::TradingDayCalendar;
pub use news_event::{AlignedNewsEvent, NewsEvent};
pub use price_bar::PriceBar;
