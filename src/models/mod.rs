pub mod event;
pub mod forecast;
pub mod location;

pub use event::EventSummary;
pub use forecast::DayForecast;
pub use location::Location;
