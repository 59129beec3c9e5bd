pub use super::event::Entity as Event;
pub use super::location::Entity as Location;
pub use super::weather::Entity as Weather;
