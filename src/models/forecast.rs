use serde::{Deserialize, Serialize};

use crate::domain::LocationId;

/// One day of a multi-day forecast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayForecast {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
    pub forecast: String,
    /// Calendar date, e.g. `Sat Dec 22 2018`.
    pub time: String,
}
