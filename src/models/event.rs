use serde::{Deserialize, Serialize};

use crate::domain::LocationId;

/// A nearby event, reduced to what the front end shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
    pub link: String,
    pub name: String,
    pub event_date: String,
    pub summary: String,
}
