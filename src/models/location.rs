use serde::{Deserialize, Serialize};

use crate::domain::LocationId;

/// A geocoded place, cached by the exact text it was searched with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unset until the store has persisted the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LocationId>,
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    #[must_use]
    pub fn with_id(mut self, id: LocationId) -> Self {
        self.id = Some(id);
        self
    }
}
