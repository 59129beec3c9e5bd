mod events;
mod location;
mod serve;
mod weather;

pub use events::cmd_events;
pub use location::cmd_location;
pub use serve::cmd_serve;
pub use weather::cmd_weather;

use crate::domain::{Coordinates, LocationId, LocationRef};

use super::LocationArgs;

fn positive_id(id: i32) -> anyhow::Result<LocationId> {
    if id <= 0 {
        anyhow::bail!("Invalid location id: {id}. ID must be a positive integer");
    }
    Ok(LocationId::new(id))
}

impl LocationArgs {
    /// Converts the flags into a resolver request with the same checks as the HTTP API.
    pub fn to_location_ref(&self) -> anyhow::Result<LocationRef> {
        if let Some(id) = self.id {
            return Ok(LocationRef::stored(positive_id(id)?));
        }

        let (Some(lat), Some(lng)) = (self.lat, self.lng) else {
            anyhow::bail!("Provide either --id or both --lat and --lng");
        };

        let coordinates = Coordinates::new(lat, lng);
        if !coordinates.is_valid() {
            anyhow::bail!("Coordinates out of range: {coordinates}");
        }

        let owner = self.location_id.map(positive_id).transpose()?;
        Ok(LocationRef::fetch(coordinates, owner))
    }
}
