use serde::Deserialize;

use super::ApiError;
use crate::domain::{Coordinates, LocationId, LocationRef};

/// Query parameters accepted by `/weather` and `/events`.
///
/// Values arrive as raw strings so that malformed numbers produce our own
/// 400 message instead of the extractor's rejection text.
#[derive(Debug, Default, Deserialize)]
pub struct LocationParams {
    #[serde(default, alias = "data[id]")]
    pub id: Option<String>,

    #[serde(default, alias = "data[latitude]")]
    pub latitude: Option<String>,

    #[serde(default, alias = "data[longitude]")]
    pub longitude: Option<String>,

    #[serde(default, alias = "data[location_id]")]
    pub location_id: Option<String>,
}

impl LocationParams {
    /// `id` selects the cached rows; otherwise both coordinates are required.
    pub fn into_location_ref(self) -> Result<LocationRef, ApiError> {
        if let Some(id) = non_empty(self.id.as_deref()) {
            return Ok(LocationRef::stored(validate_location_id(id)?));
        }

        let (Some(lat), Some(lng)) = (
            non_empty(self.latitude.as_deref()),
            non_empty(self.longitude.as_deref()),
        ) else {
            return Err(ApiError::validation(
                "Provide either id or both latitude and longitude",
            ));
        };

        let coordinates = validate_coordinates(lat, lng)?;
        let owner = non_empty(self.location_id.as_deref())
            .map(validate_location_id)
            .transpose()?;

        Ok(LocationRef::fetch(coordinates, owner))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn validate_location_id(raw: &str) -> Result<LocationId, ApiError> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(LocationId::new(id)),
        _ => Err(ApiError::validation(format!(
            "Invalid location id: {}. ID must be a positive integer",
            raw
        ))),
    }
}

pub fn validate_coordinates(lat: &str, lng: &str) -> Result<Coordinates, ApiError> {
    let parse = |name: &str, raw: &str| {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| ApiError::validation(format!("Invalid {}: {}", name, raw)))
    };

    let coordinates = Coordinates::new(parse("latitude", lat)?, parse("longitude", lng)?);
    if !coordinates.is_valid() {
        return Err(ApiError::validation(format!(
            "Coordinates out of range: {}",
            coordinates
        )));
    }
    Ok(coordinates)
}

pub fn validate_search_query(query: Option<&str>) -> Result<&str, ApiError> {
    non_empty(query).ok_or_else(|| ApiError::validation("Search query cannot be empty"))
}
