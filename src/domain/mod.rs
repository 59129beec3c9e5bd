//! Domain types for location-scoped lookups.
//!
//! Identifiers are wrapped in newtypes so a location id can never be mixed up
//! with a row id of the weather or event tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a stored [`Location`](crate::models::Location), assigned by the store.
///
/// # Examples
///
/// ```rust
/// use city_explorer::domain::LocationId;
///
/// let id = LocationId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LocationId(i32);

impl LocationId {
    /// Creates a new `LocationId` from a raw i32 value.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `id` is negative.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "LocationId should be non-negative");
        Self(id)
    }

    /// Returns the underlying i32 value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<LocationId> for i32 {
    fn from(id: LocationId) -> Self {
        id.0
    }
}

impl From<i32> for LocationId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Serialize for LocationId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for LocationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i32::deserialize(deserializer)?;
        Ok(Self::new(id))
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true when both components are finite and inside the valid ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// How a weather or event lookup refers to its location.
///
/// `Stored` reads previously persisted rows and never contacts a provider.
/// `Coordinates` always fetches; the fetched rows are persisted under
/// `location_id` when the caller supplies one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationRef {
    Stored(LocationId),
    Coordinates {
        coordinates: Coordinates,
        location_id: Option<LocationId>,
    },
}

impl LocationRef {
    #[must_use]
    pub const fn stored(id: LocationId) -> Self {
        Self::Stored(id)
    }

    #[must_use]
    pub const fn fetch(coordinates: Coordinates, location_id: Option<LocationId>) -> Self {
        Self::Coordinates {
            coordinates,
            location_id,
        }
    }

    /// The location that results are (or would be) scoped to, if known.
    #[must_use]
    pub const fn location_id(&self) -> Option<LocationId> {
        match self {
            Self::Stored(id) => Some(*id),
            Self::Coordinates { location_id, .. } => *location_id,
        }
    }
}

/// The three kinds of query the resolver answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Location,
    Weather,
    Events,
}

impl QueryKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Weather => "weather",
            Self::Events => "events",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
