//! Maps raw provider payloads onto the three stored record shapes.
//!
//! The functions here are pure: they never touch the network or the store.
//! A payload that lacks the fields a record needs is reported as a
//! [`NormalizeError`] instead of panicking on an index.

pub mod dates;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::clients::Provider;
use crate::domain::LocationId;
use crate::models::{DayForecast, EventSummary, Location};

pub use dates::{epoch_to_calendar, iso_to_calendar};

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("{provider} response is missing {field}")]
    Missing {
        provider: Provider,
        field: &'static str,
    },

    #[error("{provider} response has an unexpected shape: {source}")]
    Shape {
        provider: Provider,
        #[source]
        source: serde_json::Error,
    },

    #[error("{provider} timestamp {value:?} is not a recognised date")]
    InvalidTimestamp { provider: Provider, value: String },
}

impl NormalizeError {
    #[must_use]
    pub const fn provider(&self) -> Provider {
        match self {
            Self::Missing { provider, .. }
            | Self::Shape { provider, .. }
            | Self::InvalidTimestamp { provider, .. } => *provider,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    formatted_address: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    data: Option<Vec<DailyEntry>>,
}

#[derive(Debug, Deserialize)]
struct DailyEntry {
    summary: String,
    time: i64,
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    events: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct EventEntry {
    url: String,
    name: EventName,
    #[serde(default)]
    start: EventStart,
    summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventName {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct EventStart {
    local: Option<String>,
    utc: Option<String>,
}

fn decode<'a, T: Deserialize<'a>>(
    provider: Provider,
    payload: &'a Value,
) -> Result<T, NormalizeError> {
    T::deserialize(payload).map_err(|source| NormalizeError::Shape { provider, source })
}

/// Builds a [`Location`] from the first geocoding result.
///
/// The returned record has no id; the store assigns one on insert.
///
/// # Errors
///
/// Fails when `results` is absent or empty, or when the first result lacks
/// an address or coordinates.
pub fn normalize_location(query: &str, payload: &Value) -> Result<Location, NormalizeError> {
    let provider = Provider::Geocode;
    let response: GeocodeResponse = decode(provider, payload)?;

    let first = response
        .results
        .and_then(|results| results.into_iter().next())
        .ok_or(NormalizeError::Missing {
            provider,
            field: "results",
        })?;

    Ok(Location {
        id: None,
        search_query: query.to_string(),
        formatted_query: first.formatted_address,
        latitude: first.geometry.location.lat,
        longitude: first.geometry.location.lng,
    })
}

/// Builds one [`DayForecast`] per daily entry, in provider order.
///
/// # Errors
///
/// Fails when `daily.data` is absent or empty, or an entry's epoch time cannot
/// be rendered as a date.
pub fn normalize_forecast(
    payload: &Value,
    location_id: Option<LocationId>,
) -> Result<Vec<DayForecast>, NormalizeError> {
    let provider = Provider::Forecast;
    let response: ForecastResponse = decode(provider, payload)?;

    let days = response
        .daily
        .and_then(|daily| daily.data)
        .filter(|data| !data.is_empty())
        .ok_or(NormalizeError::Missing {
            provider,
            field: "daily.data",
        })?;

    days.into_iter()
        .map(|day| {
            let time = epoch_to_calendar(day.time).ok_or_else(|| {
                NormalizeError::InvalidTimestamp {
                    provider,
                    value: day.time.to_string(),
                }
            })?;

            Ok(DayForecast {
                location_id,
                forecast: day.summary,
                time,
            })
        })
        .collect()
}

/// Builds at most `limit` [`EventSummary`] records, in provider order.
///
/// Entries past the limit are never inspected. An empty `events` array is a
/// valid answer for a quiet area and yields an empty vector.
///
/// # Errors
///
/// Fails when `events` is absent, or a kept entry lacks its link, name or a
/// parseable start time.
pub fn normalize_events(
    payload: &Value,
    location_id: Option<LocationId>,
    limit: usize,
) -> Result<Vec<EventSummary>, NormalizeError> {
    let provider = Provider::Events;
    let response: EventsResponse = decode(provider, payload)?;

    let events = response.events.ok_or(NormalizeError::Missing {
        provider,
        field: "events",
    })?;

    events
        .iter()
        .take(limit)
        .map(|raw| {
            let entry: EventEntry = decode(provider, raw)?;

            let name = entry.name.text.ok_or(NormalizeError::Missing {
                provider,
                field: "name.text",
            })?;

            let start = entry
                .start
                .local
                .or(entry.start.utc)
                .ok_or(NormalizeError::Missing {
                    provider,
                    field: "start",
                })?;

            let event_date =
                iso_to_calendar(&start).ok_or_else(|| NormalizeError::InvalidTimestamp {
                    provider,
                    value: start.clone(),
                })?;

            Ok(EventSummary {
                location_id,
                link: entry.url,
                name,
                event_date,
                summary: entry.summary.unwrap_or_default(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seattle_geocode() -> Value {
        json!({
            "results": [{
                "formatted_address": "Seattle, WA, USA",
                "geometry": { "location": { "lat": 47.6062, "lng": -122.3321 } }
            }],
            "status": "OK"
        })
    }

    #[test]
    fn location_from_first_result() {
        let location = normalize_location("Seattle, WA", &seattle_geocode()).unwrap();
        assert_eq!(location.id, None);
        assert_eq!(location.search_query, "Seattle, WA");
        assert_eq!(location.formatted_query, "Seattle, WA, USA");
        assert!((location.latitude - 47.6062).abs() < f64::EPSILON);
        assert!((location.longitude + 122.3321).abs() < f64::EPSILON);
    }

    #[test]
    fn location_with_empty_results_is_malformed() {
        let payload = json!({ "results": [], "status": "ZERO_RESULTS" });
        let err = normalize_location("Nowhere", &payload).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::Missing {
                field: "results",
                ..
            }
        ));
        assert_eq!(err.provider(), Provider::Geocode);
    }

    #[test]
    fn location_without_results_key_is_malformed() {
        let err = normalize_location("x", &json!({ "error_message": "denied" })).unwrap_err();
        assert!(matches!(err, NormalizeError::Missing { .. }));
    }

    #[test]
    fn location_missing_geometry_is_shape_error() {
        let payload = json!({ "results": [{ "formatted_address": "Somewhere" }] });
        let err = normalize_location("x", &payload).unwrap_err();
        assert!(matches!(err, NormalizeError::Shape { .. }));
    }

    #[test]
    fn forecast_keeps_provider_order() {
        let payload = json!({
            "daily": { "data": [
                { "summary": "Rain.", "time": 1_545_436_800 },
                { "summary": "Clouds.", "time": 1_545_523_200 },
                { "summary": "Sun.", "time": 1_545_350_400 }
            ]}
        });

        let days = normalize_forecast(&payload, Some(LocationId::new(4))).unwrap();
        let summaries: Vec<&str> = days.iter().map(|d| d.forecast.as_str()).collect();
        assert_eq!(summaries, ["Rain.", "Clouds.", "Sun."]);
        assert_eq!(days[0].time, "Sat Dec 22 2018");
        assert_eq!(days[1].time, "Sun Dec 23 2018");
        assert_eq!(days[2].time, "Fri Dec 21 2018");
        assert!(days.iter().all(|d| d.location_id == Some(LocationId::new(4))));
    }

    #[test]
    fn forecast_without_daily_data_is_malformed() {
        assert!(matches!(
            normalize_forecast(&json!({ "currently": {} }), None),
            Err(NormalizeError::Missing { .. })
        ));
        assert!(matches!(
            normalize_forecast(&json!({ "daily": { "data": [] } }), None),
            Err(NormalizeError::Missing { .. })
        ));
    }

    fn event(n: usize) -> Value {
        json!({
            "url": format!("https://example.com/e/{n}"),
            "name": { "text": format!("Event {n}") },
            "start": { "local": "2018-12-22T19:00:00", "utc": "2018-12-23T03:00:00Z" },
            "summary": format!("Summary {n}")
        })
    }

    #[test]
    fn events_are_truncated_to_limit() {
        let payload = json!({ "events": (0..35).map(event).collect::<Vec<_>>() });
        let events = normalize_events(&payload, None, 20).unwrap();
        assert_eq!(events.len(), 20);
        assert_eq!(events[0].name, "Event 0");
        assert_eq!(events[19].name, "Event 19");
    }

    #[test]
    fn events_past_limit_are_not_inspected() {
        let mut entries: Vec<Value> = (0..2).map(event).collect();
        entries.push(json!({ "broken": true }));
        let payload = json!({ "events": entries });

        let events = normalize_events(&payload, None, 2).unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn event_fields_are_extracted() {
        let payload = json!({ "events": [event(1)] });
        let events = normalize_events(&payload, Some(LocationId::new(9)), 20).unwrap();
        let e = &events[0];
        assert_eq!(e.link, "https://example.com/e/1");
        assert_eq!(e.name, "Event 1");
        assert_eq!(e.event_date, "Sat Dec 22 2018");
        assert_eq!(e.summary, "Summary 1");
        assert_eq!(e.location_id, Some(LocationId::new(9)));
    }

    #[test]
    fn event_falls_back_to_utc_start_and_empty_summary() {
        let payload = json!({ "events": [{
            "url": "https://example.com/e/utc",
            "name": { "text": "Late show" },
            "start": { "utc": "2018-12-23T03:00:00Z" },
            "summary": null
        }]});

        let events = normalize_events(&payload, None, 20).unwrap();
        assert_eq!(events[0].event_date, "Sun Dec 23 2018");
        assert_eq!(events[0].summary, "");
    }

    #[test]
    fn empty_event_list_is_valid() {
        let events = normalize_events(&json!({ "events": [] }), None, 20).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn missing_event_list_is_malformed() {
        assert!(matches!(
            normalize_events(&json!({ "pagination": {} }), None, 20),
            Err(NormalizeError::Missing {
                field: "events",
                ..
            })
        ));
    }

    #[test]
    fn event_with_bad_start_is_rejected() {
        let payload = json!({ "events": [{
            "url": "https://example.com/e/1",
            "name": { "text": "Mystery" },
            "start": { "local": "soon" }
        }]});

        assert!(matches!(
            normalize_events(&payload, None, 20),
            Err(NormalizeError::InvalidTimestamp { .. })
        ));
    }
}
