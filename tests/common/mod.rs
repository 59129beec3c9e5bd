#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use city_explorer::clients::{Provider, ProviderError, ProviderGateway};
use city_explorer::db::Store;
use city_explorer::domain::Coordinates;
use serde_json::{Value, json};

pub const SEATTLE: Coordinates = Coordinates::new(47.6062, -122.3321);

pub async fn memory_store() -> Store {
    Store::new("sqlite::memory:")
        .await
        .expect("in-memory store")
}

pub fn seattle_geocode() -> Value {
    json!({
        "results": [{
            "formatted_address": "Seattle, WA, USA",
            "geometry": { "location": { "lat": 47.6062, "lng": -122.3321 } }
        }],
        "status": "OK"
    })
}

pub fn three_day_forecast() -> Value {
    json!({
        "daily": {
            "data": [
                { "summary": "Rain throughout the day.", "time": 1545436800 },
                { "summary": "Mostly cloudy.", "time": 1545523200 },
                { "summary": "Light rain in the morning.", "time": 1545609600 }
            ]
        }
    })
}

pub fn events_payload(count: usize) -> Value {
    let events: Vec<Value> = (0..count)
        .map(|n| {
            json!({
                "url": format!("https://www.eventbrite.com/e/{n}"),
                "name": { "text": format!("Event {n}") },
                "start": { "local": "2018-12-22T19:00:00", "utc": "2018-12-23T03:00:00Z" },
                "summary": format!("Summary {n}")
            })
        })
        .collect();
    json!({ "events": events })
}

/// In-process gateway that serves canned payloads and counts calls.
pub struct FakeGateway {
    geocode_payload: Value,
    forecast_payload: Value,
    events_payload: Value,
    unavailable: Option<Provider>,
    geocode_calls: AtomicUsize,
    forecast_calls: AtomicUsize,
    events_calls: AtomicUsize,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            geocode_payload: seattle_geocode(),
            forecast_payload: three_day_forecast(),
            events_payload: events_payload(3),
            unavailable: None,
            geocode_calls: AtomicUsize::new(0),
            forecast_calls: AtomicUsize::new(0),
            events_calls: AtomicUsize::new(0),
        }
    }
}

impl FakeGateway {
    #[must_use]
    pub fn with_geocode(mut self, payload: Value) -> Self {
        self.geocode_payload = payload;
        self
    }

    #[must_use]
    pub fn with_forecast(mut self, payload: Value) -> Self {
        self.forecast_payload = payload;
        self
    }

    #[must_use]
    pub fn with_events(mut self, payload: Value) -> Self {
        self.events_payload = payload;
        self
    }

    /// Makes every call to `provider` fail as if the service were down.
    #[must_use]
    pub fn unavailable(mut self, provider: Provider) -> Self {
        self.unavailable = Some(provider);
        self
    }

    pub fn geocode_calls(&self) -> usize {
        self.geocode_calls.load(Ordering::SeqCst)
    }

    pub fn forecast_calls(&self) -> usize {
        self.forecast_calls.load(Ordering::SeqCst)
    }

    pub fn events_calls(&self) -> usize {
        self.events_calls.load(Ordering::SeqCst)
    }

    fn respond(&self, provider: Provider, payload: &Value) -> Result<Value, ProviderError> {
        if self.unavailable == Some(provider) {
            return Err(ProviderError::Unavailable {
                provider,
                message: "503 Service Unavailable".to_string(),
            });
        }
        Ok(payload.clone())
    }
}

#[async_trait::async_trait]
impl ProviderGateway for FakeGateway {
    async fn geocode(&self, _query: &str) -> Result<Value, ProviderError> {
        self.geocode_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(Provider::Geocode, &self.geocode_payload)
    }

    async fn forecast(&self, _coordinates: Coordinates) -> Result<Value, ProviderError> {
        self.forecast_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(Provider::Forecast, &self.forecast_payload)
    }

    async fn events(&self, _coordinates: Coordinates) -> Result<Value, ProviderError> {
        self.events_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(Provider::Events, &self.events_payload)
    }
}
