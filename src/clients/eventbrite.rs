use reqwest::Client;
use serde_json::Value;

use super::{Provider, ProviderError, fetch_json};
use crate::domain::Coordinates;

pub const EVENTBRITE_API: &str = "https://www.eventbriteapi.com";

/// Eventbrite event search around a point.
#[derive(Clone)]
pub struct EventbriteClient {
    client: Client,
    base_url: String,
    token: String,
}

impl EventbriteClient {
    #[must_use]
    pub fn with_shared_client(client: Client, base_url: &str, token: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn search_url(&self, coordinates: Coordinates) -> String {
        format!(
            "{}/v3/events/search?location.longitude={}&location.latitude={}&expand=venue&token={}",
            self.base_url,
            coordinates.longitude,
            coordinates.latitude,
            urlencoding::encode(&self.token)
        )
    }

    pub async fn search(&self, coordinates: Coordinates) -> Result<Value, ProviderError> {
        fetch_json(&self.client, Provider::Events, &self.search_url(coordinates)).await
    }
}
