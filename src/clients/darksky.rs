use reqwest::Client;
use serde_json::Value;

use super::{Provider, ProviderError, fetch_json};
use crate::domain::Coordinates;

pub const DARKSKY_API: &str = "https://api.darksky.net";

/// Dark Sky forecast API. The key is part of the path, not the query string.
#[derive(Clone)]
pub struct DarkSkyClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DarkSkyClient {
    #[must_use]
    pub fn with_shared_client(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn forecast_url(&self, coordinates: Coordinates) -> String {
        format!(
            "{}/forecast/{}/{},{}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            coordinates.latitude,
            coordinates.longitude
        )
    }

    pub async fn forecast(&self, coordinates: Coordinates) -> Result<Value, ProviderError> {
        fetch_json(
            &self.client,
            Provider::Forecast,
            &self.forecast_url(coordinates),
        )
        .await
    }
}
