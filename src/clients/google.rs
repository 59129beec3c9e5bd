use reqwest::Client;
use serde_json::Value;

use super::{Provider, ProviderError, fetch_json};

pub const GOOGLE_MAPS_API: &str = "https://maps.googleapis.com";

/// Google Maps geocoding: free-text address to formatted address and coordinates.
#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
    #[must_use]
    pub fn with_shared_client(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn geocode_url(&self, query: &str) -> String {
        format!(
            "{}/maps/api/geocode/json?address={}&key={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.api_key)
        )
    }

    pub async fn geocode(&self, query: &str) -> Result<Value, ProviderError> {
        fetch_json(&self.client, Provider::Geocode, &self.geocode_url(query)).await
    }
}
