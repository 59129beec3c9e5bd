//! Outbound HTTP clients for the geocoding, forecast and events providers.
//!
//! The resolver only sees [`ProviderGateway`]: "fetch the raw JSON for this
//! query". Turning that JSON into records is the normalizer's job.

pub mod darksky;
pub mod eventbrite;
pub mod google;

use reqwest::Client;
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::config::ProvidersConfig;
use crate::domain::Coordinates;

pub use darksky::DarkSkyClient;
pub use eventbrite::EventbriteClient;
pub use google::GeocodeClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Geocode,
    Forecast,
    Events,
}

impl Provider {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Geocode => "geocode",
            Self::Forecast => "forecast",
            Self::Events => "events",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} provider unavailable: {message}")]
    Unavailable { provider: Provider, message: String },

    #[error("{provider} provider returned an undecodable body: {source}")]
    Decode {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },
}

/// The capability the resolver needs from the outside world.
#[async_trait::async_trait]
pub trait ProviderGateway: Send + Sync {
    async fn geocode(&self, query: &str) -> Result<Value, ProviderError>;

    async fn forecast(&self, coordinates: Coordinates) -> Result<Value, ProviderError>;

    async fn events(&self, coordinates: Coordinates) -> Result<Value, ProviderError>;
}

/// GETs `url` and decodes the body as JSON.
///
/// `url` usually carries an API key, so it is never logged.
pub(crate) async fn fetch_json(
    client: &Client,
    provider: Provider,
    url: &str,
) -> Result<Value, ProviderError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ProviderError::Unavailable {
            provider,
            message: e.without_url().to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Unavailable {
            provider,
            message: format!("{status} - {}", truncate(&body, 200)),
        });
    }

    debug!(%provider, %status, "Provider responded");

    response
        .json::<Value>()
        .await
        .map_err(|source| ProviderError::Decode {
            provider,
            source: source.without_url(),
        })
}

fn truncate(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(idx, _)| &text[..idx])
}

/// Builds the shared HTTP client used by every provider.
pub fn build_http_client(config: &ProvidersConfig) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
        .user_agent(config.user_agent.clone())
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

/// [`ProviderGateway`] backed by the three real HTTP providers.
#[derive(Clone)]
pub struct HttpProviderGateway {
    geocode: GeocodeClient,
    forecast: DarkSkyClient,
    events: EventbriteClient,
}

impl HttpProviderGateway {
    #[must_use]
    pub fn new(client: Client, config: &ProvidersConfig) -> Self {
        Self {
            geocode: GeocodeClient::with_shared_client(
                client.clone(),
                &config.geocode_base_url,
                &config.geocode_api_key,
            ),
            forecast: DarkSkyClient::with_shared_client(
                client.clone(),
                &config.forecast_base_url,
                &config.forecast_api_key,
            ),
            events: EventbriteClient::with_shared_client(
                client,
                &config.events_base_url,
                &config.events_token,
            ),
        }
    }

    pub fn from_config(config: &ProvidersConfig) -> anyhow::Result<Self> {
        Ok(Self::new(build_http_client(config)?, config))
    }
}

#[async_trait::async_trait]
impl ProviderGateway for HttpProviderGateway {
    async fn geocode(&self, query: &str) -> Result<Value, ProviderError> {
        self.geocode.geocode(query).await
    }

    async fn forecast(&self, coordinates: Coordinates) -> Result<Value, ProviderError> {
        self.forecast.forecast(coordinates).await
    }

    async fn events(&self, coordinates: Coordinates) -> Result<Value, ProviderError> {
        self.events.search(coordinates).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("short", 200), "short");
    }

    #[test]
    fn provider_labels() {
        assert_eq!(Provider::Geocode.to_string(), "geocode");
        assert_eq!(Provider::Forecast.as_str(), "forecast");
        assert_eq!(Provider::Events.as_str(), "events");
    }
}
