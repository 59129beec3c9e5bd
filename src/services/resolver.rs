//! Cache-or-fetch resolution for location, weather and event queries.
//!
//! A resolver first consults the store and only falls through to a provider
//! when nothing usable is cached. Fetched payloads are normalized, persisted
//! and returned in the same call.

use crate::clients::{Provider, ProviderError};
use crate::domain::LocationRef;
use crate::models::{DayForecast, EventSummary, Location};
use crate::normalize::NormalizeError;
use thiserror::Error;

/// Why a query could not be answered.
///
/// The API layer reports all three variants the same way; the distinction
/// exists for logs and metrics.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{provider} provider unavailable: {message}")]
    ProviderUnavailable { provider: Provider, message: String },

    #[error("malformed {provider} response: {message}")]
    MalformedProviderResponse { provider: Provider, message: String },

    #[error("persistence failure: {0}")]
    PersistenceFailure(String),
}

impl ResolveError {
    /// Short label used for the `reason` metric label.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ProviderUnavailable { .. } => "provider_unavailable",
            Self::MalformedProviderResponse { .. } => "malformed_provider_response",
            Self::PersistenceFailure(_) => "persistence_failure",
        }
    }

    pub fn persistence(err: impl std::fmt::Display) -> Self {
        Self::PersistenceFailure(err.to_string())
    }
}

impl From<ProviderError> for ResolveError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Unavailable { provider, message } => {
                Self::ProviderUnavailable { provider, message }
            }
            ProviderError::Decode { provider, source } => Self::MalformedProviderResponse {
                provider,
                message: source.to_string(),
            },
        }
    }
}

impl From<NormalizeError> for ResolveError {
    fn from(err: NormalizeError) -> Self {
        Self::MalformedProviderResponse {
            provider: err.provider(),
            message: err.to_string(),
        }
    }
}

impl From<sea_orm::DbErr> for ResolveError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::PersistenceFailure(err.to_string())
    }
}

/// The narrow contract callers (HTTP handlers, CLI) use: query in, records out.
///
/// # Examples
///
/// ```rust,ignore
/// use city_explorer::services::{QueryResolver, ResolveError};
/// use city_explorer::domain::LocationRef;
/// use std::sync::Arc;
///
/// async fn example(resolver: Arc<dyn QueryResolver>) -> Result<(), ResolveError> {
///     let location = resolver.resolve_location("Seattle, WA").await?;
///     let id = location.id.expect("resolved locations carry their id");
///     let _days = resolver.resolve_weather(LocationRef::stored(id)).await?;
///     Ok(())
/// }
/// ```
#[async_trait::async_trait]
pub trait QueryResolver: Send + Sync {
    /// Returns the stored location for `query`, geocoding and storing it on a miss.
    ///
    /// The returned record always carries its store-assigned id.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::ProviderUnavailable`] if the geocoder cannot be reached
    /// - [`ResolveError::MalformedProviderResponse`] if it returns no usable result
    /// - [`ResolveError::PersistenceFailure`] if the lookup or insert fails
    async fn resolve_location(&self, query: &str) -> Result<Location, ResolveError>;

    /// Returns stored forecasts for `LocationRef::Stored`, or fetches, stores and
    /// returns a fresh multi-day forecast for `LocationRef::Coordinates`.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`QueryResolver::resolve_location`].
    async fn resolve_weather(&self, location: LocationRef)
    -> Result<Vec<DayForecast>, ResolveError>;

    /// Returns stored events, or fetches, truncates, stores and returns nearby events.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`QueryResolver::resolve_location`].
    async fn resolve_events(&self, location: LocationRef)
    -> Result<Vec<EventSummary>, ResolveError>;
}
