//! `SeaORM` implementation of the [`QueryResolver`] trait.
//!
//! Each call performs at most one provider request and a handful of
//! sequential store calls. There is no locking and no de-duplication of
//! concurrent identical queries: two simultaneous misses for the same query
//! both fetch and both insert.

use crate::clients::ProviderGateway;
use crate::config::ResolverConfig;
use crate::db::Store;
use crate::domain::{LocationId, LocationRef, QueryKind};
use crate::models::{DayForecast, EventSummary, Location};
use crate::normalize::{normalize_events, normalize_forecast, normalize_location};
use crate::services::resolver::{QueryResolver, ResolveError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// SeaORM-backed [`QueryResolver`].
pub struct SeaOrmResolver {
    store: Store,
    gateway: Arc<dyn ProviderGateway>,
    config: ResolverConfig,
}

impl SeaOrmResolver {
    #[must_use]
    pub fn new(store: Store, gateway: Arc<dyn ProviderGateway>, config: ResolverConfig) -> Self {
        Self {
            store,
            gateway,
            config,
        }
    }

    fn record_hit(kind: QueryKind) {
        metrics::counter!("resolver_cache_hits_total", "kind" => kind.as_str()).increment(1);
    }

    fn record_miss(kind: QueryKind) {
        metrics::counter!("resolver_cache_misses_total", "kind" => kind.as_str()).increment(1);
    }

    /// Decides what a batch of failed row inserts means for the request.
    ///
    /// Under the default best-effort policy the failures are logged and
    /// counted and the fetched rows are still returned.
    fn settle_persistence(
        &self,
        kind: QueryKind,
        location_id: LocationId,
        failures: Vec<anyhow::Error>,
    ) -> Result<(), ResolveError> {
        let Some(first) = failures.first() else {
            return Ok(());
        };

        metrics::counter!("resolver_persistence_failures_total", "kind" => kind.as_str())
            .increment(failures.len() as u64);

        warn!(
            kind = %kind,
            location_id = %location_id,
            failed_rows = failures.len(),
            error = %first,
            "Failed to store fetched rows"
        );

        if self.config.strict_persistence {
            Err(ResolveError::persistence(first))
        } else {
            Ok(())
        }
    }

    async fn store_forecasts(
        &self,
        location_id: LocationId,
        days: &[DayForecast],
    ) -> Result<(), ResolveError> {
        let mut stored = 0usize;
        let mut failures = Vec::new();

        for day in days {
            match self.store.upsert_forecast(location_id, day).await {
                Ok(()) => stored += 1,
                Err(e) => failures.push(e),
            }
        }

        debug!(
            "Stored {}/{} forecast rows for location {}",
            stored,
            days.len(),
            location_id
        );
        self.settle_persistence(QueryKind::Weather, location_id, failures)
    }

    async fn store_events(
        &self,
        location_id: LocationId,
        events: &[EventSummary],
    ) -> Result<(), ResolveError> {
        let mut stored = 0usize;
        let mut failures = Vec::new();

        for event in events {
            match self.store.upsert_event(location_id, event).await {
                Ok(()) => stored += 1,
                Err(e) => failures.push(e),
            }
        }

        debug!(
            "Stored {}/{} event rows for location {}",
            stored,
            events.len(),
            location_id
        );
        self.settle_persistence(QueryKind::Events, location_id, failures)
    }
}

#[async_trait::async_trait]
impl QueryResolver for SeaOrmResolver {
    async fn resolve_location(&self, query: &str) -> Result<Location, ResolveError> {
        if let Some(cached) = self
            .store
            .find_location_by_search_query(query)
            .await
            .map_err(ResolveError::persistence)?
        {
            Self::record_hit(QueryKind::Location);
            debug!("Location cache hit for {:?}", query);
            return Ok(cached);
        }

        Self::record_miss(QueryKind::Location);
        info!("Location cache miss for {:?}, geocoding", query);

        let payload = self.gateway.geocode(query).await?;
        let location = normalize_location(query, &payload)?;

        let id = self
            .store
            .insert_location(&location)
            .await
            .map_err(ResolveError::persistence)?;

        Ok(location.with_id(id))
    }

    async fn resolve_weather(
        &self,
        location: LocationRef,
    ) -> Result<Vec<DayForecast>, ResolveError> {
        let (coordinates, owner) = match location {
            LocationRef::Stored(id) => {
                Self::record_hit(QueryKind::Weather);
                return self
                    .store
                    .find_forecasts_by_location_id(id)
                    .await
                    .map_err(ResolveError::persistence);
            }
            LocationRef::Coordinates {
                coordinates,
                location_id,
            } => (coordinates, location_id),
        };

        Self::record_miss(QueryKind::Weather);
        info!("Fetching forecast for {}", coordinates);

        let payload = self.gateway.forecast(coordinates).await?;
        let days = normalize_forecast(&payload, owner)?;

        match owner {
            Some(id) => self.store_forecasts(id, &days).await?,
            None => warn!(
                "Forecast for {} has no owning location; returning without storing",
                coordinates
            ),
        }

        Ok(days)
    }

    async fn resolve_events(
        &self,
        location: LocationRef,
    ) -> Result<Vec<EventSummary>, ResolveError> {
        let (coordinates, owner) = match location {
            LocationRef::Stored(id) => {
                Self::record_hit(QueryKind::Events);
                return self
                    .store
                    .find_events_by_location_id(id)
                    .await
                    .map_err(ResolveError::persistence);
            }
            LocationRef::Coordinates {
                coordinates,
                location_id,
            } => (coordinates, location_id),
        };

        Self::record_miss(QueryKind::Events);
        info!("Fetching events near {}", coordinates);

        let payload = self.gateway.events(coordinates).await?;
        let events = normalize_events(&payload, owner, self.config.event_limit)?;

        match owner {
            Some(id) => self.store_events(id, &events).await?,
            None => warn!(
                "Events near {} have no owning location; returning without storing",
                coordinates
            ),
        }

        Ok(events)
    }
}
