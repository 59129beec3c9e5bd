use crate::domain::LocationId;
use crate::models::{DayForecast, EventSummary, Location};
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// Persistence gateway over the `location`, `weather` and `event` tables.
///
/// Cloning is cheap: every clone shares the same connection pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if let Some(path_str) = sqlite_file_path(db_url) {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file: {path_str}"))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn location_repo(&self) -> repositories::location::LocationRepository {
        repositories::location::LocationRepository::new(self.conn.clone())
    }

    fn weather_repo(&self) -> repositories::weather::WeatherRepository {
        repositories::weather::WeatherRepository::new(self.conn.clone())
    }

    fn event_repo(&self) -> repositories::event::EventRepository {
        repositories::event::EventRepository::new(self.conn.clone())
    }

    pub async fn find_location_by_search_query(&self, query: &str) -> Result<Option<Location>> {
        self.location_repo().find_by_search_query(query).await
    }

    pub async fn get_location(&self, id: LocationId) -> Result<Option<Location>> {
        self.location_repo().get(id).await
    }

    pub async fn insert_location(&self, location: &Location) -> Result<LocationId> {
        self.location_repo().insert(location).await
    }

    pub async fn find_forecasts_by_location_id(&self, id: LocationId) -> Result<Vec<DayForecast>> {
        self.weather_repo().find_by_location_id(id).await
    }

    pub async fn upsert_forecast(&self, location_id: LocationId, day: &DayForecast) -> Result<()> {
        self.weather_repo().upsert(location_id, day).await
    }

    pub async fn find_events_by_location_id(&self, id: LocationId) -> Result<Vec<EventSummary>> {
        self.event_repo().find_by_location_id(id).await
    }

    pub async fn upsert_event(&self, location_id: LocationId, event: &EventSummary) -> Result<()> {
        self.event_repo().upsert(location_id, event).await
    }
}

/// File path of an on-disk SQLite URL; `None` for in-memory and non-SQLite URLs.
fn sqlite_file_path(db_url: &str) -> Option<&str> {
    let path = db_url.strip_prefix("sqlite:")?;
    let path = path.trim_start_matches("//");
    let path = path.split('?').next().unwrap_or(path);

    if path.is_empty() || path.contains(":memory:") || path.starts_with("file:") {
        None
    } else {
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_paths_are_extracted() {
        assert_eq!(
            sqlite_file_path("sqlite:data/city_explorer.db"),
            Some("data/city_explorer.db")
        );
        assert_eq!(
            sqlite_file_path("sqlite://data/app.db?mode=rwc"),
            Some("data/app.db")
        );
    }

    #[test]
    fn memory_and_remote_urls_are_skipped() {
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/city"), None);
    }

    #[tokio::test]
    async fn in_memory_store_migrates_and_pings() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        store.ping().await.unwrap();
        assert!(
            store
                .find_location_by_search_query("anything")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn repeated_forecast_day_replaces_the_stored_text() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let id = store
            .insert_location(&Location {
                id: None,
                search_query: "Lynnwood".to_string(),
                formatted_query: "Lynnwood, WA, USA".to_string(),
                latitude: 47.82,
                longitude: -122.31,
            })
            .await
            .unwrap();

        let day = DayForecast {
            location_id: Some(id),
            forecast: "Drizzle.".to_string(),
            time: "Sat Dec 22 2018".to_string(),
        };

        store.upsert_forecast(id, &day).await.unwrap();
        let updated = DayForecast {
            forecast: "Clear.".to_string(),
            ..day
        };
        store.upsert_forecast(id, &updated).await.unwrap();

        let stored = store.find_forecasts_by_location_id(id).await.unwrap();
        assert_eq!(stored, vec![updated]);
    }

    #[tokio::test]
    async fn rows_for_unknown_location_are_rejected() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let event = EventSummary {
            location_id: None,
            link: "https://example.com/e/1".to_string(),
            name: "Orphan".to_string(),
            event_date: "Sat Dec 22 2018".to_string(),
            summary: String::new(),
        };

        assert!(store.upsert_event(LocationId::new(999), &event).await.is_err());
    }
}
