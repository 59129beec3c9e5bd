use crate::domain::LocationId;
use crate::entities::{prelude::*, weather};
use crate::models::DayForecast;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct WeatherRepository {
    conn: DatabaseConnection,
}

impl WeatherRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Stored forecasts for a location, in insertion order.
    pub async fn find_by_location_id(&self, id: LocationId) -> anyhow::Result<Vec<DayForecast>> {
        let rows = Weather::find()
            .filter(weather::Column::LocationId.eq(id.value()))
            .order_by_asc(weather::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|m| DayForecast {
                location_id: Some(LocationId::new(m.location_id)),
                forecast: m.forecast,
                time: m.time_string,
            })
            .collect())
    }

    /// Stores one day under `location_id`, replacing the forecast text of a
    /// row already stored for the same day.
    pub async fn upsert(&self, location_id: LocationId, day: &DayForecast) -> anyhow::Result<()> {
        let active_model = weather::ActiveModel {
            location_id: Set(location_id.value()),
            forecast: Set(day.forecast.clone()),
            time_string: Set(day.time.clone()),
            ..Default::default()
        };

        Weather::insert(active_model)
            .on_conflict(
                OnConflict::columns([weather::Column::LocationId, weather::Column::TimeString])
                    .update_column(weather::Column::Forecast)
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }
}
