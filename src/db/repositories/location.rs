use crate::domain::LocationId;
use crate::entities::{location, prelude::*};
use crate::models::Location as LocationRecord;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

pub struct LocationRepository {
    conn: DatabaseConnection,
}

impl LocationRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: location::Model) -> LocationRecord {
        LocationRecord {
            id: Some(LocationId::new(model.id)),
            search_query: model.search_query,
            formatted_query: model.formatted_query,
            latitude: model.latitude,
            longitude: model.longitude,
        }
    }

    /// Exact, case-sensitive match on the text the location was first searched with.
    /// When several rows share a query the oldest one wins.
    pub async fn find_by_search_query(&self, query: &str) -> anyhow::Result<Option<LocationRecord>> {
        let row = Location::find()
            .filter(location::Column::SearchQuery.eq(query))
            .order_by_asc(location::Column::Id)
            .one(&self.conn)
            .await?;

        Ok(row.map(Self::map_model))
    }

    pub async fn get(&self, id: LocationId) -> anyhow::Result<Option<LocationRecord>> {
        let row = Location::find_by_id(id.value()).one(&self.conn).await?;
        Ok(row.map(Self::map_model))
    }

    /// Inserts the record and returns the id assigned by the database.
    pub async fn insert(&self, record: &LocationRecord) -> anyhow::Result<LocationId> {
        let active_model = location::ActiveModel {
            search_query: Set(record.search_query.clone()),
            formatted_query: Set(record.formatted_query.clone()),
            latitude: Set(record.latitude),
            longitude: Set(record.longitude),
            ..Default::default()
        };

        let result = Location::insert(active_model).exec(&self.conn).await?;
        let id = LocationId::new(result.last_insert_id);

        info!(
            "Stored location {} for query {:?}",
            id, record.search_query
        );
        Ok(id)
    }
}
