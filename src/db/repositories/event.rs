use crate::domain::LocationId;
use crate::entities::{event, prelude::*};
use crate::models::EventSummary;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

pub struct EventRepository {
    conn: DatabaseConnection,
}

impl EventRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn find_by_location_id(&self, id: LocationId) -> anyhow::Result<Vec<EventSummary>> {
        let rows = Event::find()
            .filter(event::Column::LocationId.eq(id.value()))
            .order_by_asc(event::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|m| EventSummary {
                location_id: Some(LocationId::new(m.location_id)),
                link: m.link,
                name: m.event_name,
                event_date: m.event_date,
                summary: m.summary,
            })
            .collect())
    }

    /// Stores one event under `location_id`.
    ///
    /// An event already stored for the same location and link is overwritten
    /// with the fresh name, date and summary.
    pub async fn upsert(&self, location_id: LocationId, item: &EventSummary) -> anyhow::Result<()> {
        let active_model = event::ActiveModel {
            location_id: Set(location_id.value()),
            link: Set(item.link.clone()),
            event_name: Set(item.name.clone()),
            event_date: Set(item.event_date.clone()),
            summary: Set(item.summary.clone()),
            ..Default::default()
        };

        Event::insert(active_model)
            .on_conflict(
                OnConflict::columns([event::Column::LocationId, event::Column::Link])
                    .update_columns([
                        event::Column::EventName,
                        event::Column::EventDate,
                        event::Column::Summary,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }
}
