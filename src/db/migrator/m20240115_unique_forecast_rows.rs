use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        // Collapse rows accumulated by repeated fetches before enforcing uniqueness.
        conn.execute_unprepared(
            "DELETE FROM weather WHERE id NOT IN (SELECT MIN(id) FROM weather GROUP BY location_id, time_string)",
        )
        .await?;

        conn.execute_unprepared(
            "DELETE FROM event WHERE id NOT IN (SELECT MIN(id) FROM event GROUP BY location_id, link)",
        )
        .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_weather_location_time_unique")
                    .table(Weather::Table)
                    .col(Weather::LocationId)
                    .col(Weather::TimeString)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_location_link_unique")
                    .table(Event::Table)
                    .col(Event::LocationId)
                    .col(Event::Link)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_event_location_link_unique")
                    .table(Event::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_weather_location_time_unique")
                    .table(Weather::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Weather {
    Table,
    LocationId,
    TimeString,
}

#[derive(DeriveIden)]
enum Event {
    Table,
    LocationId,
    Link,
}
