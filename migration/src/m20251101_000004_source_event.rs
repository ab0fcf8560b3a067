use sea_orm_migration::{prelude::*, schema::*};

use crate::{m20251101_000002_source::Source, m20251101_000003_event::Event};

static IDX_SOURCE_EVENT_PAIR: &str = "idx-source_event-source_id-event_id";
static IDX_SOURCE_EVENT_EVENT_ID: &str = "idx-source_event-event_id";
static FK_SOURCE_EVENT_SOURCE_ID: &str = "fk-source_event-source_id";
static FK_SOURCE_EVENT_EVENT_ID: &str = "fk-source_event-event_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SourceEvent::Table)
                    .if_not_exists()
                    .col(pk_auto(SourceEvent::Id))
                    .col(integer(SourceEvent::SourceId))
                    .col(integer(SourceEvent::EventId))
                    .col(timestamp(SourceEvent::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SOURCE_EVENT_PAIR)
                    .table(SourceEvent::Table)
                    .col(SourceEvent::SourceId)
                    .col(SourceEvent::EventId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SOURCE_EVENT_EVENT_ID)
                    .table(SourceEvent::Table)
                    .col(SourceEvent::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SOURCE_EVENT_SOURCE_ID)
                    .from_tbl(SourceEvent::Table)
                    .from_col(SourceEvent::SourceId)
                    .to_tbl(Source::Table)
                    .to_col(Source::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_SOURCE_EVENT_EVENT_ID)
                    .from_tbl(SourceEvent::Table)
                    .from_col(SourceEvent::EventId)
                    .to_tbl(Event::Table)
                    .to_col(Event::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_SOURCE_EVENT_EVENT_ID)
                    .table(SourceEvent::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_SOURCE_EVENT_SOURCE_ID)
                    .table(SourceEvent::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SOURCE_EVENT_EVENT_ID)
                    .table(SourceEvent::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SOURCE_EVENT_PAIR)
                    .table(SourceEvent::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SourceEvent::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum SourceEvent {
    Table,
    Id,
    SourceId,
    EventId,
    CreatedAt,
}
