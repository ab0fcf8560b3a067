use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_app_user::AppUser;

static IDX_CHANGE_REQUEST_STATUS: &str = "idx-source_change_request-status";
static FK_CHANGE_REQUEST_REQUESTER_ID: &str = "fk-source_change_request-requester_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SourceChangeRequest::Table)
                    .if_not_exists()
                    .col(pk_auto(SourceChangeRequest::Id))
                    .col(string_len(SourceChangeRequest::Kind, 16))
                    // Not a foreign key, the request outlives a deleted target
                    .col(integer_null(SourceChangeRequest::SourceId))
                    .col(integer(SourceChangeRequest::RequesterId))
                    .col(string_len_null(SourceChangeRequest::Name, 200))
                    .col(string_len_null(SourceChangeRequest::Author, 100))
                    .col(string_len_null(SourceChangeRequest::SourceType, 50))
                    .col(date_null(SourceChangeRequest::PublicationDate))
                    .col(string_len_null(SourceChangeRequest::Url, 500))
                    .col(text_null(SourceChangeRequest::Reason))
                    .col(string_len(SourceChangeRequest::Status, 16))
                    .col(timestamp(SourceChangeRequest::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CHANGE_REQUEST_STATUS)
                    .table(SourceChangeRequest::Table)
                    .col(SourceChangeRequest::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_CHANGE_REQUEST_REQUESTER_ID)
                    .from_tbl(SourceChangeRequest::Table)
                    .from_col(SourceChangeRequest::RequesterId)
                    .to_tbl(AppUser::Table)
                    .to_col(AppUser::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_CHANGE_REQUEST_REQUESTER_ID)
                    .table(SourceChangeRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CHANGE_REQUEST_STATUS)
                    .table(SourceChangeRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SourceChangeRequest::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum SourceChangeRequest {
    Table,
    Id,
    Kind,
    SourceId,
    RequesterId,
    Name,
    Author,
    SourceType,
    PublicationDate,
    Url,
    Reason,
    Status,
    CreatedAt,
}
