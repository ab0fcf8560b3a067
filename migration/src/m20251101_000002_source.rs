use sea_orm_migration::{prelude::*, schema::*};

static IDX_SOURCE_NAME: &str = "idx-source-name";
static IDX_SOURCE_AUTHOR: &str = "idx-source-author";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Source::Table)
                    .if_not_exists()
                    .col(pk_auto(Source::Id))
                    .col(string_len(Source::Name, 200))
                    .col(string_len_null(Source::Author, 100))
                    .col(string_len_null(Source::SourceType, 50))
                    .col(date_null(Source::PublicationDate))
                    .col(string_len_null(Source::Url, 500))
                    .col(timestamp(Source::CreatedAt))
                    .col(timestamp(Source::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SOURCE_NAME)
                    .table(Source::Table)
                    .col(Source::Name)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_SOURCE_AUTHOR)
                    .table(Source::Table)
                    .col(Source::Author)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SOURCE_AUTHOR)
                    .table(Source::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_SOURCE_NAME)
                    .table(Source::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Source::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Source {
    Table,
    Id,
    Name,
    Author,
    SourceType,
    PublicationDate,
    Url,
    CreatedAt,
    UpdatedAt,
}
