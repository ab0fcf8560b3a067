use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, fixtures::factory, model::SourceModel, TestContext};

impl TestContext {
    pub fn source<'a>(&'a self) -> SourceFixtures<'a> {
        SourceFixtures { setup: self }
    }
}

pub struct SourceFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> SourceFixtures<'a> {
    /// Inserts a source with only a name set.
    pub async fn insert_source(&self, name: &str) -> Result<SourceModel, TestError> {
        self.insert_source_model(factory::source(name)).await
    }

    /// Inserts every field of `source` except its `id`.
    pub async fn insert_source_model(&self, source: SourceModel) -> Result<SourceModel, TestError> {
        Ok(
            entity::prelude::Source::insert(entity::source::ActiveModel {
                name: ActiveValue::Set(source.name),
                author: ActiveValue::Set(source.author),
                source_type: ActiveValue::Set(source.source_type),
                publication_date: ActiveValue::Set(source.publication_date),
                url: ActiveValue::Set(source.url),
                created_at: ActiveValue::Set(source.created_at),
                updated_at: ActiveValue::Set(source.updated_at),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
