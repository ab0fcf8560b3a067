use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    error::TestError,
    model::{EventModel, SourceEventModel},
    TestContext,
};

impl TestContext {
    pub fn event<'a>(&'a self) -> EventFixtures<'a> {
        EventFixtures { setup: self }
    }
}

pub struct EventFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> EventFixtures<'a> {
    pub async fn insert_event(
        &self,
        name: &str,
        event_date: Option<NaiveDate>,
    ) -> Result<EventModel, TestError> {
        Ok(
            entity::prelude::Event::insert(entity::event::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                event_date: ActiveValue::Set(event_date),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Links an existing source to an existing event.
    pub async fn link_source(
        &self,
        source_id: i32,
        event_id: i32,
    ) -> Result<SourceEventModel, TestError> {
        Ok(
            entity::prelude::SourceEvent::insert(entity::source_event::ActiveModel {
                source_id: ActiveValue::Set(source_id),
                event_id: ActiveValue::Set(event_id),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
