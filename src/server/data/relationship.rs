use std::collections::BTreeMap;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};

use crate::server::{
    data::contract::RelationshipRepository,
    model::source::{RelationshipsSummary, EVENTS_RELATION, SOURCE_ENTITY},
};

pub struct DbRelationshipRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DbRelationshipRepository<'a> {
    /// Creates a new instance of [`DbRelationshipRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<'a> RelationshipRepository for DbRelationshipRepository<'a> {
    /// Counts related entities per relation kind.
    ///
    /// Sources currently relate to events only, any other entity type yields an empty summary.
    async fn get_relationships_summary(
        &self,
        entity_type: &str,
        entity_id: i32,
    ) -> Result<RelationshipsSummary, DbErr> {
        let mut relationships = BTreeMap::new();

        if entity_type == SOURCE_ENTITY {
            let events = entity::prelude::SourceEvent::find()
                .filter(entity::source_event::Column::SourceId.eq(entity_id))
                .count(self.db)
                .await?;
            relationships.insert(EVENTS_RELATION.to_string(), events);
        }

        Ok(RelationshipsSummary { relationships })
    }
}
