use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub event_date: Option<Date>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::source_event::Entity")]
    SourceEvent,
}

impl Related<super::source_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SourceEvent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
