use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "source")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub author: Option<String>,
    pub source_type: Option<String>,
    pub publication_date: Option<Date>,
    pub url: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
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
