use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "source_change_request")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// One of `create`, `update` or `delete`
    pub kind: String,
    /// Target source, absent for `create` requests
    pub source_id: Option<i32>,
    pub requester_id: i32,
    pub name: Option<String>,
    pub author: Option<String>,
    pub source_type: Option<String>,
    pub publication_date: Option<Date>,
    pub url: Option<String>,
    pub reason: Option<String>,
    pub status: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
