use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

use crate::server::data::contract::RoleRepository;

pub struct DbRoleRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DbRoleRepository<'a> {
    /// Creates a new instance of [`DbRoleRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<'a> RoleRepository for DbRoleRepository<'a> {
    async fn get_role_level(&self, user_id: i32) -> Result<Option<i32>, DbErr> {
        Ok(entity::prelude::AppUser::find_by_id(user_id)
            .one(self.db)
            .await?
            .map(|user| user.role_level))
    }
}
