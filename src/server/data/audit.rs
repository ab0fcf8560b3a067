use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::server::{data::contract::AuditRepository, model::audit::AuditEntry};

pub struct DbAuditRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DbAuditRepository<'a> {
    /// Creates a new instance of [`DbAuditRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<'a> AuditRepository for DbAuditRepository<'a> {
    async fn log_action(&self, entry: &AuditEntry) -> Result<(), DbErr> {
        let log = entity::audit_log::ActiveModel {
            actor_id: ActiveValue::Set(entry.actor_id),
            action: ActiveValue::Set(entry.action.as_str().to_string()),
            entity_type: ActiveValue::Set(entry.entity_type.map(str::to_string)),
            entity_id: ActiveValue::Set(entry.entity_id),
            description: ActiveValue::Set(entry.description.clone()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        log.insert(self.db).await?;

        Ok(())
    }
}
