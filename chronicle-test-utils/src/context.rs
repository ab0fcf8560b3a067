//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder` once setup has run. The
//! context owns an in-memory SQLite database and an in-memory session, which is enough to
//! drive repositories, services and controllers without any external services.

use std::sync::Arc;

use sea_orm::{
    sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    QueryOrder,
};
use tower_sessions::{MemoryStore, Session};

use crate::{
    error::TestError,
    model::{AuditLogModel, ChangeRequestModel, SourceModel},
};

/// Test context structure returned by `TestBuilder`
///
/// # Usage
///
/// Most users should create this via [`TestBuilder`](crate::TestBuilder) rather
/// than constructing it directly.
///
/// ```ignore
/// let test = TestBuilder::new().with_source_tables().build().await?;
///
/// let source = test.source().insert_source("Annals of Tacitus").await?;
/// let user = test.user().insert_user("moderator", role::MODERATOR).await?;
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// Session backed by an in-memory store
    pub session: Session,
}

impl TestContext {
    /// Convert the database connection into any type that can be constructed from it
    ///
    /// This allows conversion to AppState without creating a circular dependency
    /// between the test-utils crate and the main chronicle crate.
    ///
    /// ```ignore
    /// let app_state: AppState = test.to_app_state();
    /// ```
    pub fn to_app_state<T>(&self) -> T
    where
        T: From<DatabaseConnection>,
    {
        T::from(self.db.clone())
    }

    /// Create a new test context with an empty in-memory database.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context
    /// - `Err(TestError::DbErr)` - Database connection failed
    pub(crate) async fn new() -> Result<Self, TestError> {
        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext { db, session })
    }

    /// Create database tables from schema statements.
    ///
    /// # Arguments
    /// - `stmts` - CREATE TABLE statements, executed in order
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// All audit log rows, oldest first.
    pub async fn audit_log(&self) -> Result<Vec<AuditLogModel>, TestError> {
        Ok(entity::prelude::AuditLog::find()
            .order_by_asc(entity::audit_log::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// All change request rows, oldest first.
    pub async fn change_requests(&self) -> Result<Vec<ChangeRequestModel>, TestError> {
        Ok(entity::prelude::SourceChangeRequest::find()
            .order_by_asc(entity::source_change_request::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// All source rows ordered by ID.
    pub async fn sources(&self) -> Result<Vec<SourceModel>, TestError> {
        Ok(entity::prelude::Source::find()
            .order_by_asc(entity::source::Column::Id)
            .all(&self.db)
            .await?)
    }
}
