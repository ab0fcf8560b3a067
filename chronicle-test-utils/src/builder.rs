//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining multiple configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use chrono::NaiveDate;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, fixtures::factory, model::SourceModel, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables and
/// fixtures. Methods can be chained together and finalized with `build()`.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_source_tables: bool,

    // Database fixtures to insert
    users: Vec<(String, i32)>,   // (username, role_level)
    sources: Vec<SourceModel>,   // inserted without their IDs
    events: Vec<(String, Option<NaiveDate>)>,
    links: Vec<(i32, i32)>, // (source_id, event_id)
}

impl TestBuilder {
    /// Create a new TestBuilder.
    ///
    /// Initializes an empty builder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_source_tables: false,
            users: Vec::new(),
            sources: Vec::new(),
            events: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Add every table the source subsystem uses to the test database.
    ///
    /// Creates AppUser, Source, Event, SourceEvent, SourceChangeRequest and AuditLog, in an
    /// order that satisfies their foreign keys.
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_source_tables(mut self) -> Self {
        self.include_source_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    /// Chain multiple calls to add multiple tables.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use chronicle_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), chronicle_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Source)
    ///     .with_table(Event)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a user with the given role level.
    ///
    /// Users are inserted in the order they are queued, so the first user gets ID 1.
    pub fn with_user(mut self, username: impl Into<String>, role_level: i32) -> Self {
        self.users.push((username.into(), role_level));
        self
    }

    /// Insert a source with only a name set.
    pub fn with_source(mut self, name: impl Into<String>) -> Self {
        self.sources.push(factory::source(name));
        self
    }

    /// Insert a fully specified source, typically built with the [`factory`] helpers.
    ///
    /// The model's `id` is ignored, the database assigns one.
    pub fn with_source_model(mut self, source: SourceModel) -> Self {
        self.sources.push(source);
        self
    }

    /// Insert an event.
    pub fn with_event(mut self, name: impl Into<String>, event_date: Option<NaiveDate>) -> Self {
        self.events.push((name.into(), event_date));
        self
    }

    /// Link a source to an event, both referenced by their database IDs.
    ///
    /// Links are inserted after all sources and events.
    pub fn with_link(mut self, source_id: i32, event_id: i32) -> Self {
        self.links.push((source_id, event_id));
        self
    }

    /// Build the test setup by creating all configured tables and fixtures.
    ///
    /// Executes all queued operations in the following order:
    /// 1. Creates database tables (source tables if specified, then custom tables)
    /// 2. Inserts fixtures (users, sources, events, then source/event links)
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_source_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::AppUser),
                schema.create_table_from_entity(entity::prelude::Source),
                schema.create_table_from_entity(entity::prelude::Event),
                schema.create_table_from_entity(entity::prelude::SourceEvent),
                schema.create_table_from_entity(entity::prelude::SourceChangeRequest),
                schema.create_table_from_entity(entity::prelude::AuditLog),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert database fixtures
        for (username, role_level) in self.users {
            setup.user().insert_user(&username, role_level).await?;
        }

        for source in self.sources {
            setup.source().insert_source_model(source).await?;
        }

        for (name, event_date) in self.events {
            setup.event().insert_event(&name, event_date).await?;
        }

        for (source_id, event_id) in self.links {
            setup.event().link_source(source_id, event_id).await?;
        }

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
