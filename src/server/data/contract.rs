//! Repository traits the source service is written against.
//!
//! The service only ever sees these traits, so any storage can back it. The SeaORM
//! implementations in the sibling modules are what the application wires up.

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::server::model::{
    audit::AuditEntry,
    db::SourceModel,
    source::{
        AuthorCount, DuplicatePair, EventSummary, Page, RelationshipsSummary, SourceQuery,
        SourceSummary, UrlIssue, ValidSource,
    },
};

/// Source storage, queries and change-request queue.
#[async_trait]
pub trait SourceRepository: Send + Sync {
    /// Filtered, sorted and paginated listing.
    async fn get_sources(&self, query: &SourceQuery) -> Result<Page<SourceSummary>, DbErr>;

    async fn get_by_id(&self, source_id: i32) -> Result<Option<SourceModel>, DbErr>;

    /// Events linked to the source, by event date then ID, at most `limit`.
    async fn get_source_events(
        &self,
        source_id: i32,
        limit: u64,
    ) -> Result<Vec<EventSummary>, DbErr>;

    /// Every whitespace-separated term of `text` must match name, author, type or URL.
    async fn search_fulltext(
        &self,
        text: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Page<SourceSummary>, DbErr>;

    /// Distinct non-empty source types in ascending order.
    async fn get_source_types(&self) -> Result<Vec<String>, DbErr>;

    /// Authors credited on at least `min_count` sources, most prolific first.
    async fn get_source_authors(
        &self,
        min_count: u64,
        offset: u64,
        limit: u64,
    ) -> Result<Page<AuthorCount>, DbErr>;

    async fn check_urls(&self) -> Result<Vec<UrlIssue>, DbErr>;

    async fn find_duplicates(&self) -> Result<Vec<DuplicatePair>, DbErr>;

    /// Queues a create request, returning the change request ID.
    async fn request_create(&self, requester_id: i32, data: &ValidSource) -> Result<i32, DbErr>;

    /// Queues an update request, returning the change request ID.
    async fn request_update(
        &self,
        requester_id: i32,
        source_id: i32,
        data: &ValidSource,
    ) -> Result<i32, DbErr>;

    /// Queues a delete request, returning the change request ID.
    async fn request_delete(
        &self,
        requester_id: i32,
        source_id: i32,
        reason: Option<&str>,
    ) -> Result<i32, DbErr>;

    /// Inserts a source, returning its ID.
    async fn create_direct(&self, data: &ValidSource) -> Result<i32, DbErr>;

    /// Overwrites every field of a source, `Ok(None)` if it doesn't exist.
    async fn update_direct(
        &self,
        source_id: i32,
        data: &ValidSource,
    ) -> Result<Option<SourceModel>, DbErr>;

    /// Deletes a source with its event links, `Ok(false)` if it doesn't exist.
    async fn delete_direct(&self, source_id: i32) -> Result<bool, DbErr>;

    async fn event_exists(&self, event_id: i32) -> Result<bool, DbErr>;

    /// Links a source to an event, `Ok(false)` if already linked.
    async fn link_event(&self, source_id: i32, event_id: i32) -> Result<bool, DbErr>;

    /// Removes a source/event link, `Ok(false)` if there was none.
    async fn unlink_event(&self, source_id: i32, event_id: i32) -> Result<bool, DbErr>;
}

/// Counts of entities related to a given entity.
#[async_trait]
pub trait RelationshipRepository: Send + Sync {
    async fn get_relationships_summary(
        &self,
        entity_type: &str,
        entity_id: i32,
    ) -> Result<RelationshipsSummary, DbErr>;
}

/// Role level lookup for acting users.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// `Ok(None)` when the user is unknown.
    async fn get_role_level(&self, user_id: i32) -> Result<Option<i32>, DbErr>;
}

/// Write-only audit trail.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    async fn log_action(&self, entry: &AuditEntry) -> Result<(), DbErr>;
}
