//! Data access layer repositories.
//!
//! The service layer depends on the traits in [`contract`]; each sibling module provides the
//! SeaORM implementation of one of them. [`DbRepositories`] bundles all four over a single
//! connection for request handlers.

pub mod audit;
pub mod contract;
pub mod relationship;
pub mod role;
pub mod source;

use sea_orm::DatabaseConnection;

use crate::server::service::{moderation::ModerationPolicy, source::SourceService};

use self::{
    audit::DbAuditRepository, relationship::DbRelationshipRepository, role::DbRoleRepository,
    source::DbSourceRepository,
};

/// SeaORM repositories sharing one connection.
pub struct DbRepositories<'a> {
    pub sources: DbSourceRepository<'a>,
    pub relationships: DbRelationshipRepository<'a>,
    pub roles: DbRoleRepository<'a>,
    pub audit: DbAuditRepository<'a>,
}

impl<'a> DbRepositories<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            sources: DbSourceRepository::new(db),
            relationships: DbRelationshipRepository::new(db),
            roles: DbRoleRepository::new(db),
            audit: DbAuditRepository::new(db),
        }
    }

    /// Source service reading and writing through these repositories.
    pub fn source_service<'s>(&'s self, policy: &'s ModerationPolicy) -> SourceService<'s> {
        SourceService::new(
            &self.sources,
            &self.relationships,
            &self.roles,
            &self.audit,
            policy,
        )
    }
}
