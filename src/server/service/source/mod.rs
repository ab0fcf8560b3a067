//! Source service.
//!
//! Orchestrates every source operation: the acting user's role is resolved and checked against
//! the [`ModerationPolicy`] first, then entity existence, then input validation, and only then
//! is the repository written. Each successful operation records exactly one audit entry.

pub mod validation;

#[cfg(test)]
mod tests;

use chrono::{NaiveDate, Utc};

use crate::server::{
    data::contract::{AuditRepository, RelationshipRepository, RoleRepository, SourceRepository},
    error::{access::AccessError, entity::EntityError, validation::ValidationError, Error},
    model::{
        audit::{AuditAction, AuditEntry},
        db::SourceModel,
        source::{
            AuthorCount, DuplicatePair, Page, SourceDetails, SourceFilters, SourceInput,
            SourceQuery, SourceSummary, UrlIssue, ValidSource, WriteOutcome, EVENT_ENTITY,
            SOURCE_ENTITY,
        },
    },
    service::moderation::{Decision, ModerationPolicy, UNKNOWN_ROLE_LEVEL},
    util::pagination::{
        clamp_limit, clamp_offset, AUTHORS_DEFAULT_LIMIT, AUTHORS_MAX_LIMIT, LIST_DEFAULT_LIMIT,
        LIST_MAX_LIMIT, SEARCH_DEFAULT_LIMIT, SEARCH_MAX_LIMIT,
    },
};

/// Maximum number of linked events returned with source details.
pub const DETAIL_EVENTS_LIMIT: u64 = 10;

/// Minimum length of a trimmed full-text search query, in characters.
pub const SEARCH_MIN_LEN: usize = 2;

/// Trims a filter value, mapping blank strings to `None`.
fn filter_value(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn check_year(year: Option<i32>) -> Result<(), ValidationError> {
    match year {
        Some(year) if NaiveDate::from_ymd_opt(year, 1, 1).is_none() => {
            Err(ValidationError::InvalidYear(year))
        }
        _ => Ok(()),
    }
}

fn not_found(entity_type: &'static str, id: i32) -> Error {
    EntityError::NotFound { entity_type, id }.into()
}

/// Service for reading, writing and moderating sources.
///
/// All storage access goes through the repository traits in
/// [`contract`](crate::server::data::contract).
pub struct SourceService<'a> {
    sources: &'a dyn SourceRepository,
    relationships: &'a dyn RelationshipRepository,
    roles: &'a dyn RoleRepository,
    audit: &'a dyn AuditRepository,
    policy: &'a ModerationPolicy,
}

impl<'a> SourceService<'a> {
    /// Creates a new instance of SourceService.
    ///
    /// # Arguments
    /// - `sources` - Source storage and change-request queue
    /// - `relationships` - Related entity counts
    /// - `roles` - Role level lookup for acting users
    /// - `audit` - Audit trail
    /// - `policy` - Role level thresholds
    pub fn new(
        sources: &'a dyn SourceRepository,
        relationships: &'a dyn RelationshipRepository,
        roles: &'a dyn RoleRepository,
        audit: &'a dyn AuditRepository,
        policy: &'a ModerationPolicy,
    ) -> Self {
        Self {
            sources,
            relationships,
            roles,
            audit,
            policy,
        }
    }

    /// Role level of the actor, [`UNKNOWN_ROLE_LEVEL`] if they have none.
    async fn role_of(&self, actor_id: i32) -> Result<i32, Error> {
        Ok(self
            .roles
            .get_role_level(actor_id)
            .await?
            .unwrap_or(UNKNOWN_ROLE_LEVEL))
    }

    async fn write_decision(&self, actor_id: i32) -> Result<(Decision, i32), Error> {
        let role = self.role_of(actor_id).await?;

        Ok((self.policy.decide_write(role), role))
    }

    /// Fails unless the actor may write sources directly.
    async fn require_direct_write(&self, actor_id: i32) -> Result<(), Error> {
        match self.write_decision(actor_id).await? {
            (Decision::Allowed, _) => Ok(()),
            (_, role) => Err(self.denied(actor_id, self.policy.moderator_level, role)),
        }
    }

    /// Fails unless the actor may at least submit change requests.
    async fn require_request(&self, actor_id: i32) -> Result<(), Error> {
        match self.write_decision(actor_id).await? {
            (Decision::Denied, role) => {
                Err(self.denied(actor_id, self.policy.requester_level, role))
            }
            _ => Ok(()),
        }
    }

    async fn require_admin(&self, actor_id: i32) -> Result<(), Error> {
        let role = self.role_of(actor_id).await?;

        match self.policy.decide_admin(role) {
            Decision::Allowed => Ok(()),
            _ => Err(self.denied(actor_id, self.policy.admin_level, role)),
        }
    }

    fn denied(&self, actor_id: i32, required: i32, actual: i32) -> Error {
        tracing::debug!(
            actor_id = %actor_id,
            required = required,
            actual = actual,
            "Source operation denied"
        );

        AccessError::PermissionDenied {
            actor_id,
            required,
            actual,
        }
        .into()
    }

    async fn require_source(&self, source_id: i32) -> Result<SourceModel, Error> {
        self.sources
            .get_by_id(source_id)
            .await?
            .ok_or_else(|| not_found(SOURCE_ENTITY, source_id))
    }

    fn validate(input: &SourceInput) -> Result<ValidSource, ValidationError> {
        input.normalize().validate(Utc::now().date_naive())
    }

    /// Records an audit entry, logging rather than failing if the write does not succeed.
    async fn record(&self, entry: AuditEntry) {
        if let Err(err) = self.audit.log_action(&entry).await {
            tracing::warn!(
                actor_id = %entry.actor_id,
                action = entry.action.as_str(),
                "Failed to write audit log entry: {}",
                err
            );
        }
    }

    /// Lists sources matching the filters, one page at a time.
    ///
    /// Offset is clamped to be non-negative and limit into `[1, 100]` (default 50). Blank text
    /// filters are ignored and unknown sort values have already fallen back to date descending.
    ///
    /// # Returns
    /// - `Ok(Page)` - Matching sources with event counts and the total match count
    /// - `Err(Error::ValidationError)` - `year_from` is after `year_to`, or a year is unrepresentable
    /// - `Err(Error::DbErr)` - Database query failed
    pub async fn list_sources(
        &self,
        actor_id: i32,
        filters: SourceFilters,
    ) -> Result<Page<SourceSummary>, Error> {
        check_year(filters.year_from)?;
        check_year(filters.year_to)?;
        if let (Some(from), Some(to)) = (filters.year_from, filters.year_to) {
            if from > to {
                return Err(ValidationError::InvertedYearRange { from, to }.into());
            }
        }

        let query = SourceQuery {
            offset: clamp_offset(filters.offset),
            limit: clamp_limit(filters.limit, LIST_DEFAULT_LIMIT, LIST_MAX_LIMIT),
            search_term: filter_value(filters.search_term),
            author: filter_value(filters.author),
            source_type: filter_value(filters.source_type),
            year_from: filters.year_from,
            year_to: filters.year_to,
            event_id: filters.event_id,
            has_url: filters.has_url,
            sort_by: filters.sort_by,
        };

        let page = self.sources.get_sources(&query).await?;

        tracing::debug!(
            actor_id = %actor_id,
            total = page.total_count,
            sort_by = query.sort_by.as_str(),
            "Listed sources"
        );
        self.record(AuditEntry::new(
            actor_id,
            AuditAction::SourceList,
            format!(
                "Listed {} of {} sources at offset {}",
                page.items.len(),
                page.total_count,
                page.offset
            ),
        ))
        .await;

        Ok(page)
    }

    /// Fetches a source with up to [`DETAIL_EVENTS_LIMIT`] linked events and relation counts.
    ///
    /// # Returns
    /// - `Ok(SourceDetails)` - Source found
    /// - `Err(Error::EntityError)` - No source with that ID
    /// - `Err(Error::DbErr)` - Database query failed
    pub async fn get_source_details(
        &self,
        actor_id: i32,
        source_id: i32,
    ) -> Result<SourceDetails, Error> {
        let source = self.require_source(source_id).await?;
        let events = self
            .sources
            .get_source_events(source_id, DETAIL_EVENTS_LIMIT)
            .await?;
        let relationships = self
            .relationships
            .get_relationships_summary(SOURCE_ENTITY, source_id)
            .await?;

        self.record(
            AuditEntry::new(
                actor_id,
                AuditAction::SourceView,
                format!("Viewed source '{}'", source.name),
            )
            .on(SOURCE_ENTITY, source_id),
        )
        .await;

        Ok(SourceDetails {
            source,
            events,
            relationships,
        })
    }

    /// Queues a create request for moderator review.
    ///
    /// # Returns
    /// - `Ok(i32)` - ID of the change request
    /// - `Err(Error::AccessError)` - Actor below the requester level
    /// - `Err(Error::ValidationError)` - Input failed a field rule
    pub async fn create_source_request(
        &self,
        actor_id: i32,
        input: &SourceInput,
    ) -> Result<i32, Error> {
        self.require_request(actor_id).await?;

        self.queue_create(actor_id, input).await
    }

    /// Creates a source immediately.
    ///
    /// # Returns
    /// - `Ok(i32)` - ID of the new source
    /// - `Err(Error::AccessError)` - Actor below the moderator level
    /// - `Err(Error::ValidationError)` - Input failed a field rule
    pub async fn create_source_direct(
        &self,
        actor_id: i32,
        input: &SourceInput,
    ) -> Result<i32, Error> {
        self.require_direct_write(actor_id).await?;

        self.apply_create(actor_id, input).await
    }

    /// Queues an update request for an existing source.
    ///
    /// # Returns
    /// - `Ok(i32)` - ID of the change request
    /// - `Err(Error::AccessError)` - Actor below the requester level
    /// - `Err(Error::EntityError)` - No source with that ID
    /// - `Err(Error::ValidationError)` - Input failed a field rule
    pub async fn update_source_request(
        &self,
        actor_id: i32,
        source_id: i32,
        input: &SourceInput,
    ) -> Result<i32, Error> {
        self.require_request(actor_id).await?;

        self.queue_update(actor_id, source_id, input).await
    }

    /// Overwrites an existing source immediately.
    ///
    /// # Returns
    /// - `Ok(SourceModel)` - The updated source
    /// - `Err(Error::AccessError)` - Actor below the moderator level
    /// - `Err(Error::EntityError)` - No source with that ID, checked before validation
    /// - `Err(Error::ValidationError)` - Input failed a field rule
    pub async fn update_source_direct(
        &self,
        actor_id: i32,
        source_id: i32,
        input: &SourceInput,
    ) -> Result<SourceModel, Error> {
        self.require_direct_write(actor_id).await?;

        self.apply_update(actor_id, source_id, input).await
    }

    /// Queues a delete request, with an optional reason, for an existing source.
    ///
    /// # Returns
    /// - `Ok(i32)` - ID of the change request
    /// - `Err(Error::AccessError)` - Actor below the requester level
    /// - `Err(Error::EntityError)` - No source with that ID
    pub async fn delete_source_request(
        &self,
        actor_id: i32,
        source_id: i32,
        reason: Option<&str>,
    ) -> Result<i32, Error> {
        self.require_request(actor_id).await?;

        self.queue_delete(actor_id, source_id, reason).await
    }

    /// Deletes a source and its event links immediately.
    ///
    /// # Returns
    /// - `Ok(())` - Source deleted
    /// - `Err(Error::AccessError)` - Actor below the moderator level
    /// - `Err(Error::EntityError)` - No source with that ID
    pub async fn delete_source_direct(&self, actor_id: i32, source_id: i32) -> Result<(), Error> {
        self.require_direct_write(actor_id).await?;

        self.apply_delete(actor_id, source_id).await
    }

    /// Creates a source directly or as a request, depending on the actor's role.
    pub async fn save_source(
        &self,
        actor_id: i32,
        input: &SourceInput,
    ) -> Result<WriteOutcome, Error> {
        match self.write_decision(actor_id).await? {
            (Decision::Allowed, _) => Ok(WriteOutcome::Applied(
                self.apply_create(actor_id, input).await?,
            )),
            (Decision::RequiresApproval, _) => Ok(WriteOutcome::Requested(
                self.queue_create(actor_id, input).await?,
            )),
            (Decision::Denied, role) => {
                Err(self.denied(actor_id, self.policy.requester_level, role))
            }
        }
    }

    /// Updates a source directly or as a request, depending on the actor's role.
    pub async fn save_source_update(
        &self,
        actor_id: i32,
        source_id: i32,
        input: &SourceInput,
    ) -> Result<WriteOutcome, Error> {
        match self.write_decision(actor_id).await? {
            (Decision::Allowed, _) => {
                let source = self.apply_update(actor_id, source_id, input).await?;
                Ok(WriteOutcome::Applied(source.id))
            }
            (Decision::RequiresApproval, _) => Ok(WriteOutcome::Requested(
                self.queue_update(actor_id, source_id, input).await?,
            )),
            (Decision::Denied, role) => {
                Err(self.denied(actor_id, self.policy.requester_level, role))
            }
        }
    }

    /// Deletes a source directly or as a request, depending on the actor's role.
    ///
    /// The reason is only kept on requests.
    pub async fn remove_source(
        &self,
        actor_id: i32,
        source_id: i32,
        reason: Option<&str>,
    ) -> Result<WriteOutcome, Error> {
        match self.write_decision(actor_id).await? {
            (Decision::Allowed, _) => {
                self.apply_delete(actor_id, source_id).await?;
                Ok(WriteOutcome::Applied(source_id))
            }
            (Decision::RequiresApproval, _) => Ok(WriteOutcome::Requested(
                self.queue_delete(actor_id, source_id, reason).await?,
            )),
            (Decision::Denied, role) => {
                Err(self.denied(actor_id, self.policy.requester_level, role))
            }
        }
    }

    /// Searches name, author, type and URL for every whitespace-separated term of `text`.
    ///
    /// Limit is clamped into `[1, 50]` (default 20), offset to be non-negative.
    ///
    /// # Returns
    /// - `Ok(Page)` - Matching sources ordered by name
    /// - `Err(Error::ValidationError)` - Trimmed query shorter than [`SEARCH_MIN_LEN`]
    pub async fn search_sources(
        &self,
        actor_id: i32,
        text: &str,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Page<SourceSummary>, Error> {
        let text = text.trim();
        if text.chars().count() < SEARCH_MIN_LEN {
            return Err(ValidationError::QueryTooShort {
                min: SEARCH_MIN_LEN,
            }
            .into());
        }

        let offset = clamp_offset(offset);
        let limit = clamp_limit(limit, SEARCH_DEFAULT_LIMIT, SEARCH_MAX_LIMIT);
        let page = self.sources.search_fulltext(text, offset, limit).await?;

        self.record(AuditEntry::new(
            actor_id,
            AuditAction::SourceSearch,
            format!("Searched sources for '{}' ({} matches)", text, page.total_count),
        ))
        .await;

        Ok(page)
    }

    /// Lists the distinct source types in use.
    pub async fn list_source_types(&self, actor_id: i32) -> Result<Vec<String>, Error> {
        let types = self.sources.get_source_types().await?;

        self.record(AuditEntry::new(
            actor_id,
            AuditAction::SourceTypesList,
            format!("Listed {} source types", types.len()),
        ))
        .await;

        Ok(types)
    }

    /// Lists authors credited on at least `min_count` sources, most prolific first.
    ///
    /// `min_count` is clamped to at least 1, limit into `[1, 100]` (default 50).
    pub async fn list_source_authors(
        &self,
        actor_id: i32,
        min_count: Option<i64>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Page<AuthorCount>, Error> {
        let min_count = min_count.unwrap_or(1).max(1) as u64;
        let offset = clamp_offset(offset);
        let limit = clamp_limit(limit, AUTHORS_DEFAULT_LIMIT, AUTHORS_MAX_LIMIT);

        let page = self
            .sources
            .get_source_authors(min_count, offset, limit)
            .await?;

        self.record(AuditEntry::new(
            actor_id,
            AuditAction::SourceAuthorsList,
            format!(
                "Listed {} of {} authors with at least {} sources",
                page.items.len(),
                page.total_count,
                min_count
            ),
        ))
        .await;

        Ok(page)
    }

    /// Reports stored URLs that fail the syntactic URL rules.
    ///
    /// # Returns
    /// - `Ok(Vec<UrlIssue>)` - One entry per malformed URL
    /// - `Err(Error::AccessError)` - Actor below the admin level
    pub async fn check_urls(&self, actor_id: i32) -> Result<Vec<UrlIssue>, Error> {
        self.require_admin(actor_id).await?;

        let issues = self.sources.check_urls().await?;

        tracing::info!(actor_id = %actor_id, issues = issues.len(), "Checked source URLs");
        self.record(AuditEntry::new(
            actor_id,
            AuditAction::SourceUrlCheck,
            format!("Checked source URLs, {} issues found", issues.len()),
        ))
        .await;

        Ok(issues)
    }

    /// Reports pairs of sources whose names look alike.
    ///
    /// # Returns
    /// - `Ok(Vec<DuplicatePair>)` - Candidate pairs, highest similarity first
    /// - `Err(Error::AccessError)` - Actor below the admin level
    pub async fn find_duplicates(&self, actor_id: i32) -> Result<Vec<DuplicatePair>, Error> {
        self.require_admin(actor_id).await?;

        let pairs = self.sources.find_duplicates().await?;

        tracing::info!(actor_id = %actor_id, pairs = pairs.len(), "Scanned for duplicate sources");
        self.record(AuditEntry::new(
            actor_id,
            AuditAction::SourceDuplicateScan,
            format!("Scanned for duplicate sources, {} pairs found", pairs.len()),
        ))
        .await;

        Ok(pairs)
    }

    /// Links a source to an event.
    ///
    /// # Returns
    /// - `Ok(true)` - Link created
    /// - `Ok(false)` - Already linked, nothing changed
    /// - `Err(Error::AccessError)` - Actor below the moderator level
    /// - `Err(Error::EntityError)` - Source or event does not exist
    pub async fn link_event(
        &self,
        actor_id: i32,
        source_id: i32,
        event_id: i32,
    ) -> Result<bool, Error> {
        self.require_direct_write(actor_id).await?;
        self.require_source(source_id).await?;
        if !self.sources.event_exists(event_id).await? {
            return Err(not_found(EVENT_ENTITY, event_id));
        }

        let linked = self.sources.link_event(source_id, event_id).await?;

        let description = if linked {
            format!("Linked event {} to source {}", event_id, source_id)
        } else {
            format!("Event {} already linked to source {}", event_id, source_id)
        };
        self.record(
            AuditEntry::new(actor_id, AuditAction::SourceEventLinked, description)
                .on(SOURCE_ENTITY, source_id),
        )
        .await;

        Ok(linked)
    }

    /// Removes a link between a source and an event.
    ///
    /// # Returns
    /// - `Ok(true)` - Link removed
    /// - `Ok(false)` - No such link
    /// - `Err(Error::AccessError)` - Actor below the moderator level
    /// - `Err(Error::EntityError)` - Source does not exist
    pub async fn unlink_event(
        &self,
        actor_id: i32,
        source_id: i32,
        event_id: i32,
    ) -> Result<bool, Error> {
        self.require_direct_write(actor_id).await?;
        self.require_source(source_id).await?;

        let unlinked = self.sources.unlink_event(source_id, event_id).await?;

        let description = if unlinked {
            format!("Unlinked event {} from source {}", event_id, source_id)
        } else {
            format!("Event {} was not linked to source {}", event_id, source_id)
        };
        self.record(
            AuditEntry::new(actor_id, AuditAction::SourceEventUnlinked, description)
                .on(SOURCE_ENTITY, source_id),
        )
        .await;

        Ok(unlinked)
    }

    async fn queue_create(&self, actor_id: i32, input: &SourceInput) -> Result<i32, Error> {
        let valid = Self::validate(input)?;
        let request_id = self.sources.request_create(actor_id, &valid).await?;

        tracing::info!(actor_id = %actor_id, request_id = request_id, "Queued source create request");
        self.record(AuditEntry::new(
            actor_id,
            AuditAction::SourceCreateRequested,
            format!(
                "Requested creation of source '{}' (request {})",
                valid.name(),
                request_id
            ),
        ))
        .await;

        Ok(request_id)
    }

    async fn apply_create(&self, actor_id: i32, input: &SourceInput) -> Result<i32, Error> {
        let valid = Self::validate(input)?;
        let source_id = self.sources.create_direct(&valid).await?;

        tracing::info!(actor_id = %actor_id, source_id = source_id, "Created source");
        self.record(
            AuditEntry::new(
                actor_id,
                AuditAction::SourceCreated,
                format!("Created source '{}'", valid.name()),
            )
            .on(SOURCE_ENTITY, source_id),
        )
        .await;

        Ok(source_id)
    }

    async fn queue_update(
        &self,
        actor_id: i32,
        source_id: i32,
        input: &SourceInput,
    ) -> Result<i32, Error> {
        self.require_source(source_id).await?;
        let valid = Self::validate(input)?;
        let request_id = self
            .sources
            .request_update(actor_id, source_id, &valid)
            .await?;

        tracing::info!(
            actor_id = %actor_id,
            source_id = source_id,
            request_id = request_id,
            "Queued source update request"
        );
        self.record(
            AuditEntry::new(
                actor_id,
                AuditAction::SourceUpdateRequested,
                format!("Requested update of source {} (request {})", source_id, request_id),
            )
            .on(SOURCE_ENTITY, source_id),
        )
        .await;

        Ok(request_id)
    }

    async fn apply_update(
        &self,
        actor_id: i32,
        source_id: i32,
        input: &SourceInput,
    ) -> Result<SourceModel, Error> {
        self.require_source(source_id).await?;
        let valid = Self::validate(input)?;
        let source = self
            .sources
            .update_direct(source_id, &valid)
            .await?
            .ok_or_else(|| not_found(SOURCE_ENTITY, source_id))?;

        tracing::info!(actor_id = %actor_id, source_id = source_id, "Updated source");
        self.record(
            AuditEntry::new(
                actor_id,
                AuditAction::SourceUpdated,
                format!("Updated source '{}'", source.name),
            )
            .on(SOURCE_ENTITY, source_id),
        )
        .await;

        Ok(source)
    }

    async fn queue_delete(
        &self,
        actor_id: i32,
        source_id: i32,
        reason: Option<&str>,
    ) -> Result<i32, Error> {
        self.require_source(source_id).await?;
        let reason = reason.map(str::trim).filter(|reason| !reason.is_empty());
        let request_id = self
            .sources
            .request_delete(actor_id, source_id, reason)
            .await?;

        tracing::info!(
            actor_id = %actor_id,
            source_id = source_id,
            request_id = request_id,
            "Queued source delete request"
        );
        self.record(
            AuditEntry::new(
                actor_id,
                AuditAction::SourceDeleteRequested,
                format!("Requested deletion of source {} (request {})", source_id, request_id),
            )
            .on(SOURCE_ENTITY, source_id),
        )
        .await;

        Ok(request_id)
    }

    async fn apply_delete(&self, actor_id: i32, source_id: i32) -> Result<(), Error> {
        let source = self.require_source(source_id).await?;
        if !self.sources.delete_direct(source_id).await? {
            return Err(not_found(SOURCE_ENTITY, source_id));
        }

        tracing::info!(actor_id = %actor_id, source_id = source_id, "Deleted source");
        self.record(
            AuditEntry::new(
                actor_id,
                AuditAction::SourceDeleted,
                format!("Deleted source '{}'", source.name),
            )
            .on(SOURCE_ENTITY, source_id),
        )
        .await;

        Ok(())
    }
}
