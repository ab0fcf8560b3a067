//! Source query, result and write types used by the service and repository layers.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    model::source::{
        AuthorCountDto, AuthorPageDto, DuplicatePairDto, EventSummaryDto, SourceDetailsDto,
        SourceDto, SourcePageDto, SourceSummaryDto, UrlIssueDto, WriteOutcomeDto,
    },
    server::{model::db::SourceModel, util::url::UrlIssueKind},
};

/// Entity type name recorded in audit entries and not-found errors for sources.
pub const SOURCE_ENTITY: &str = "source";

/// Entity type name for events linked to sources.
pub const EVENT_ENTITY: &str = "event";

/// Relation kind key for linked events in a [`RelationshipsSummary`].
pub const EVENTS_RELATION: &str = "events";

/// Ordering applied to source listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    DateDesc,
    DateAsc,
    NameAsc,
    NameDesc,
    AuthorAsc,
    TypeAsc,
}

impl SortBy {
    /// Parses a `sort_by` query value, falling back to [`SortBy::DateDesc`] for unknown values.
    pub fn from_param(value: &str) -> Self {
        match value.trim() {
            "date_asc" => Self::DateAsc,
            "name_asc" => Self::NameAsc,
            "name_desc" => Self::NameDesc,
            "author_asc" => Self::AuthorAsc,
            "type_asc" => Self::TypeAsc,
            _ => Self::DateDesc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateDesc => "date_desc",
            Self::DateAsc => "date_asc",
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::AuthorAsc => "author_asc",
            Self::TypeAsc => "type_asc",
        }
    }
}

/// Caller-supplied listing filters, before pagination bounds are applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceFilters {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
    pub search_term: Option<String>,
    pub author: Option<String>,
    pub source_type: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub event_id: Option<i32>,
    pub has_url: Option<bool>,
    pub sort_by: SortBy,
}

/// Listing query handed to the repository, with offset and limit already clamped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceQuery {
    pub offset: u64,
    pub limit: u64,
    pub search_term: Option<String>,
    pub author: Option<String>,
    pub source_type: Option<String>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub event_id: Option<i32>,
    pub has_url: Option<bool>,
    pub sort_by: SortBy,
}

/// One page of results.
///
/// `total_count` is the number of rows matching the query ignoring pagination. A page with no
/// items always reports 0, including one whose offset lies past the last match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub offset: u64,
    pub limit: u64,
}

impl<T> Page<T> {
    /// Builds a page, reporting a zero total when `items` is empty.
    pub fn new(items: Vec<T>, total_count: u64, offset: u64, limit: u64) -> Self {
        if items.is_empty() {
            return Self::empty(offset, limit);
        }

        Self {
            items,
            total_count,
            offset,
            limit,
        }
    }

    pub fn empty(offset: u64, limit: u64) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            offset,
            limit,
        }
    }
}

/// A source row of a listing, annotated with derived counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSummary {
    pub source: SourceModel,
    /// Number of events linked to this source
    pub events_count: u64,
    /// Total rows matching the query this row came from, equal across the page
    pub total_count: u64,
}

/// Short description of an event linked to a source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventSummary {
    pub event_id: i32,
    pub name: String,
    pub event_date: Option<NaiveDate>,
}

/// Counts of related entities keyed by relation kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelationshipsSummary {
    pub relationships: BTreeMap<String, u64>,
}

impl RelationshipsSummary {
    pub fn count(&self, relation: &str) -> u64 {
        self.relationships.get(relation).copied().unwrap_or(0)
    }
}

/// Source with its linked events and relationship counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceDetails {
    pub source: SourceModel,
    /// At most [`crate::server::service::source::DETAIL_EVENTS_LIMIT`] events
    pub events: Vec<EventSummary>,
    pub relationships: RelationshipsSummary,
}

/// Author with the number of sources attributed to them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorCount {
    pub author: String,
    pub count: u64,
    pub total_count: u64,
}

/// Stored URL that fails a syntactic rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UrlIssue {
    pub source_id: i32,
    pub name: String,
    pub url: String,
    pub issue: UrlIssueKind,
}

/// Pair of sources whose names look alike.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicatePair {
    pub source_id_1: i32,
    pub name_1: String,
    pub source_id_2: i32,
    pub name_2: String,
    /// Similarity score from 0 to 100
    pub similarity: u8,
}

/// Kind of a pending change request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeRequestKind {
    Create,
    Update,
    Delete,
}

impl ChangeRequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Status written on newly submitted change requests.
pub const CHANGE_REQUEST_PENDING: &str = "pending";

/// Result of a write routed through the moderation policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Written immediately, carries the source ID
    Applied(i32),
    /// Queued for moderation, carries the change request ID
    Requested(i32),
}

/// Source fields as submitted by a caller, before normalization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SourceInput {
    pub name: Option<String>,
    pub author: Option<String>,
    pub source_type: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub url: Option<String>,
}

/// Normalized source fields: trimmed, empty optionals dropped, default URL scheme applied.
///
/// Produced by [`SourceInput::normalize`], consumed by [`SourceDraft::validate`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceDraft {
    pub name: Option<String>,
    pub author: Option<String>,
    pub source_type: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub url: Option<String>,
}

/// Source fields that passed every validation rule.
///
/// Only the validation pipeline constructs this type, so holding one proves the rules ran.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidSource {
    name: String,
    author: Option<String>,
    source_type: Option<String>,
    publication_date: Option<NaiveDate>,
    url: Option<String>,
}

impl ValidSource {
    pub(crate) fn new(
        name: String,
        author: Option<String>,
        source_type: Option<String>,
        publication_date: Option<NaiveDate>,
        url: Option<String>,
    ) -> Self {
        Self {
            name,
            author,
            source_type,
            publication_date,
            url,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn source_type(&self) -> Option<&str> {
        self.source_type.as_deref()
    }

    pub fn publication_date(&self) -> Option<NaiveDate> {
        self.publication_date
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl From<SourceModel> for SourceDto {
    fn from(source: SourceModel) -> Self {
        Self {
            id: source.id,
            name: source.name,
            author: source.author,
            source_type: source.source_type,
            publication_date: source.publication_date,
            url: source.url,
            created_at: source.created_at,
            updated_at: source.updated_at,
        }
    }
}

impl From<Page<SourceSummary>> for SourcePageDto {
    fn from(page: Page<SourceSummary>) -> Self {
        Self {
            items: page
                .items
                .into_iter()
                .map(|summary| SourceSummaryDto {
                    source: summary.source.into(),
                    events_count: summary.events_count,
                    total_count: summary.total_count,
                })
                .collect(),
            total_count: page.total_count,
            offset: page.offset,
            limit: page.limit,
        }
    }
}

impl From<SourceDetails> for SourceDetailsDto {
    fn from(details: SourceDetails) -> Self {
        Self {
            source: details.source.into(),
            events: details
                .events
                .into_iter()
                .map(|event| EventSummaryDto {
                    event_id: event.event_id,
                    name: event.name,
                    event_date: event.event_date,
                })
                .collect(),
            relationships: details.relationships.relationships,
        }
    }
}

impl From<Page<AuthorCount>> for AuthorPageDto {
    fn from(page: Page<AuthorCount>) -> Self {
        Self {
            items: page
                .items
                .into_iter()
                .map(|author| AuthorCountDto {
                    author: author.author,
                    count: author.count,
                    total_count: author.total_count,
                })
                .collect(),
            total_count: page.total_count,
            offset: page.offset,
            limit: page.limit,
        }
    }
}

impl From<UrlIssue> for UrlIssueDto {
    fn from(issue: UrlIssue) -> Self {
        Self {
            source_id: issue.source_id,
            name: issue.name,
            url: issue.url,
            issue: issue.issue.to_string(),
        }
    }
}

impl From<DuplicatePair> for DuplicatePairDto {
    fn from(pair: DuplicatePair) -> Self {
        Self {
            source_id_1: pair.source_id_1,
            name_1: pair.name_1,
            source_id_2: pair.source_id_2,
            name_2: pair.name_2,
            similarity: pair.similarity,
        }
    }
}

impl From<WriteOutcome> for WriteOutcomeDto {
    fn from(outcome: WriteOutcome) -> Self {
        match outcome {
            WriteOutcome::Applied(source_id) => Self {
                status: "applied".to_string(),
                source_id: Some(source_id),
                request_id: None,
            },
            WriteOutcome::Requested(request_id) => Self {
                status: "requested".to_string(),
                source_id: None,
                request_id: Some(request_id),
            },
        }
    }
}
