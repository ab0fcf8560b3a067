use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SourceDto {
    pub id: i32,
    pub name: String,
    pub author: Option<String>,
    pub source_type: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A source row of a listing or search result
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SourceSummaryDto {
    pub source: SourceDto,
    /// Number of events linked to the source
    pub events_count: u64,
    /// Number of sources matching the query, ignoring pagination
    pub total_count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SourcePageDto {
    pub items: Vec<SourceSummaryDto>,
    pub total_count: u64,
    pub offset: u64,
    pub limit: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EventSummaryDto {
    pub event_id: i32,
    pub name: String,
    pub event_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SourceDetailsDto {
    pub source: SourceDto,
    /// Up to 10 linked events
    pub events: Vec<EventSummaryDto>,
    /// Related entity counts keyed by relation kind, e.g. `events`
    pub relationships: BTreeMap<String, u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthorCountDto {
    pub author: String,
    pub count: u64,
    pub total_count: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthorPageDto {
    pub items: Vec<AuthorCountDto>,
    pub total_count: u64,
    pub offset: u64,
    pub limit: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UrlIssueDto {
    pub source_id: i32,
    pub name: String,
    pub url: String,
    /// Description of the problem found
    pub issue: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DuplicatePairDto {
    pub source_id_1: i32,
    pub name_1: String,
    pub source_id_2: i32,
    pub name_2: String,
    /// Name similarity from 0 to 100
    pub similarity: u8,
}

/// Result of a create, update or delete
///
/// Exactly one of `source_id` and `request_id` is set: `source_id` when the write was applied,
/// `request_id` when it was queued for moderation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct WriteOutcomeDto {
    /// `applied` or `requested`
    pub status: String,
    pub source_id: Option<i32>,
    pub request_id: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LinkResultDto {
    /// False when the link already existed (link) or did not exist (unlink)
    pub changed: bool,
}
