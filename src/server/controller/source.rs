use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        source::{
            AuthorPageDto, DuplicatePairDto, LinkResultDto, SourceDetailsDto, SourcePageDto,
            UrlIssueDto, WriteOutcomeDto,
        },
    },
    server::{
        controller::util::actor::get_actor_from_session,
        data::DbRepositories,
        error::Error,
        model::{
            app::AppState,
            source::{SortBy, SourceFilters, SourceInput, WriteOutcome},
        },
    },
};

pub static SOURCE_TAG: &str = "source";

/// Filters for listing sources
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListSourcesParams {
    /// Rows to skip, negative values count as 0
    pub offset: Option<i64>,
    /// Page size from 1 to 100, default 50
    pub limit: Option<i64>,
    /// Text matched against name, author, type and URL
    pub search: Option<String>,
    /// Partial author match
    pub author: Option<String>,
    /// Exact source type
    pub source_type: Option<String>,
    /// Earliest publication year, inclusive
    pub year_from: Option<i32>,
    /// Latest publication year, inclusive
    pub year_to: Option<i32>,
    /// Only sources linked to this event
    pub event_id: Option<i32>,
    /// Only sources with (true) or without (false) a URL
    pub has_url: Option<bool>,
    /// One of `date_desc`, `date_asc`, `name_asc`, `name_desc`, `author_asc`, `type_asc`
    pub sort_by: Option<String>,
}

impl From<ListSourcesParams> for SourceFilters {
    fn from(params: ListSourcesParams) -> Self {
        Self {
            offset: params.offset,
            limit: params.limit,
            search_term: params.search,
            author: params.author,
            source_type: params.source_type,
            year_from: params.year_from,
            year_to: params.year_to,
            event_id: params.event_id,
            has_url: params.has_url,
            sort_by: params
                .sort_by
                .as_deref()
                .map(SortBy::from_param)
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchSourcesParams {
    /// Search text, at least 2 characters once trimmed
    pub q: String,
    pub offset: Option<i64>,
    /// Page size from 1 to 50, default 20
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SourceAuthorsParams {
    /// Minimum number of sources per author, at least 1
    pub min_count: Option<i64>,
    pub offset: Option<i64>,
    /// Page size from 1 to 100, default 50
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RemoveSourceParams {
    /// Reason attached to a queued delete request
    pub reason: Option<String>,
}

/// Maps a write outcome to its response, `applied_status` when applied and 202 when queued
fn write_response(outcome: WriteOutcome, applied_status: StatusCode) -> impl IntoResponse {
    let status = match outcome {
        WriteOutcome::Applied(_) => applied_status,
        WriteOutcome::Requested(_) => StatusCode::ACCEPTED,
    };

    (status, Json(WriteOutcomeDto::from(outcome)))
}

/// List sources with filtering, sorting and pagination
#[utoipa::path(
    get,
    path = "/api/sources",
    tag = SOURCE_TAG,
    params(ListSourcesParams),
    responses(
        (status = 200, description = "Page of matching sources", body = SourcePageDto),
        (status = 400, description = "Inverted or invalid year range", body = ErrorDto),
        (status = 401, description = "No user in session", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_sources(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ListSourcesParams>,
) -> Result<impl IntoResponse, Error> {
    let actor_id = get_actor_from_session(&session).await?;
    let repos = DbRepositories::new(&state.db);

    let page = repos
        .source_service(&state.policy)
        .list_sources(actor_id, params.into())
        .await?;

    Ok((StatusCode::OK, Json(SourcePageDto::from(page))))
}

/// Full-text search over source name, author, type and URL
#[utoipa::path(
    get,
    path = "/api/sources/search",
    tag = SOURCE_TAG,
    params(SearchSourcesParams),
    responses(
        (status = 200, description = "Page of matching sources ordered by name", body = SourcePageDto),
        (status = 400, description = "Query shorter than 2 characters", body = ErrorDto),
        (status = 401, description = "No user in session", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_sources(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<SearchSourcesParams>,
) -> Result<impl IntoResponse, Error> {
    let actor_id = get_actor_from_session(&session).await?;
    let repos = DbRepositories::new(&state.db);

    let page = repos
        .source_service(&state.policy)
        .search_sources(actor_id, &params.q, params.offset, params.limit)
        .await?;

    Ok((StatusCode::OK, Json(SourcePageDto::from(page))))
}

/// List the distinct source types in use
#[utoipa::path(
    get,
    path = "/api/sources/types",
    tag = SOURCE_TAG,
    responses(
        (status = 200, description = "Source types in ascending order", body = Vec<String>),
        (status = 401, description = "No user in session", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_source_types(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let actor_id = get_actor_from_session(&session).await?;
    let repos = DbRepositories::new(&state.db);

    let types = repos
        .source_service(&state.policy)
        .list_source_types(actor_id)
        .await?;

    Ok((StatusCode::OK, Json(types)))
}

/// List authors with their source counts
#[utoipa::path(
    get,
    path = "/api/sources/authors",
    tag = SOURCE_TAG,
    params(SourceAuthorsParams),
    responses(
        (status = 200, description = "Page of authors, most prolific first", body = AuthorPageDto),
        (status = 401, description = "No user in session", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_source_authors(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<SourceAuthorsParams>,
) -> Result<impl IntoResponse, Error> {
    let actor_id = get_actor_from_session(&session).await?;
    let repos = DbRepositories::new(&state.db);

    let page = repos
        .source_service(&state.policy)
        .list_source_authors(actor_id, params.min_count, params.offset, params.limit)
        .await?;

    Ok((StatusCode::OK, Json(AuthorPageDto::from(page))))
}

/// Get a source with its linked events and relationship counts
#[utoipa::path(
    get,
    path = "/api/sources/{id}",
    tag = SOURCE_TAG,
    params(("id" = i32, Path, description = "Source ID")),
    responses(
        (status = 200, description = "Source details", body = SourceDetailsDto),
        (status = 401, description = "No user in session", body = ErrorDto),
        (status = 404, description = "Source not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_source(
    State(state): State<AppState>,
    session: Session,
    Path(source_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let actor_id = get_actor_from_session(&session).await?;
    let repos = DbRepositories::new(&state.db);

    let details = repos
        .source_service(&state.policy)
        .get_source_details(actor_id, source_id)
        .await?;

    Ok((StatusCode::OK, Json(SourceDetailsDto::from(details))))
}

/// Create a source, or request its creation when the user may not write directly
#[utoipa::path(
    post,
    path = "/api/sources",
    tag = SOURCE_TAG,
    request_body = SourceInput,
    responses(
        (status = 201, description = "Source created", body = WriteOutcomeDto),
        (status = 202, description = "Create request queued for moderation", body = WriteOutcomeDto),
        (status = 400, description = "Invalid source fields", body = ErrorDto),
        (status = 401, description = "No user in session", body = ErrorDto),
        (status = 403, description = "Role level too low", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_source(
    State(state): State<AppState>,
    session: Session,
    Json(input): Json<SourceInput>,
) -> Result<impl IntoResponse, Error> {
    let actor_id = get_actor_from_session(&session).await?;
    let repos = DbRepositories::new(&state.db);

    let outcome = repos
        .source_service(&state.policy)
        .save_source(actor_id, &input)
        .await?;

    Ok(write_response(outcome, StatusCode::CREATED))
}

/// Update a source, or request the update when the user may not write directly
#[utoipa::path(
    put,
    path = "/api/sources/{id}",
    tag = SOURCE_TAG,
    params(("id" = i32, Path, description = "Source ID")),
    request_body = SourceInput,
    responses(
        (status = 200, description = "Source updated", body = WriteOutcomeDto),
        (status = 202, description = "Update request queued for moderation", body = WriteOutcomeDto),
        (status = 400, description = "Invalid source fields", body = ErrorDto),
        (status = 401, description = "No user in session", body = ErrorDto),
        (status = 403, description = "Role level too low", body = ErrorDto),
        (status = 404, description = "Source not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_source(
    State(state): State<AppState>,
    session: Session,
    Path(source_id): Path<i32>,
    Json(input): Json<SourceInput>,
) -> Result<impl IntoResponse, Error> {
    let actor_id = get_actor_from_session(&session).await?;
    let repos = DbRepositories::new(&state.db);

    let outcome = repos
        .source_service(&state.policy)
        .save_source_update(actor_id, source_id, &input)
        .await?;

    Ok(write_response(outcome, StatusCode::OK))
}

/// Delete a source, or request deletion when the user may not write directly
#[utoipa::path(
    delete,
    path = "/api/sources/{id}",
    tag = SOURCE_TAG,
    params(("id" = i32, Path, description = "Source ID"), RemoveSourceParams),
    responses(
        (status = 200, description = "Source deleted", body = WriteOutcomeDto),
        (status = 202, description = "Delete request queued for moderation", body = WriteOutcomeDto),
        (status = 401, description = "No user in session", body = ErrorDto),
        (status = 403, description = "Role level too low", body = ErrorDto),
        (status = 404, description = "Source not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_source(
    State(state): State<AppState>,
    session: Session,
    Path(source_id): Path<i32>,
    Query(params): Query<RemoveSourceParams>,
) -> Result<impl IntoResponse, Error> {
    let actor_id = get_actor_from_session(&session).await?;
    let repos = DbRepositories::new(&state.db);

    let outcome = repos
        .source_service(&state.policy)
        .remove_source(actor_id, source_id, params.reason.as_deref())
        .await?;

    Ok(write_response(outcome, StatusCode::OK))
}

/// Link a source to an event
#[utoipa::path(
    post,
    path = "/api/sources/{id}/events/{event_id}",
    tag = SOURCE_TAG,
    params(
        ("id" = i32, Path, description = "Source ID"),
        ("event_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Link created, or already present", body = LinkResultDto),
        (status = 401, description = "No user in session", body = ErrorDto),
        (status = 403, description = "Role level too low", body = ErrorDto),
        (status = 404, description = "Source or event not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn link_event(
    State(state): State<AppState>,
    session: Session,
    Path((source_id, event_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let actor_id = get_actor_from_session(&session).await?;
    let repos = DbRepositories::new(&state.db);

    let changed = repos
        .source_service(&state.policy)
        .link_event(actor_id, source_id, event_id)
        .await?;

    Ok((StatusCode::OK, Json(LinkResultDto { changed })))
}

/// Remove a link between a source and an event
#[utoipa::path(
    delete,
    path = "/api/sources/{id}/events/{event_id}",
    tag = SOURCE_TAG,
    params(
        ("id" = i32, Path, description = "Source ID"),
        ("event_id" = i32, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Link removed, or was not present", body = LinkResultDto),
        (status = 401, description = "No user in session", body = ErrorDto),
        (status = 403, description = "Role level too low", body = ErrorDto),
        (status = 404, description = "Source not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unlink_event(
    State(state): State<AppState>,
    session: Session,
    Path((source_id, event_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    let actor_id = get_actor_from_session(&session).await?;
    let repos = DbRepositories::new(&state.db);

    let changed = repos
        .source_service(&state.policy)
        .unlink_event(actor_id, source_id, event_id)
        .await?;

    Ok((StatusCode::OK, Json(LinkResultDto { changed })))
}

/// Report stored URLs with syntactic problems
#[utoipa::path(
    get,
    path = "/api/sources/audit/urls",
    tag = SOURCE_TAG,
    responses(
        (status = 200, description = "Sources with malformed URLs", body = Vec<UrlIssueDto>),
        (status = 401, description = "No user in session", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_urls(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let actor_id = get_actor_from_session(&session).await?;
    let repos = DbRepositories::new(&state.db);

    let issues: Vec<UrlIssueDto> = repos
        .source_service(&state.policy)
        .check_urls(actor_id)
        .await?
        .into_iter()
        .map(UrlIssueDto::from)
        .collect();

    Ok((StatusCode::OK, Json(issues)))
}

/// Report pairs of sources with near-identical names
#[utoipa::path(
    get,
    path = "/api/sources/audit/duplicates",
    tag = SOURCE_TAG,
    responses(
        (status = 200, description = "Candidate duplicate pairs, most similar first", body = Vec<DuplicatePairDto>),
        (status = 401, description = "No user in session", body = ErrorDto),
        (status = 403, description = "Admin role required", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn find_duplicates(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let actor_id = get_actor_from_session(&session).await?;
    let repos = DbRepositories::new(&state.db);

    let pairs: Vec<DuplicatePairDto> = repos
        .source_service(&state.policy)
        .find_duplicates(actor_id)
        .await?
        .into_iter()
        .map(DuplicatePairDto::from)
        .collect();

    Ok((StatusCode::OK, Json(pairs)))
}
