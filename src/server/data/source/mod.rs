//! SeaORM-backed [`SourceRepository`].

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    sea_query::{LikeExpr, NullOrdering, Order},
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    ExprTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
    TransactionTrait,
};

use crate::server::{
    data::contract::SourceRepository,
    model::{
        db::SourceModel,
        source::{
            AuthorCount, ChangeRequestKind, DuplicatePair, EventSummary, Page, SortBy,
            SourceQuery, SourceSummary, UrlIssue, ValidSource, CHANGE_REQUEST_PENDING,
        },
    },
    util::url::url_issue,
};

use entity::source::Column;

/// Minimum name similarity, out of 100, for two sources to be reported as duplicates.
pub const DUPLICATE_THRESHOLD: u8 = 80;

pub struct DbSourceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DbSourceRepository<'a> {
    /// Creates a new instance of [`DbSourceRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Counts matching rows, then fetches the requested page annotated with event counts.
    async fn fetch_page(
        &self,
        select: Select<entity::source::Entity>,
        offset: u64,
        limit: u64,
    ) -> Result<Page<SourceSummary>, DbErr> {
        let total_count = select.clone().count(self.db).await?;
        if total_count == 0 {
            return Ok(Page::empty(offset, limit));
        }

        let sources = select.offset(offset).limit(limit).all(self.db).await?;
        let events_counts = self
            .count_events(sources.iter().map(|source| source.id).collect())
            .await?;

        let items = sources
            .into_iter()
            .map(|source| SourceSummary {
                events_count: events_counts.get(&source.id).copied().unwrap_or(0),
                total_count,
                source,
            })
            .collect();

        Ok(Page::new(items, total_count, offset, limit))
    }

    /// Number of linked events per source ID.
    async fn count_events(&self, source_ids: Vec<i32>) -> Result<HashMap<i32, u64>, DbErr> {
        if source_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let links: Vec<i32> = entity::prelude::SourceEvent::find()
            .select_only()
            .column(entity::source_event::Column::SourceId)
            .filter(entity::source_event::Column::SourceId.is_in(source_ids))
            .into_tuple()
            .all(self.db)
            .await?;

        let mut counts = HashMap::new();
        for source_id in links {
            *counts.entry(source_id).or_insert(0) += 1;
        }

        Ok(counts)
    }

    /// IDs of sources linked to the given event.
    async fn source_ids_for_event(&self, event_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::SourceEvent::find()
            .select_only()
            .column(entity::source_event::Column::SourceId)
            .filter(entity::source_event::Column::EventId.eq(event_id))
            .into_tuple()
            .all(self.db)
            .await
    }
}

/// `LIKE` pattern matching `term` as a literal substring, with `\` as the escape character.
fn substring_pattern(term: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(term.len() + 2);
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    LikeExpr::new(format!("%{}%", escaped)).escape('\\')
}

/// Matches a term anywhere in name, author, type or URL, wildcard characters included literally.
fn term_condition(term: &str) -> Condition {
    Condition::any()
        .add(Column::Name.like(substring_pattern(term)))
        .add(Column::Author.like(substring_pattern(term)))
        .add(Column::SourceType.like(substring_pattern(term)))
        .add(Column::Url.like(substring_pattern(term)))
}

fn apply_sort(
    select: Select<entity::source::Entity>,
    sort_by: SortBy,
) -> Select<entity::source::Entity> {
    let select = match sort_by {
        SortBy::DateDesc => {
            select.order_by_with_nulls(Column::PublicationDate, Order::Desc, NullOrdering::Last)
        }
        SortBy::DateAsc => {
            select.order_by_with_nulls(Column::PublicationDate, Order::Asc, NullOrdering::Last)
        }
        SortBy::NameAsc => select.order_by_asc(Column::Name),
        SortBy::NameDesc => select.order_by_desc(Column::Name),
        SortBy::AuthorAsc => {
            select.order_by_with_nulls(Column::Author, Order::Asc, NullOrdering::Last)
        }
        SortBy::TypeAsc => {
            select.order_by_with_nulls(Column::SourceType, Order::Asc, NullOrdering::Last)
        }
    };

    select.order_by_asc(Column::Id)
}

/// Similarity of two names from 0 to 100, ignoring case and surrounding whitespace.
pub fn name_similarity(a: &str, b: &str) -> u8 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    (strsim::normalized_levenshtein(&a, &b) * 100.0).round() as u8
}

fn change_request(
    kind: ChangeRequestKind,
    requester_id: i32,
    source_id: Option<i32>,
) -> entity::source_change_request::ActiveModel {
    entity::source_change_request::ActiveModel {
        kind: ActiveValue::Set(kind.as_str().to_string()),
        source_id: ActiveValue::Set(source_id),
        requester_id: ActiveValue::Set(requester_id),
        status: ActiveValue::Set(CHANGE_REQUEST_PENDING.to_string()),
        created_at: ActiveValue::Set(Utc::now().naive_utc()),
        ..Default::default()
    }
}

fn with_fields(
    mut request: entity::source_change_request::ActiveModel,
    data: &ValidSource,
) -> entity::source_change_request::ActiveModel {
    request.name = ActiveValue::Set(Some(data.name().to_string()));
    request.author = ActiveValue::Set(data.author().map(str::to_string));
    request.source_type = ActiveValue::Set(data.source_type().map(str::to_string));
    request.publication_date = ActiveValue::Set(data.publication_date());
    request.url = ActiveValue::Set(data.url().map(str::to_string));
    request
}

#[async_trait]
impl<'a> SourceRepository for DbSourceRepository<'a> {
    async fn get_sources(&self, query: &SourceQuery) -> Result<Page<SourceSummary>, DbErr> {
        let mut select = entity::prelude::Source::find();

        if let Some(term) = &query.search_term {
            select = select.filter(term_condition(term));
        }
        if let Some(author) = &query.author {
            select = select.filter(Column::Author.like(substring_pattern(author)));
        }
        if let Some(source_type) = &query.source_type {
            select = select.filter(Column::SourceType.eq(source_type.as_str()));
        }
        if let Some(start) = query
            .year_from
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        {
            select = select.filter(Column::PublicationDate.gte(start));
        }
        if let Some(end) = query
            .year_to
            .and_then(|year| NaiveDate::from_ymd_opt(year, 12, 31))
        {
            select = select.filter(Column::PublicationDate.lte(end));
        }
        if let Some(event_id) = query.event_id {
            let source_ids = self.source_ids_for_event(event_id).await?;
            if source_ids.is_empty() {
                return Ok(Page::empty(query.offset, query.limit));
            }
            select = select.filter(Column::Id.is_in(source_ids));
        }
        match query.has_url {
            Some(true) => select = select.filter(Column::Url.is_not_null()),
            Some(false) => select = select.filter(Column::Url.is_null()),
            None => {}
        }

        let select = apply_sort(select, query.sort_by);

        self.fetch_page(select, query.offset, query.limit).await
    }

    async fn get_by_id(&self, source_id: i32) -> Result<Option<SourceModel>, DbErr> {
        entity::prelude::Source::find_by_id(source_id)
            .one(self.db)
            .await
    }

    async fn get_source_events(
        &self,
        source_id: i32,
        limit: u64,
    ) -> Result<Vec<EventSummary>, DbErr> {
        let event_ids: Vec<i32> = entity::prelude::SourceEvent::find()
            .select_only()
            .column(entity::source_event::Column::EventId)
            .filter(entity::source_event::Column::SourceId.eq(source_id))
            .into_tuple()
            .all(self.db)
            .await?;

        if event_ids.is_empty() {
            return Ok(Vec::new());
        }

        let events = entity::prelude::Event::find()
            .filter(entity::event::Column::Id.is_in(event_ids))
            .order_by_with_nulls(
                entity::event::Column::EventDate,
                Order::Asc,
                NullOrdering::Last,
            )
            .order_by_asc(entity::event::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(events
            .into_iter()
            .map(|event| EventSummary {
                event_id: event.id,
                name: event.name,
                event_date: event.event_date,
            })
            .collect())
    }

    async fn search_fulltext(
        &self,
        text: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Page<SourceSummary>, DbErr> {
        let condition = text
            .split_whitespace()
            .fold(Condition::all(), |condition, term| {
                condition.add(term_condition(term))
            });

        let select = entity::prelude::Source::find()
            .filter(condition)
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id);

        self.fetch_page(select, offset, limit).await
    }

    async fn get_source_types(&self) -> Result<Vec<String>, DbErr> {
        let types: Vec<Option<String>> = entity::prelude::Source::find()
            .select_only()
            .column(Column::SourceType)
            .distinct()
            .filter(Column::SourceType.is_not_null())
            .order_by_asc(Column::SourceType)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(types
            .into_iter()
            .flatten()
            .filter(|source_type| !source_type.trim().is_empty())
            .collect())
    }

    async fn get_source_authors(
        &self,
        min_count: u64,
        offset: u64,
        limit: u64,
    ) -> Result<Page<AuthorCount>, DbErr> {
        // Authors are trimmed on write, so grouping on the stored value is exact
        let grouped = entity::prelude::Source::find()
            .select_only()
            .column(Column::Author)
            .column_as(Column::Id.count(), "count")
            .filter(Column::Author.is_not_null())
            .filter(Column::Author.ne(""))
            .group_by(Column::Author)
            .having(Column::Id.count().gte(min_count as i64));

        let total_count = grouped.clone().count(self.db).await?;
        if total_count == 0 {
            return Ok(Page::empty(offset, limit));
        }

        let ranked: Vec<(String, i64)> = grouped
            .order_by_desc(Column::Id.count())
            .order_by_asc(Column::Author)
            .offset(offset)
            .limit(limit)
            .into_tuple()
            .all(self.db)
            .await?;

        let items = ranked
            .into_iter()
            .map(|(author, count)| AuthorCount {
                author,
                count: count as u64,
                total_count,
            })
            .collect();

        Ok(Page::new(items, total_count, offset, limit))
    }

    async fn check_urls(&self) -> Result<Vec<UrlIssue>, DbErr> {
        let sources = entity::prelude::Source::find()
            .filter(Column::Url.is_not_null())
            .order_by_asc(Column::Id)
            .all(self.db)
            .await?;

        Ok(sources
            .into_iter()
            .filter_map(|source| {
                let url = source.url?;
                url_issue(&url).map(|issue| UrlIssue {
                    source_id: source.id,
                    name: source.name,
                    url,
                    issue,
                })
            })
            .collect())
    }

    async fn find_duplicates(&self) -> Result<Vec<DuplicatePair>, DbErr> {
        let names: Vec<(i32, String)> = entity::prelude::Source::find()
            .select_only()
            .column(Column::Id)
            .column(Column::Name)
            .order_by_asc(Column::Id)
            .into_tuple()
            .all(self.db)
            .await?;

        let mut pairs = Vec::new();
        for (i, (id_1, name_1)) in names.iter().enumerate() {
            for (id_2, name_2) in &names[i + 1..] {
                let similarity = name_similarity(name_1, name_2);
                if similarity >= DUPLICATE_THRESHOLD {
                    pairs.push(DuplicatePair {
                        source_id_1: *id_1,
                        name_1: name_1.clone(),
                        source_id_2: *id_2,
                        name_2: name_2.clone(),
                        similarity,
                    });
                }
            }
        }

        pairs.sort_by(|a, b| {
            b.similarity
                .cmp(&a.similarity)
                .then(a.source_id_1.cmp(&b.source_id_1))
                .then(a.source_id_2.cmp(&b.source_id_2))
        });

        Ok(pairs)
    }

    async fn request_create(&self, requester_id: i32, data: &ValidSource) -> Result<i32, DbErr> {
        let request = with_fields(
            change_request(ChangeRequestKind::Create, requester_id, None),
            data,
        );

        Ok(request.insert(self.db).await?.id)
    }

    async fn request_update(
        &self,
        requester_id: i32,
        source_id: i32,
        data: &ValidSource,
    ) -> Result<i32, DbErr> {
        let request = with_fields(
            change_request(ChangeRequestKind::Update, requester_id, Some(source_id)),
            data,
        );

        Ok(request.insert(self.db).await?.id)
    }

    async fn request_delete(
        &self,
        requester_id: i32,
        source_id: i32,
        reason: Option<&str>,
    ) -> Result<i32, DbErr> {
        let mut request = change_request(ChangeRequestKind::Delete, requester_id, Some(source_id));
        request.reason = ActiveValue::Set(reason.map(str::to_string));

        Ok(request.insert(self.db).await?.id)
    }

    async fn create_direct(&self, data: &ValidSource) -> Result<i32, DbErr> {
        let now = Utc::now().naive_utc();
        let source = entity::source::ActiveModel {
            name: ActiveValue::Set(data.name().to_string()),
            author: ActiveValue::Set(data.author().map(str::to_string)),
            source_type: ActiveValue::Set(data.source_type().map(str::to_string)),
            publication_date: ActiveValue::Set(data.publication_date()),
            url: ActiveValue::Set(data.url().map(str::to_string)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        Ok(source.insert(self.db).await?.id)
    }

    async fn update_direct(
        &self,
        source_id: i32,
        data: &ValidSource,
    ) -> Result<Option<SourceModel>, DbErr> {
        let source = match entity::prelude::Source::find_by_id(source_id)
            .one(self.db)
            .await?
        {
            Some(source) => source,
            None => return Ok(None),
        };

        let mut source_am = source.into_active_model();
        source_am.name = ActiveValue::Set(data.name().to_string());
        source_am.author = ActiveValue::Set(data.author().map(str::to_string));
        source_am.source_type = ActiveValue::Set(data.source_type().map(str::to_string));
        source_am.publication_date = ActiveValue::Set(data.publication_date());
        source_am.url = ActiveValue::Set(data.url().map(str::to_string));
        source_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let source = source_am.update(self.db).await?;

        Ok(Some(source))
    }

    async fn delete_direct(&self, source_id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::SourceEvent::delete_many()
            .filter(entity::source_event::Column::SourceId.eq(source_id))
            .exec(&txn)
            .await?;
        let result = entity::prelude::Source::delete_by_id(source_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    async fn event_exists(&self, event_id: i32) -> Result<bool, DbErr> {
        Ok(entity::prelude::Event::find_by_id(event_id)
            .one(self.db)
            .await?
            .is_some())
    }

    async fn link_event(&self, source_id: i32, event_id: i32) -> Result<bool, DbErr> {
        let existing = entity::prelude::SourceEvent::find()
            .filter(entity::source_event::Column::SourceId.eq(source_id))
            .filter(entity::source_event::Column::EventId.eq(event_id))
            .one(self.db)
            .await?;
        if existing.is_some() {
            return Ok(false);
        }

        let link = entity::source_event::ActiveModel {
            source_id: ActiveValue::Set(source_id),
            event_id: ActiveValue::Set(event_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };
        link.insert(self.db).await?;

        Ok(true)
    }

    async fn unlink_event(&self, source_id: i32, event_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::SourceEvent::delete_many()
            .filter(entity::source_event::Column::SourceId.eq(source_id))
            .filter(entity::source_event::Column::EventId.eq(event_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
