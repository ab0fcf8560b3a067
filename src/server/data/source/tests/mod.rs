
use chronicle_test_utils::prelude::*;

use crate::server::{
    model::source::{SortBy, SourceQuery, ValidSource},
    util::pagination::LIST_DEFAULT_LIMIT,
};

/// Unfiltered query over the first page.
fn query() -> SourceQuery {
    SourceQuery {
        offset: 0,
        limit: LIST_DEFAULT_LIMIT,
        search_term: None,
        author: None,
        source_type: None,
        year_from: None,
        year_to: None,
        event_id: None,
        has_url: None,
        sort_by: SortBy::default(),
    }
}

fn valid_source(name: &str) -> ValidSource {
    ValidSource::new(name.to_string(), None, None, None, None)
}

async fn setup() -> Result<TestContext, TestError> {
    TestBuilder::new().with_source_tables().build().await
}
