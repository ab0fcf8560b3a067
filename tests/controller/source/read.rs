use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chronicle::{
    model::source::{AuthorPageDto, SourceDetailsDto, SourcePageDto},
    server::controller::source::{
        get_source, list_source_authors, list_source_types, list_sources, search_sources,
        ListSourcesParams, SearchSourcesParams, SourceAuthorsParams,
    },
};

use super::*;

fn authored(name: &str, author: &str) -> entity::source::Model {
    entity::source::Model {
        author: Some(author.to_string()),
        ..factory::source(name)
    }
}

/// Expect 401 when no user is stored in the session
#[tokio::test]
async fn list_requires_session_user() -> Result<(), TestError> {
    let test = builder().with_source("Annals").build().await?;

    let result = list_sources(
        State(test.to_app_state()),
        test.session.clone(),
        Query(ListSourcesParams::default()),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect 200 with a filtered page sorted by name
#[tokio::test]
async fn list_filters_and_sorts() -> Result<(), TestError> {
    let test = builder()
        .with_source_model(authored("Histories", "Tacitus"))
        .with_source_model(authored("Annals", "Tacitus"))
        .with_source_model(authored("Ab Urbe Condita", "Livy"))
        .build()
        .await?;
    login(&test, REQUESTER_ID).await;

    let params = ListSourcesParams {
        author: Some("tacit".to_string()),
        sort_by: Some("name_asc".to_string()),
        ..Default::default()
    };
    let resp = list_sources(State(test.to_app_state()), test.session.clone(), Query(params))
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: SourcePageDto = body_json(resp).await;
    let names: Vec<&str> = page.items.iter().map(|s| s.source.name.as_str()).collect();
    assert_eq!(names, vec!["Annals", "Histories"]);
    assert_eq!(page.total_count, 2);
    assert_eq!(page.limit, 50);

    Ok(())
}

/// Expect an unknown sort value to fall back rather than fail
#[tokio::test]
async fn list_accepts_unknown_sort() -> Result<(), TestError> {
    let test = builder().with_source("Annals").build().await?;
    login(&test, REQUESTER_ID).await;

    let params = ListSourcesParams {
        sort_by: Some("popularity".to_string()),
        ..Default::default()
    };
    let resp = list_sources(State(test.to_app_state()), test.session.clone(), Query(params))
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

/// Expect 400 when year_from is after year_to
#[tokio::test]
async fn list_rejects_inverted_year_range() -> Result<(), TestError> {
    let test = builder().build().await?;
    login(&test, REQUESTER_ID).await;

    let params = ListSourcesParams {
        year_from: Some(1900),
        year_to: Some(1800),
        ..Default::default()
    };
    let result =
        list_sources(State(test.to_app_state()), test.session.clone(), Query(params)).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 200 with linked events and relationship counts
#[tokio::test]
async fn get_returns_details() -> Result<(), TestError> {
    let test = builder()
        .with_source("Annals")
        .with_event("Great Fire of Rome", None)
        .with_link(1, 1)
        .build()
        .await?;
    login(&test, REQUESTER_ID).await;

    let resp = get_source(State(test.to_app_state()), test.session.clone(), Path(1))
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let details: SourceDetailsDto = body_json(resp).await;
    assert_eq!(details.source.name, "Annals");
    assert_eq!(details.events.len(), 1);
    assert_eq!(details.events[0].name, "Great Fire of Rome");
    assert_eq!(details.relationships.get("events"), Some(&1));

    Ok(())
}

/// Expect 404 for a source that does not exist
#[tokio::test]
async fn get_missing_source_is_not_found() -> Result<(), TestError> {
    let test = builder().build().await?;
    login(&test, REQUESTER_ID).await;

    let result = get_source(State(test.to_app_state()), test.session.clone(), Path(42)).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 400 for a one-character search
#[tokio::test]
async fn search_rejects_short_query() -> Result<(), TestError> {
    let test = builder().build().await?;
    login(&test, REQUESTER_ID).await;

    let params = SearchSourcesParams {
        q: " a ".to_string(),
        ..Default::default()
    };
    let result =
        search_sources(State(test.to_app_state()), test.session.clone(), Query(params)).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 200 with matches only
#[tokio::test]
async fn search_returns_matches() -> Result<(), TestError> {
    let test = builder()
        .with_source("Annals")
        .with_source("Germania")
        .build()
        .await?;
    login(&test, REQUESTER_ID).await;

    let params = SearchSourcesParams {
        q: "germ".to_string(),
        ..Default::default()
    };
    let resp = search_sources(State(test.to_app_state()), test.session.clone(), Query(params))
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: SourcePageDto = body_json(resp).await;
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].source.name, "Germania");

    Ok(())
}

/// Expect distinct types in ascending order
#[tokio::test]
async fn types_are_distinct_and_sorted() -> Result<(), TestError> {
    let typed = |name: &str, source_type: &str| entity::source::Model {
        source_type: Some(source_type.to_string()),
        ..factory::source(name)
    };
    let test = builder()
        .with_source_model(typed("Letters to Atticus", "letter"))
        .with_source_model(typed("Annals", "chronicle"))
        .with_source_model(typed("Letters of Pliny", "letter"))
        .build()
        .await?;
    login(&test, REQUESTER_ID).await;

    let resp = list_source_types(State(test.to_app_state()), test.session.clone())
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let types: Vec<String> = body_json(resp).await;
    assert_eq!(types, vec!["chronicle", "letter"]);

    Ok(())
}

/// Expect authors below min_count to be excluded
#[tokio::test]
async fn authors_respect_min_count() -> Result<(), TestError> {
    let test = builder()
        .with_source_model(authored("Annals", "Tacitus"))
        .with_source_model(authored("Histories", "Tacitus"))
        .with_source_model(authored("Ab Urbe Condita", "Livy"))
        .build()
        .await?;
    login(&test, REQUESTER_ID).await;

    let params = SourceAuthorsParams {
        min_count: Some(2),
        ..Default::default()
    };
    let resp =
        list_source_authors(State(test.to_app_state()), test.session.clone(), Query(params))
            .await
            .unwrap()
            .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let page: AuthorPageDto = body_json(resp).await;
    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].author, "Tacitus");
    assert_eq!(page.items[0].count, 2);

    Ok(())
}
