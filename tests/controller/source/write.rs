use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chronicle::{
    model::source::WriteOutcomeDto,
    server::{
        controller::source::{create_source, delete_source, update_source, RemoveSourceParams},
        model::source::SourceInput,
    },
};

use super::*;

fn input(name: &str) -> SourceInput {
    SourceInput {
        name: Some(name.to_string()),
        author: Some("Tacitus".to_string()),
        url: Some("perseus.tufts.edu/annals".to_string()),
        ..Default::default()
    }
}

/// Expect 201 and a stored source when a moderator creates one
#[tokio::test]
async fn moderator_create_is_applied() -> Result<(), TestError> {
    let test = builder().build().await?;
    login(&test, MODERATOR_ID).await;

    let resp = create_source(
        State(test.to_app_state()),
        test.session.clone(),
        Json(input("Annals")),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let outcome: WriteOutcomeDto = body_json(resp).await;
    assert_eq!(outcome.status, "applied");

    let sources = test.sources().await?;
    assert_eq!(sources.len(), 1);
    assert_eq!(outcome.source_id, Some(sources[0].id));
    assert_eq!(
        sources[0].url.as_deref(),
        Some("http://perseus.tufts.edu/annals")
    );

    Ok(())
}

/// Expect 202 and a pending change request when a requester creates a source
#[tokio::test]
async fn requester_create_is_queued() -> Result<(), TestError> {
    let test = builder().build().await?;
    login(&test, REQUESTER_ID).await;

    let resp = create_source(
        State(test.to_app_state()),
        test.session.clone(),
        Json(input("Annals")),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    let outcome: WriteOutcomeDto = body_json(resp).await;
    assert_eq!(outcome.status, "requested");

    assert!(test.sources().await?.is_empty());
    let requests = test.change_requests().await?;
    assert_eq!(requests.len(), 1);
    assert_eq!(outcome.request_id, Some(requests[0].id));
    assert_eq!(requests[0].status, "pending");

    Ok(())
}

/// Expect 403 for a user without a role record
#[tokio::test]
async fn unknown_user_create_is_forbidden() -> Result<(), TestError> {
    let test = builder().build().await?;
    login(&test, 99).await;

    let result = create_source(
        State(test.to_app_state()),
        test.session.clone(),
        Json(input("Annals")),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(test.change_requests().await?.is_empty());

    Ok(())
}

/// Expect 400 for a name below the minimum length
#[tokio::test]
async fn create_rejects_short_name() -> Result<(), TestError> {
    let test = builder().build().await?;
    login(&test, MODERATOR_ID).await;

    let result = create_source(
        State(test.to_app_state()),
        test.session.clone(),
        Json(input("Ab")),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(test.sources().await?.is_empty());

    Ok(())
}

/// Expect 200 and updated fields when a moderator updates a source
#[tokio::test]
async fn moderator_update_is_applied() -> Result<(), TestError> {
    let test = builder().with_source("Anals").build().await?;
    login(&test, MODERATOR_ID).await;

    let resp = update_source(
        State(test.to_app_state()),
        test.session.clone(),
        Path(1),
        Json(input("Annals")),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let sources = test.sources().await?;
    assert_eq!(sources[0].name, "Annals");
    assert_eq!(sources[0].author.as_deref(), Some("Tacitus"));

    Ok(())
}

/// Expect 404 when updating a source that does not exist
#[tokio::test]
async fn update_missing_source_is_not_found() -> Result<(), TestError> {
    let test = builder().build().await?;
    login(&test, REQUESTER_ID).await;

    let result = update_source(
        State(test.to_app_state()),
        test.session.clone(),
        Path(7),
        Json(input("Annals")),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 202 with the reason stored on the delete request
#[tokio::test]
async fn requester_delete_is_queued_with_reason() -> Result<(), TestError> {
    let test = builder().with_source("Annals").build().await?;
    login(&test, REQUESTER_ID).await;

    let params = RemoveSourceParams {
        reason: Some("duplicate of another entry".to_string()),
    };
    let resp = delete_source(
        State(test.to_app_state()),
        test.session.clone(),
        Path(1),
        Query(params),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::ACCEPTED);
    assert_eq!(test.sources().await?.len(), 1);
    let requests = test.change_requests().await?;
    assert_eq!(
        requests[0].reason.as_deref(),
        Some("duplicate of another entry")
    );

    Ok(())
}

/// Expect 200 and the source removed when an admin deletes it
#[tokio::test]
async fn admin_delete_is_applied() -> Result<(), TestError> {
    let test = builder()
        .with_source("Annals")
        .with_event("Great Fire of Rome", None)
        .with_link(1, 1)
        .build()
        .await?;
    login(&test, ADMIN_ID).await;

    let resp = delete_source(
        State(test.to_app_state()),
        test.session.clone(),
        Path(1),
        Query(RemoveSourceParams::default()),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(test.sources().await?.is_empty());

    Ok(())
}
