use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chronicle::{
    model::source::LinkResultDto,
    server::controller::source::{link_event, unlink_event},
};

use super::*;

/// Expect changed on the first link and unchanged on the second
#[tokio::test]
async fn link_twice_reports_no_change() -> Result<(), TestError> {
    let test = builder()
        .with_source("Annals")
        .with_event("Great Fire of Rome", None)
        .build()
        .await?;
    login(&test, MODERATOR_ID).await;

    let first = link_event(State(test.to_app_state()), test.session.clone(), Path((1, 1)))
        .await
        .unwrap()
        .into_response();
    let second = link_event(State(test.to_app_state()), test.session.clone(), Path((1, 1)))
        .await
        .unwrap()
        .into_response();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(
        body_json::<LinkResultDto>(first).await,
        LinkResultDto { changed: true }
    );
    assert_eq!(
        body_json::<LinkResultDto>(second).await,
        LinkResultDto { changed: false }
    );

    Ok(())
}

/// Expect 404 when linking to an event that does not exist
#[tokio::test]
async fn link_missing_event_is_not_found() -> Result<(), TestError> {
    let test = builder().with_source("Annals").build().await?;
    login(&test, MODERATOR_ID).await;

    let result = link_event(State(test.to_app_state()), test.session.clone(), Path((1, 5))).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 403 for a requester managing links
#[tokio::test]
async fn requester_cannot_unlink() -> Result<(), TestError> {
    let test = builder()
        .with_source("Annals")
        .with_event("Great Fire of Rome", None)
        .with_link(1, 1)
        .build()
        .await?;
    login(&test, REQUESTER_ID).await;

    let result =
        unlink_event(State(test.to_app_state()), test.session.clone(), Path((1, 1))).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect an existing link to be removed
#[tokio::test]
async fn moderator_unlinks() -> Result<(), TestError> {
    let test = builder()
        .with_source("Annals")
        .with_event("Great Fire of Rome", None)
        .with_link(1, 1)
        .build()
        .await?;
    login(&test, MODERATOR_ID).await;

    let resp = unlink_event(State(test.to_app_state()), test.session.clone(), Path((1, 1)))
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json::<LinkResultDto>(resp).await,
        LinkResultDto { changed: true }
    );

    Ok(())
}
