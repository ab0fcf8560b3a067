use axum::{extract::State, http::StatusCode, response::IntoResponse};
use chronicle::{
    model::source::{DuplicatePairDto, UrlIssueDto},
    server::controller::source::{check_urls, find_duplicates},
};

use super::*;

/// Expect 403 for a moderator running the URL audit
#[tokio::test]
async fn url_audit_requires_admin() -> Result<(), TestError> {
    let test = builder().build().await?;
    login(&test, MODERATOR_ID).await;

    let result = check_urls(State(test.to_app_state()), test.session.clone()).await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect only the malformed URL to be reported
#[tokio::test]
async fn url_audit_reports_malformed() -> Result<(), TestError> {
    let with_url = |name: &str, url: &str| entity::source::Model {
        url: Some(url.to_string()),
        ..factory::source(name)
    };
    let test = builder()
        .with_source_model(with_url("Annals", "https://perseus.tufts.edu/annals"))
        .with_source_model(with_url("Germania", "perseus.tufts.edu/germania"))
        .build()
        .await?;
    login(&test, ADMIN_ID).await;

    let resp = check_urls(State(test.to_app_state()), test.session.clone())
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let issues: Vec<UrlIssueDto> = body_json(resp).await;
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].name, "Germania");

    Ok(())
}

/// Expect near-identical names to be paired
#[tokio::test]
async fn duplicate_scan_pairs_similar_names() -> Result<(), TestError> {
    let test = builder()
        .with_source("Annals of Imperial Rome")
        .with_source("Annals of Imperial Rome.")
        .with_source("Letters to Atticus")
        .build()
        .await?;
    login(&test, ADMIN_ID).await;

    let resp = find_duplicates(State(test.to_app_state()), test.session.clone())
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let pairs: Vec<DuplicatePairDto> = body_json(resp).await;
    assert_eq!(pairs.len(), 1);
    assert_eq!((pairs[0].source_id_1, pairs[0].source_id_2), (1, 2));
    assert!(pairs[0].similarity >= 80);

    Ok(())
}
