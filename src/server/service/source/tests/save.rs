//! Writes routed through the moderation policy.

use chronicle_test_utils::prelude::*;

use crate::server::{
    data::DbRepositories,
    error::{access::AccessError, Error},
    model::source::WriteOutcome,
    service::moderation::ModerationPolicy,
};

use super::{builder, input, ADMIN_ID, MODERATOR_ID, REQUESTER_ID, UNKNOWN_ID};

/// Expect moderators and admins to write directly
#[tokio::test]
async fn applies_writes_for_privileged_roles() -> Result<(), TestError> {
    let test = builder().build().await?;
    let repos = DbRepositories::new(&test.db);
    let policy = ModerationPolicy::default();
    let service = repos.source_service(&policy);

    let moderator = service
        .save_source(MODERATOR_ID, &input("Moderator source"))
        .await
        .unwrap();
    let admin = service
        .save_source(ADMIN_ID, &input("Admin source"))
        .await
        .unwrap();

    assert_eq!(moderator, WriteOutcome::Applied(1));
    assert_eq!(admin, WriteOutcome::Applied(2));
    assert!(test.change_requests().await?.is_empty());

    Ok(())
}

/// Expect requesters' writes to be queued instead
#[tokio::test]
async fn queues_writes_for_requesters() -> Result<(), TestError> {
    let test = builder().with_source("Existing").build().await?;
    let repos = DbRepositories::new(&test.db);
    let policy = ModerationPolicy::default();
    let service = repos.source_service(&policy);

    let create = service
        .save_source(REQUESTER_ID, &input("New source"))
        .await
        .unwrap();
    let update = service
        .save_source_update(REQUESTER_ID, 1, &input("Renamed"))
        .await
        .unwrap();
    let delete = service
        .remove_source(REQUESTER_ID, 1, Some("obsolete"))
        .await
        .unwrap();

    assert_eq!(create, WriteOutcome::Requested(1));
    assert_eq!(update, WriteOutcome::Requested(2));
    assert_eq!(delete, WriteOutcome::Requested(3));
    let sources = test.sources().await?;
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].name, "Existing");

    let actions: Vec<String> = test
        .audit_log()
        .await?
        .into_iter()
        .map(|entry| entry.action)
        .collect();
    assert_eq!(
        actions,
        vec![
            "SOURCE_CREATE_REQUESTED",
            "SOURCE_UPDATE_REQUESTED",
            "SOURCE_DELETE_REQUESTED"
        ]
    );

    Ok(())
}

/// Expect moderator updates and removals to be applied to the source
#[tokio::test]
async fn applies_update_and_removal_for_moderator() -> Result<(), TestError> {
    let test = builder().with_source("Existing").build().await?;
    let repos = DbRepositories::new(&test.db);
    let policy = ModerationPolicy::default();
    let service = repos.source_service(&policy);

    let update = service
        .save_source_update(MODERATOR_ID, 1, &input("Renamed"))
        .await
        .unwrap();
    assert_eq!(update, WriteOutcome::Applied(1));
    assert_eq!(test.sources().await?[0].name, "Renamed");

    let delete = service.remove_source(MODERATOR_ID, 1, None).await.unwrap();
    assert_eq!(delete, WriteOutcome::Applied(1));
    assert!(test.sources().await?.is_empty());

    Ok(())
}

/// Expect actors below the requester level to be denied outright
#[tokio::test]
async fn denies_unknown_actor() -> Result<(), TestError> {
    let test = builder().with_source("Existing").build().await?;
    let repos = DbRepositories::new(&test.db);
    let policy = ModerationPolicy::default();
    let service = repos.source_service(&policy);

    let create = service.save_source(UNKNOWN_ID, &input("New source")).await;
    let update = service
        .save_source_update(UNKNOWN_ID, 1, &input("Renamed"))
        .await;
    let delete = service.remove_source(UNKNOWN_ID, 1, None).await;

    for result in [create, update, delete] {
        assert!(matches!(
            result,
            Err(Error::AccessError(AccessError::PermissionDenied { .. }))
        ));
    }
    assert!(test.change_requests().await?.is_empty());
    assert!(test.audit_log().await?.is_empty());

    Ok(())
}
