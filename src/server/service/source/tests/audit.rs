//! Audit logging is best-effort: a failing audit write never fails the operation.

use chronicle_test_utils::prelude::*;

use crate::server::{
    data::DbRepositories, model::source::SourceFilters, service::moderation::ModerationPolicy,
};

use super::{input, MODERATOR_ID};

/// Source tables without the audit log, so every audit write fails.
async fn without_audit_table() -> Result<TestContext, TestError> {
    TestBuilder::new()
        .with_table(entity::prelude::AppUser)
        .with_table(entity::prelude::Source)
        .with_table(entity::prelude::Event)
        .with_table(entity::prelude::SourceEvent)
        .with_table(entity::prelude::SourceChangeRequest)
        .with_user("requester", role::REQUESTER)
        .with_user("moderator", role::MODERATOR)
        .build()
        .await
}

/// Expect writes to succeed even though the audit entry could not be stored
#[tokio::test]
async fn write_survives_audit_failure() -> Result<(), TestError> {
    let test = without_audit_table().await?;
    let repos = DbRepositories::new(&test.db);
    let policy = ModerationPolicy::default();
    let service = repos.source_service(&policy);

    let result = service
        .create_source_direct(MODERATOR_ID, &input("Gesta Danorum"))
        .await;

    assert!(result.is_ok());
    assert_eq!(test.sources().await?.len(), 1);

    Ok(())
}

/// Expect reads to succeed even though the audit entry could not be stored
#[tokio::test]
async fn read_survives_audit_failure() -> Result<(), TestError> {
    let test = without_audit_table().await?;
    let repos = DbRepositories::new(&test.db);
    let policy = ModerationPolicy::default();
    let service = repos.source_service(&policy);

    let result = service
        .list_sources(MODERATOR_ID, SourceFilters::default())
        .await;

    assert!(result.is_ok());

    Ok(())
}
