use chronicle_test_utils::prelude::*;

use crate::server::{
    data::DbRepositories,
    error::{access::AccessError, validation::ValidationError, Error},
    model::source::SourceInput,
    service::moderation::ModerationPolicy,
};

use super::{builder, input, MODERATOR_ID, REQUESTER_ID, UNKNOWN_ID};

mod create_source_request {
    use super::*;

    /// Expect exactly one pending request and one audit entry, with no source written
    #[tokio::test]
    async fn queues_request_for_requester() -> Result<(), TestError> {
        let test = builder().build().await?;
        let repos = DbRepositories::new(&test.db);
        let policy = ModerationPolicy::default();
        let service = repos.source_service(&policy);

        let request_id = service
            .create_source_request(REQUESTER_ID, &input("Heimskringla"))
            .await
            .unwrap();

        let requests = test.change_requests().await?;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].id, request_id);
        assert_eq!(requests[0].kind, "create");
        assert_eq!(requests[0].requester_id, REQUESTER_ID);
        assert!(test.sources().await?.is_empty());

        let log = test.audit_log().await?;
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].action, "SOURCE_CREATE_REQUESTED");
        assert_eq!(log[0].actor_id, REQUESTER_ID);

        Ok(())
    }

    /// Expect moderators to be able to submit requests too
    #[tokio::test]
    async fn accepts_request_from_moderator() -> Result<(), TestError> {
        let test = builder().build().await?;
        let repos = DbRepositories::new(&test.db);
        let policy = ModerationPolicy::default();
        let service = repos.source_service(&policy);

        let result = service
            .create_source_request(MODERATOR_ID, &input("Heimskringla"))
            .await;

        assert!(result.is_ok());

        Ok(())
    }

    /// Expect actors without a role to be denied before anything is written
    #[tokio::test]
    async fn denies_unknown_actor() -> Result<(), TestError> {
        let test = builder().build().await?;
        let repos = DbRepositories::new(&test.db);
        let policy = ModerationPolicy::default();
        let service = repos.source_service(&policy);

        let result = service
            .create_source_request(UNKNOWN_ID, &input("Heimskringla"))
            .await;

        assert!(matches!(
            result,
            Err(Error::AccessError(AccessError::PermissionDenied {
                actor_id: UNKNOWN_ID,
                required: 1,
                actual: 0
            }))
        ));
        assert!(test.change_requests().await?.is_empty());
        assert!(test.audit_log().await?.is_empty());

        Ok(())
    }

    /// Expect invalid input to be rejected without queuing a request
    #[tokio::test]
    async fn rejects_invalid_input() -> Result<(), TestError> {
        let test = builder().build().await?;
        let repos = DbRepositories::new(&test.db);
        let policy = ModerationPolicy::default();
        let service = repos.source_service(&policy);

        let result = service.create_source_request(REQUESTER_ID, &input("ab")).await;

        assert!(matches!(
            result,
            Err(Error::ValidationError(ValidationError::TooShort { .. }))
        ));
        assert!(test.change_requests().await?.is_empty());

        Ok(())
    }
}

mod create_source_direct {
    use super::*;

    /// Expect moderators to create sources with normalized fields
    #[tokio::test]
    async fn creates_source_for_moderator() -> Result<(), TestError> {
        let test = builder().build().await?;
        let repos = DbRepositories::new(&test.db);
        let policy = ModerationPolicy::default();
        let service = repos.source_service(&policy);
        let data = SourceInput {
            author: Some("  Snorri Sturluson ".to_string()),
            url: Some("example.com/heimskringla".to_string()),
            ..input("  Heimskringla  ")
        };

        let source_id = service
            .create_source_direct(MODERATOR_ID, &data)
            .await
            .unwrap();

        let sources = test.sources().await?;
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].id, source_id);
        assert_eq!(sources[0].name, "Heimskringla");
        assert_eq!(sources[0].author.as_deref(), Some("Snorri Sturluson"));
        assert_eq!(
            sources[0].url.as_deref(),
            Some("http://example.com/heimskringla")
        );

        let log = test.audit_log().await?;
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].action, "SOURCE_CREATED");
        assert_eq!(log[0].entity_id, Some(source_id));

        Ok(())
    }

    /// Expect requesters to be denied with no source row written
    #[tokio::test]
    async fn denies_requester() -> Result<(), TestError> {
        let test = builder().build().await?;
        let repos = DbRepositories::new(&test.db);
        let policy = ModerationPolicy::default();
        let service = repos.source_service(&policy);

        let result = service
            .create_source_direct(REQUESTER_ID, &input("Heimskringla"))
            .await;

        assert!(matches!(
            result,
            Err(Error::AccessError(AccessError::PermissionDenied {
                required: 2,
                actual: 1,
                ..
            }))
        ));
        assert!(test.sources().await?.is_empty());
        assert!(test.audit_log().await?.is_empty());

        Ok(())
    }

    /// Expect a permission failure to take precedence over invalid input
    #[tokio::test]
    async fn checks_permission_before_validation() -> Result<(), TestError> {
        let test = builder().build().await?;
        let repos = DbRepositories::new(&test.db);
        let policy = ModerationPolicy::default();
        let service = repos.source_service(&policy);

        let result = service
            .create_source_direct(REQUESTER_ID, &SourceInput::default())
            .await;

        assert!(matches!(result, Err(Error::AccessError(_))));

        Ok(())
    }

    /// Expect configured thresholds to replace the defaults
    #[tokio::test]
    async fn honours_configured_policy() -> Result<(), TestError> {
        let test = builder().build().await?;
        let repos = DbRepositories::new(&test.db);
        let policy = ModerationPolicy {
            requester_level: 1,
            moderator_level: 1,
            admin_level: 3,
        };
        let service = repos.source_service(&policy);

        let result = service
            .create_source_direct(REQUESTER_ID, &input("Heimskringla"))
            .await;

        assert!(result.is_ok());

        Ok(())
    }
}
